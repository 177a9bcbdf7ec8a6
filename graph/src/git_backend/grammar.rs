//! Text grammars of the git queries other than `git log`.

use crate::core::BranchRef;

/// Parse `git branch -a` output.
///
/// Lines are `<marker> <name>` with `*` marking the checked-out branch.
/// Detached-HEAD lines and `remotes/<remote>/HEAD -> ...` pointers are
/// skipped.
pub fn parse_branch_listing(output: &str) -> Vec<BranchRef> {
    let mut branches = Vec::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let name = line.get(2..).unwrap_or_default().trim();
        if name.is_empty() || name.starts_with('(') {
            continue;
        }
        // `git branch -a` shows the symbolic pointer as `... -> origin/master`
        let name = name.split(" -> ").next().unwrap_or(name);

        match name.strip_prefix("remotes/") {
            Some(remote_name) => {
                if remote_name.ends_with("/HEAD") {
                    continue;
                }
                branches.push(BranchRef::remote(remote_name));
            }
            None => branches.push(BranchRef::local(name)),
        }
    }
    branches
}

/// Parse `git rev-list --parents -n 1 <id>` output. The first id on the
/// line is the commit itself.
pub fn parse_parents_line(output: &str) -> Vec<String> {
    output
        .lines()
        .next()
        .map(|line| line.split_whitespace().skip(1).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Parse `git tag` output, one tag per line
pub fn parse_tag_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
