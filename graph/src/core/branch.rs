use std::collections::HashSet;

/// A branch discovered by the branch listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// `master` for local branches, `origin/master` for remote-tracking ones
    pub name: String,
    pub is_local: bool,
}

impl BranchRef {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_local: true,
        }
    }

    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_local: false,
        }
    }

    /// Revision passed to the log query
    pub fn revision(&self) -> String {
        if self.is_local {
            format!("heads/{}", self.name)
        } else {
            format!("remotes/{}", self.name)
        }
    }

    /// Label shown in reports; remote branches read `feature (origin)`
    pub fn display(&self) -> String {
        if self.is_local {
            return self.name.clone();
        }
        match self.name.split_once('/') {
            Some((remote, short)) => format!("{} ({})", short, remote),
            None => self.name.clone(),
        }
    }
}

/// A branch and the commits its log produced
#[derive(Debug, Clone)]
pub struct Branch {
    pub name: String,
    pub display: String,
    pub is_local: bool,
    /// Ids produced by this branch's log query
    pub commits: HashSet<String>,
    /// Newest commit of the branch's log
    pub latest_commit: Option<String>,
    /// Created from a merge message rather than the branch listing
    pub is_placeholder: bool,
}

impl Branch {
    pub fn new(reference: &BranchRef) -> Self {
        Self {
            name: reference.name.clone(),
            display: reference.display(),
            is_local: reference.is_local,
            commits: HashSet::new(),
            latest_commit: None,
            is_placeholder: false,
        }
    }

    /// Entry for a branch only known from a merge message
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display: name.to_string(),
            is_local: true,
            commits: HashSet::new(),
            latest_commit: None,
            is_placeholder: true,
        }
    }

    pub fn reference(&self) -> BranchRef {
        BranchRef {
            name: self.name.clone(),
            is_local: self.is_local,
        }
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.commits.contains(commit_id)
    }
}
