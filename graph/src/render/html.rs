//! Self-contained HTML page: commits across, branches down.

use super::report::{BranchRow, Report};
use crate::core::Tier;
use crate::parse::escape_html;
use std::fmt::Write;

/// Width of the branch label column in pixels; the scroll script assumes it
const LABEL_WIDTH: usize = 256;

const STYLE: &str = r#"<style>
td { height: 24px; overflow: hidden; white-space: nowrap; }
td.branches { text-align: left; overflow: hidden; white-space: nowrap; }
td.branches div { width: 251px; margin-left: 5px; }
#cells td, #commits td { text-align: center; min-width: 48px; height: 24px; overflow: hidden; }
.info { background-color: white; visibility: hidden; overflow: hidden; position: absolute; z-index: 3; left: 0; top: 0; width: 90%; height: 84px; }
.white { background-color: white; }
.grey { background-color: #ddddff; }
.notmerged { background-color: #000000; color: #ffffff; }
.master { background-color: #ff0000; color: #ffffff; }
.staging { background-color: #3388ff; }
.production { background-color: #00aa00; }
</style>"#;

const SCRIPT: &str = r#"<script>
var activeInfo = null;
var targetX = 0;
var sliding = false;
function show(id) {
	if (activeInfo != null) activeInfo.style.visibility = 'hidden';
	activeInfo = document.getElementById('info_' + id);
	activeInfo.style.visibility = 'visible';
}
function update() {
	if (sliding) {
		var offset = Math.floor((targetX - window.pageXOffset) / 2);
		if (Math.abs(offset) < 2) {
			offset = targetX - window.pageXOffset;
			sliding = false;
		}
		window.scrollTo(window.pageXOffset + offset, window.pageYOffset);
	}
	if (activeInfo != null) {
		activeInfo.style.top = window.pageYOffset + 'px';
		activeInfo.style.left = window.pageXOffset + 'px';
	}
	document.getElementById('commits').style.top = (window.scrollY + 96) + 'px';
	var branches = document.getElementById('branches');
	branches.style.left = (window.pageXOffset + 256 - branches.offsetWidth) + 'px';
	setTimeout(update, 500);
}
function moveTo(rank) {
	sliding = true;
	targetX = rank * 48;
}
update();
</script>"#;

/// Label background and text colors for a branch tier
fn label_colors(tier: Tier) -> (&'static str, &'static str) {
    match tier {
        Tier::Untracked => ("#000000", "#ffffff"),
        Tier::Master => ("#ff0000", "#ffffff"),
        Tier::Staging => ("#3388ff", "#000000"),
        Tier::Production => ("#00aa00", "#000000"),
    }
}

fn write_info_panels(out: &mut String, report: &Report) -> std::fmt::Result {
    // panels are keyed by column so ids never reach the script
    for (col, commit) in report.commits.iter().enumerate() {
        writeln!(
            out,
            r#"<div id="info_{col}" class="info" onmouseover="this.style.height='auto'" onmouseout="this.style.height='84px'">{id}<br />{time} {author}<br />{description}</div>"#,
            id = escape_html(&commit.id),
            time = commit.timestamp,
            author = commit.author,
            description = commit.description,
        )?;
    }
    Ok(())
}

fn write_header(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(
        out,
        r#"<table id="commits" style="background-color: white; position: absolute; z-index: 2; table-layout: fixed; left: {LABEL_WIDTH}px; top: 96px; height: 24px;" cellpadding=0 cellspacing=0><tr>"#
    )?;
    for (col, commit) in report.commits.iter().enumerate() {
        let background = if commit.is_tag {
            "yellow"
        } else if commit.is_merge {
            "orange"
        } else {
            "white"
        };
        writeln!(
            out,
            r#"<td onmouseover="show({col})" style="background: {background};">{short}</td>"#,
            short = escape_html(&commit.short_id),
        )?;
    }
    writeln!(out, "</tr></table>")
}

fn write_grid(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(
        out,
        r#"<table id="cells" style="position: absolute; table-layout: fixed; left: {LABEL_WIDTH}px; top: 120px;" cellpadding=0 cellspacing=0>"#
    )?;
    for (row, branch) in report.branches.iter().enumerate() {
        let even_row = row % 2 == 0;
        out.push_str("<tr>");
        for (col, cell) in branch.cells.iter().enumerate() {
            let class = match cell {
                Some(tier) => tier.class_name(),
                // checkerboard for absent commits
                None if even_row || col % 2 == 0 => "grey",
                None => "white",
            };
            write!(out, r#"<td class="{}"></td>"#, class)?;
        }
        out.push_str("</tr>\n");
    }
    writeln!(out, "</table>")
}

fn write_label(out: &mut String, branch: &BranchRow) -> std::fmt::Result {
    let (background, color) = label_colors(branch.tier);
    let display = escape_html(&branch.display);
    match branch.latest_rank {
        Some(rank) => writeln!(
            out,
            r#"<tr><td class="branches" style="background-color: {background}; color: {color};"><div onclick="moveTo({rank});">{display}</div></td></tr>"#
        ),
        None => writeln!(
            out,
            r#"<tr><td class="branches" style="background-color: {background}; color: {color};"><div>{display}</div></td></tr>"#
        ),
    }
}

fn write_labels(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(
        out,
        r#"<table id="branches" style="background-color: white; overflow: hidden; white-space: nowrap; position: absolute; z-index: 1; left: 0px; top: 120px; width: {LABEL_WIDTH}px;" cellpadding=0 cellspacing=0>"#
    )?;
    for branch in &report.branches {
        write_label(out, branch)?;
    }
    writeln!(out, "</table>")
}

/// Render the report as a single HTML document
pub fn render_html(report: &Report) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_document(&mut out, report);
    out
}

fn write_document(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "<html>\n<head><meta charset=\"utf-8\">{STYLE}</head>\n<body>")?;
    write_info_panels(out, report)?;
    write_header(out, report)?;
    write_grid(out, report)?;
    write_labels(out, report)?;
    writeln!(out, "{SCRIPT}")?;
    writeln!(out, "</body></html>")
}
