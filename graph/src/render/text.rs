//! Plain-text grid for terminals.

use super::report::Report;
use crate::core::Tier;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display-width aware truncation and padding of labels
pub struct TextLayout;

impl TextLayout {
    /// Calculate display width of a string
    pub fn display_width(text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    /// Truncate string to fit width, preserving grapheme boundaries
    pub fn truncate_to_width(text: &str, max_width: usize) -> String {
        if Self::display_width(text) <= max_width {
            return text.to_string();
        }
        if max_width == 0 {
            return String::new();
        }

        let mut result = String::new();
        let mut current_width = 0;
        // leave room for the ellipsis
        for grapheme in text.graphemes(true) {
            let grapheme_width = UnicodeWidthStr::width(grapheme);
            if current_width + grapheme_width + 1 > max_width {
                break;
            }
            result.push_str(grapheme);
            current_width += grapheme_width;
        }
        result.push('…');
        result
    }

    /// Pad string on the right to exactly `target_width` columns
    pub fn pad_to_width(text: &str, target_width: usize) -> String {
        let text = Self::truncate_to_width(text, target_width);
        let padding = target_width.saturating_sub(Self::display_width(&text));
        format!("{}{}", text, " ".repeat(padding))
    }
}

fn tier_glyph(tier: Tier) -> char {
    match tier {
        Tier::Production => 'P',
        Tier::Staging => 'S',
        Tier::Master => 'M',
        Tier::Untracked => 'x',
    }
}

/// Render one line per branch: tier, label, then a glyph per commit
pub fn render_text(report: &Report, label_width: usize) -> String {
    let mut out = String::new();

    let header: String = report
        .commits
        .iter()
        .map(|c| if c.is_tag { 'T' } else if c.is_merge { '*' } else { 'o' })
        .collect();
    // "[X] " plus the padded label
    out.push_str(&" ".repeat(label_width + 5));
    out.push_str(&header);
    out.push('\n');

    for branch in &report.branches {
        let cells: String = branch
            .cells
            .iter()
            .map(|cell| cell.map_or('.', tier_glyph))
            .collect();
        out.push_str(&format!(
            "[{}] {}{}\n",
            tier_glyph(branch.tier),
            TextLayout::pad_to_width(&branch.display, label_width + 1),
            cells
        ));
    }
    out
}
