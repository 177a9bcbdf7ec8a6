pub mod html;
pub mod report;
pub mod text;

pub use html::render_html;
pub use report::{format_timestamp, BranchRow, BranchSort, CommitRow, Report};
pub use text::{render_text, TextLayout};
