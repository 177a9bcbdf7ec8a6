pub mod escape;
pub mod log;
pub mod merge;

pub use escape::{escape_angle_brackets, escape_html};
pub use log::{parse_branch_log, LogParser, LogSummary, LINE_BREAK};
pub use merge::{interpret_merge_message, MergeInterpreter, MergeRoute};
