pub mod cli;
pub mod grammar;
pub mod source;
pub mod walker;

pub use cli::GitCli;
pub use source::{HistorySource, LogQuery};
pub use walker::HistoryWalker;
