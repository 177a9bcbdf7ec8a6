pub mod window;

pub use window::{RecencyWindow, WindowStats};
