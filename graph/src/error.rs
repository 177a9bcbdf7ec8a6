use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// git ran and reported a failure
    #[error("`{command}` failed: {stderr}")]
    QueryFailed { command: String, stderr: String },

    /// git could not be started at all
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// git succeeded but printed something the grammar does not allow
    #[error("unexpected output from `{command}`: {detail}")]
    Malformed { command: String, detail: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
