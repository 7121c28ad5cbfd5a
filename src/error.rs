use thiserror::Error;

/// Unified error type for git-merger operations
#[derive(Error, Debug)]
pub enum GitMergerError {
    #[error("git {operation} failed: {output}")]
    Gateway { operation: String, output: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-merger
pub type Result<T> = std::result::Result<T, GitMergerError>;

impl GitMergerError {
    /// Create a gateway error carrying the failed operation and its combined output
    pub fn gateway(operation: impl Into<String>, output: impl Into<String>) -> Self {
        GitMergerError::Gateway {
            operation: operation.into(),
            output: output.into(),
        }
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        GitMergerError::NotFound(msg.into())
    }

    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        GitMergerError::Parse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitMergerError::Config(msg.into())
    }
}
