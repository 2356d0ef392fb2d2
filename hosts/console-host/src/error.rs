use thiserror::Error;

/// Errors raised while setting up the console host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    #[error("cvar \"{0}\" is already registered")]
    DuplicateCvar(String),

    #[error("player setting \"{0}\" is already registered")]
    DuplicateSetting(String),
}

pub type Result<T> = std::result::Result<T, HostError>;
