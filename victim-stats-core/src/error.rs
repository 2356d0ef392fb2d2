//! Errors raised while loading the plugin.

use thiserror::Error;

/// Failures that stop the plugin from loading.
///
/// The event path never fails; bad input there is logged and skipped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("engine \"{engine}\" not supported")]
    UnsupportedEngine { engine: String },

    #[error("host rejected registration of {kind} \"{name}\": {reason}")]
    Registration {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
