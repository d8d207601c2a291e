//! Top-level error for the dashboard binary.
//!
//! Request and form failures never reach this type; they are turned into
//! user-facing strings at the query or form that issued them.

use crate::api_client::ApiClientError;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::persistence::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not build API client: {0}")]
    Api(#[from] ApiClientError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("could not start logging: {0}")]
    Logging(#[from] LoggingError),
}
