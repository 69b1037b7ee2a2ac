use thiserror::Error;

/// Errors a delivery transport can produce.
///
/// These never cross the dispatcher boundary; the dispatcher logs them and
/// moves on.
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway error: {0}")]
    Gateway(String),
}
