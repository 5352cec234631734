#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Status code: {0}")]
    StatusCode(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Max retries exceeded: {0}")]
    MaxRetriesExceeded(String),

    #[error("Invalid response")]
    InvalidResponse,

    #[error("No cached response")]
    NoCachedResponse,
}
