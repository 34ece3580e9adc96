use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for the data-access layer.
///
/// Public reader/writer functions never surface these; failures are
/// logged and converted to the documented empty/false sentinels at the
/// boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("warehouse query failed: {0}")]
    Warehouse(#[from] sqlx::Error),

    #[error("document store query failed: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
