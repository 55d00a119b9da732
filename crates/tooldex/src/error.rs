#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::InvalidFormat(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<tooldex_core::ingest::IngestError> for Error {
    fn from(err: tooldex_core::ingest::IngestError) -> Self {
        Error::InvalidFormat(err.to_string())
    }
}
