use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
