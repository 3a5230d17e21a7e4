use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("QR request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input closed while waiting for step {step}")]
    InputClosed { step: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
