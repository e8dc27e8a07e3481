use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid input: {0}")]
    Invalid(String),
}
