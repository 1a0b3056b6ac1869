#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Invalid cookie '{0}': expected name=value")]
    InvalidCookie(String),

    #[error("Network error: {0}")]
    Network(String),
}
