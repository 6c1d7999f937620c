use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("GOOGLE_SERVICE_ACCOUNT_CREDS_JSON is not set")]
    CredsNotConfigured,
    #[error("service account credentials are not valid JSON: {0}")]
    CredsInvalid(#[from] serde_json::Error),
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),
    #[error("failed to sign token assertion: {0}")]
    Assertion(#[from] jsonwebtoken::errors::Error),
    #[error("token exchange failed: {0}")]
    Token(String),
    #[error("sheets request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid sheets url: {0}")]
    Url(#[from] url::ParseError),
    #[error("sheet tab not found: {0}")]
    TabNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetsError>;
