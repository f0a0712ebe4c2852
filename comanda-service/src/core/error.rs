use thiserror::Error;

/// Errors raised while setting up or driving the print service
///
/// Print attempts themselves never fail with these: dispatch outcomes are
/// reported as `PrintResult` values.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
