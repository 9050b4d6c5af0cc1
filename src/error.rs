use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevboxError {
    #[error("Configuration parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Monitor error: {0}")]
    MonitorError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}
