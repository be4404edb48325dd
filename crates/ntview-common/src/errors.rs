use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NtviewError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl NtviewError {
    /// True when the error came from unparseable settings (inline or file).
    pub fn is_parse_error(&self) -> bool {
        matches!(self, NtviewError::Config(ConfigError::ParseError(_)))
    }
}
