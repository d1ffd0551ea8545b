use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read industries file {path}: {source}")]
    IndustriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse industries file: {0}")]
    IndustriesFileParse(#[from] serde_yaml::Error),
    #[error("config validation failed: {0}")]
    Validation(String),
}
