use thiserror::Error;

/// Errors from the edges of the simulator. The tick itself never fails.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
