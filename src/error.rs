use thiserror::Error;

pub type RangeResult<T> = Result<T, RangeError>;

#[derive(Debug, Error)]
pub enum RangeError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("no tick candidate fits control size {control_size}")]
    NoFeasibleRange { control_size: f64 },

    #[error("value range is not representable: {0}")]
    Unrepresentable(String),
}
