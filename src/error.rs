use crate::Discrete;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MdpError>;

#[derive(Error, Debug)]
pub enum MdpError {
    #[error("cell ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        x: Discrete,
        y: Discrete,
        width: Discrete,
        height: Discrete,
    },

    #[error("expected one entry per grid cell ({expected}), got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cell ({x}, {y}) was never added to the grid")]
    MissingState { x: Discrete, y: Discrete },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("policy evaluation failed: {0}")]
    Numerical(String),

    #[error("malformed grid world document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read grid world document: {0}")]
    Io(#[from] std::io::Error),
}
