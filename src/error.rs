use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid geometry: in-plane direction matrix is singular (determinant {determinant})")]
    InvalidGeometry { determinant: f64 },
}

impl GeometryError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
