//! Error types shared by the cell, polynomial and potential kernels

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, CellError>;

/// Errors reported by the numerical kernels.
///
/// Every failure is local to the call that triggered it. A failed [`crate::Cell::update`]
/// leaves the cell untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellError {
    /// Wrong shape, count, sign or range of an argument, or a buffer that is too small
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input does not describe a valid unit cell
    #[error("geometry error: {0}")]
    Geometry(String),

    /// An evaluation point coincides with a point charge
    #[error("evaluation point {point} coincides with charge {atom}")]
    CoincidentCharge { point: usize, atom: usize },
}

impl CellError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CellError::InvalidArgument(msg.into())
    }

    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        CellError::Geometry(msg.into())
    }
}
