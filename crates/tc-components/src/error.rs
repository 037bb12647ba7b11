//! Error types for component operations.

use tc_core::error::TcError;
use thiserror::Error;

/// Errors that can occur while configuring components.
///
/// Per-tick evaluation never fails; only construction validates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<TcError> for ComponentError {
    fn from(e: TcError) -> Self {
        match e {
            TcError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            TcError::InvalidArg { what } | TcError::OutOfRange { what, .. } => {
                ComponentError::InvalidArg { what }
            }
        }
    }
}
