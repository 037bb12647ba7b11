//! Error types for simulation setup.
//!
//! `EngineModel::update` never fails; these errors come from design
//! validation, step policies and scenario options.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid design: {what}")]
    InvalidDesign { what: &'static str },

    #[error("Component error: {message}")]
    Component { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<tc_components::ComponentError> for SimError {
    fn from(e: tc_components::ComponentError) -> Self {
        SimError::Component {
            message: e.to_string(),
        }
    }
}

impl From<tc_core::TcError> for SimError {
    fn from(e: tc_core::TcError) -> Self {
        SimError::Component {
            message: e.to_string(),
        }
    }
}
