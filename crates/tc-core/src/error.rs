use thiserror::Error;

pub type TcResult<T> = Result<T, TcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Value out of range for {what}: {value} (expected {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
