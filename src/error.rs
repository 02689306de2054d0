use thiserror::Error;

/// An error raised while evaluating an expression at a point.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvalError {
    #[error("square root of negative value {arg}")]
    NegativeSqrt { arg: f64 },
    #[error("division of {numerator} by zero")]
    DivisionByZero { numerator: f64 },
    /// An elementary or user supplied function overflowed, e.g. `exp` of a large argument.
    #[error("{op} produced a non-finite value {value}")]
    NonFinite { op: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, EvalError>;
