//! Error types for parameter loading and forecast computation

use thiserror::Error;

/// Errors raised while building or validating a parameter set
#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("cannot parse {value:?} for {name}")]
    Unparsable { name: String, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the checked forecast computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A revenue figure overflowed or became NaN
    #[error("non-finite {field} in forecast year {year}")]
    NonFinite { year: i32, field: &'static str },

    /// The active project count left the range of `i64`
    #[error("active project count overflows in forecast year {year}")]
    ProjectCountOverflow { year: i32 },
}
