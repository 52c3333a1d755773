use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Not a number: {input:?}")]
    InvalidNumber { input: String },

    #[error("Unknown {vocabulary} value: {value:?}")]
    UnknownValue {
        vocabulary: &'static str,
        value: String,
    },

    #[error("Blank {what}")]
    Blank { what: &'static str },
}
