pub mod format;
pub mod types;
pub mod validation;
pub mod value;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use thiserror::Error;

pub use format::FormatError;
pub use validation::ValidationHelper;
pub use value::{Value, ValueKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LenientError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Type conversion error: {0}")]
    TypeConversion(String),
}

pub type Result<T> = std::result::Result<T, LenientError>;
