// Culture-invariant parsers for each target type
pub mod datetime_utils;
pub mod decimal_handler;
pub mod numeric_utils;
pub mod uuid;

pub use self::uuid::UuidHandler;
pub use decimal_handler::DecimalHandler;
