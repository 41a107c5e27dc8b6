use uuid::Uuid;

use crate::{LenientError, Result};

/// Length of the hyphenated GUID form, the only textual form accepted.
pub const GUID_TEXT_LEN: usize = 36;

/// UUID utilities for strict GUID handling
pub struct UuidHandler;

impl UuidHandler {
    /// Validate the hyphenated `8-4-4-4-12` form. Braced, URN and
    /// unhyphenated forms are rejected.
    pub fn validate_uuid(value: &str) -> bool {
        if value.len() != GUID_TEXT_LEN {
            return false;
        }

        let parts: Vec<&str> = value.split('-').collect();
        if parts.len() != 5 {
            return false;
        }

        parts[0].len() == 8
            && parts[1].len() == 4
            && parts[2].len() == 4
            && parts[3].len() == 4
            && parts[4].len() == 12
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_hexdigit()))
    }

    /// Strictly parse a hyphenated GUID.
    pub fn parse_uuid(value: &str) -> Result<Uuid> {
        if !Self::validate_uuid(value) {
            return Err(LenientError::TypeConversion(format!("Invalid UUID format: {value}")));
        }

        Uuid::try_parse(value)
            .map_err(|e| LenientError::TypeConversion(format!("Failed to parse UUID: {e}")))
    }

    /// Convert the 16-byte binary form to a GUID
    pub fn bytes_to_uuid(bytes: &[u8]) -> Result<Uuid> {
        Uuid::from_slice(bytes).map_err(|_| {
            LenientError::TypeConversion(format!("Invalid UUID byte length: {}", bytes.len()))
        })
    }
}
