use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::types::numeric_utils::strip_group_separators;
use crate::{LenientError, Result};

pub struct DecimalHandler;

impl DecimalHandler {
    /// Convert a string to rust_decimal::Decimal using the invariant grammar:
    /// optional sign, `,` group separators, `.` decimal point, no exponent.
    pub fn parse_decimal(s: &str) -> Result<Decimal> {
        let trimmed = s.trim();
        if trimmed.contains(['e', 'E', '_']) {
            return Err(LenientError::TypeConversion(format!(
                "Invalid numeric value: {trimmed}"
            )));
        }

        let normalized = strip_group_separators(trimmed)?;
        let unsigned = normalized.strip_prefix('+').unwrap_or(&normalized);
        Decimal::from_str(unsigned)
            .map_err(|e| LenientError::TypeConversion(format!("Invalid numeric value: {e}")))
    }

    /// Render with exactly `scale` fractional digits, rounding half away
    /// from zero.
    pub fn format_fixed(decimal: &Decimal, scale: u32) -> String {
        let rounded = decimal.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.prec$}", rounded, prec = scale as usize)
    }
}
