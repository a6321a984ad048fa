//! # Bill Numbers
//!
//! Formatting and sequencing for bill numbers.
//!
//! ## Format
//! ```text
//! LJ-YYYYMMDD-NNNN
//! │  │        └── 4-digit zero-padded sequence
//! │  └── date the bill was cut
//! └── Lumina Jewellers prefix
//!
//! e.g. LJ-20250126-0001
//! ```
//!
//! ## Sequencing
//! The next sequence is the trailing four digits of the most recent bill
//! number plus one, regardless of date. The counter deliberately does NOT
//! reset at midnight: a shop that cut `LJ-20250101-0007` last thing on New
//! Year's Day cuts `LJ-20250102-0008` the next morning. Long-standing
//! behavior that existing paper records depend on, so it is preserved
//! as-is; the store's UNIQUE constraint on `bill_number` is the only guard
//! against concurrent generation.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

/// Prefix on every bill number.
pub const BILL_NUMBER_PREFIX: &str = "LJ";

/// Formats a bill number from a date and a sequence value.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use lumina_core::billno::format_bill_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 26).unwrap();
/// assert_eq!(format_bill_number(date, 1), "LJ-20250126-0001");
/// ```
pub fn format_bill_number(date: NaiveDate, sequence: u32) -> String {
    format!(
        "{}-{}-{:04}",
        BILL_NUMBER_PREFIX,
        date.format("%Y%m%d"),
        sequence
    )
}

/// Derives the next sequence from the latest stored bill number.
///
/// `None` (empty store) starts the sequence at 1. Otherwise the trailing
/// 4-digit suffix of the latest number is parsed and incremented, across
/// day boundaries too (see the module docs). A suffix that does not parse
/// as digits fails with [`CoreError::MalformedBillNumber`]; every number
/// this system writes parses, so a failure here means the store was
/// written by something else.
pub fn next_sequence(latest: Option<&str>) -> CoreResult<u32> {
    let Some(latest) = latest else {
        return Ok(1);
    };

    let suffix = latest
        .rsplit('-')
        .next()
        .filter(|s| s.len() == 4)
        .ok_or_else(|| CoreError::MalformedBillNumber(latest.to_string()))?;

    let sequence: u32 = suffix
        .parse()
        .map_err(|_| CoreError::MalformedBillNumber(latest.to_string()))?;

    Ok(sequence + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format() {
        assert_eq!(format_bill_number(date(2025, 1, 26), 1), "LJ-20250126-0001");
        assert_eq!(format_bill_number(date(2025, 12, 3), 42), "LJ-20251203-0042");
        assert_eq!(
            format_bill_number(date(2026, 8, 30), 9999),
            "LJ-20260830-9999"
        );
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        assert_eq!(next_sequence(None).unwrap(), 1);
    }

    #[test]
    fn test_sequence_continues_across_days() {
        // The suffix carries over regardless of the date stamp.
        assert_eq!(next_sequence(Some("LJ-20250101-0007")).unwrap(), 8);
        assert_eq!(next_sequence(Some("LJ-20241231-0999")).unwrap(), 1000);
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        assert!(matches!(
            next_sequence(Some("LJ-20250101-00X7")),
            Err(CoreError::MalformedBillNumber(_))
        ));
        assert!(matches!(
            next_sequence(Some("garbage")),
            Err(CoreError::MalformedBillNumber(_))
        ));
        assert!(matches!(
            next_sequence(Some("LJ-20250101-07")),
            Err(CoreError::MalformedBillNumber(_))
        ));
    }
}
