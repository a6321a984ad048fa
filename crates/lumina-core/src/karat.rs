//! # Karat Grades
//!
//! The process-wide metal purity table.
//!
//! ## The Wastage Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Karat Grade Coefficients (fixed at startup)                │
//! │                                                                         │
//! │   grade      │ karat coeff (purity) │ wastage coeff (allowance)        │
//! │   ───────────┼──────────────────────┼───────────────────────────       │
//! │   K22        │ 0.916                │ 0.0562                           │
//! │   K21        │ 0.875                │ 0.06                             │
//! │   K18        │ 0.75                 │ 0.1                              │
//! │   K16        │ 0.666                │ 0.12                             │
//! │   K14        │ 0.583                │ 0.13                             │
//! │   K9         │ 0.375                │ 0.15                             │
//! │   Silver925  │ 0.925                │ 0.1                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both coefficients for a given grade are shared constants; every
//! calculation in the system resolves them from this one table. An unknown
//! grade key is a hard [`CoreError::InvalidGrade`] failure, never a default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// KaratGrade
// =============================================================================

/// Purity classification of a metal.
///
/// `K22` is 22-karat gold; `Silver925` is sterling silver. The enum doubles
/// as the key into the coefficient table, so a parsed `KaratGrade` can never
/// miss a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KaratGrade {
    K22,
    K21,
    K18,
    K16,
    K14,
    K9,
    Silver925,
}

impl KaratGrade {
    /// All known grades, in descending purity order for gold then silver.
    pub const ALL: [KaratGrade; 7] = [
        KaratGrade::K22,
        KaratGrade::K21,
        KaratGrade::K18,
        KaratGrade::K16,
        KaratGrade::K14,
        KaratGrade::K9,
        KaratGrade::Silver925,
    ];

    /// Fractional purity of the alloy (0 < value ≤ 1).
    ///
    /// ## Example
    /// ```rust
    /// use lumina_core::KaratGrade;
    ///
    /// assert_eq!(KaratGrade::K22.karat_coefficient(), 0.916);
    /// ```
    #[inline]
    pub const fn karat_coefficient(&self) -> f64 {
        match self {
            KaratGrade::K22 => 0.916,
            KaratGrade::K21 => 0.875,
            KaratGrade::K18 => 0.75,
            KaratGrade::K16 => 0.666,
            KaratGrade::K14 => 0.583,
            KaratGrade::K9 => 0.375,
            KaratGrade::Silver925 => 0.925,
        }
    }

    /// Fractional crafting-loss allowance for the grade (0 < value < 1).
    ///
    /// Softer (purer) alloys lose less metal to filing and polishing, so
    /// the allowance shrinks as purity climbs.
    #[inline]
    pub const fn wastage_coefficient(&self) -> f64 {
        match self {
            KaratGrade::K22 => 0.0562,
            KaratGrade::K21 => 0.06,
            KaratGrade::K18 => 0.1,
            KaratGrade::K16 => 0.12,
            KaratGrade::K14 => 0.13,
            KaratGrade::K9 => 0.15,
            KaratGrade::Silver925 => 0.1,
        }
    }

    /// The textual key used in payloads and in the store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            KaratGrade::K22 => "K22",
            KaratGrade::K21 => "K21",
            KaratGrade::K18 => "K18",
            KaratGrade::K16 => "K16",
            KaratGrade::K14 => "K14",
            KaratGrade::K9 => "K9",
            KaratGrade::Silver925 => "Silver925",
        }
    }
}

impl fmt::Display for KaratGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a grade key. An unrecognized key fails with
/// [`CoreError::InvalidGrade`]; there is no fallback grade.
impl FromStr for KaratGrade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "K22" => Ok(KaratGrade::K22),
            "K21" => Ok(KaratGrade::K21),
            "K18" => Ok(KaratGrade::K18),
            "K16" => Ok(KaratGrade::K16),
            "K14" => Ok(KaratGrade::K14),
            "K9" => Ok(KaratGrade::K9),
            "Silver925" => Ok(KaratGrade::Silver925),
            other => Err(CoreError::InvalidGrade(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_match_table() {
        assert_eq!(KaratGrade::K22.karat_coefficient(), 0.916);
        assert_eq!(KaratGrade::K22.wastage_coefficient(), 0.0562);
        assert_eq!(KaratGrade::K9.karat_coefficient(), 0.375);
        assert_eq!(KaratGrade::K9.wastage_coefficient(), 0.15);
        assert_eq!(KaratGrade::Silver925.karat_coefficient(), 0.925);
        assert_eq!(KaratGrade::Silver925.wastage_coefficient(), 0.1);
    }

    #[test]
    fn test_coefficients_are_in_range() {
        for grade in KaratGrade::ALL {
            let karat = grade.karat_coefficient();
            let wastage = grade.wastage_coefficient();
            assert!(karat > 0.0 && karat <= 1.0, "{grade} karat out of range");
            assert!(wastage > 0.0 && wastage < 1.0, "{grade} wastage out of range");
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for grade in KaratGrade::ALL {
            let parsed: KaratGrade = grade.as_str().parse().unwrap();
            assert_eq!(parsed, grade);
        }
    }

    #[test]
    fn test_unknown_grade_fails() {
        let err = "K23".parse::<KaratGrade>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidGrade(ref key) if key == "K23"));

        // No case-insensitive leniency either
        assert!("k22".parse::<KaratGrade>().is_err());
        assert!("".parse::<KaratGrade>().is_err());
    }
}
