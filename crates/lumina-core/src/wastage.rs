//! # Wastage Engine
//!
//! The metal-wastage calculation for custom jewelry work.
//!
//! ## How a Wastage Check Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Wastage Calculation                               │
//! │                                                                         │
//! │  Customer hands over 10.000 g of gold for a K22 ring                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Goldsmith returns a finished piece weighing 9.300 g                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  theoretical = target_weight × wastage_coeff   (quote to customer)     │
//! │  allowed     = final_weight  × wastage_coeff   (tolerance for job)     │
//! │  actual      = gold_given − final_weight − purity_corrected_balance    │
//! │  difference  = actual − allowed                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  difference > 0 → Excess   (goldsmith lost too much metal)             │
//! │  difference < 0 → Low      (job came in under tolerance)               │
//! │  difference = 0 → Ideal    (exactly on tolerance)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a pure function: no side effects, no suspension, fully
//! deterministic. Persisting the result is the caller's decision.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreResult;
use crate::karat::KaratGrade;

// =============================================================================
// Wastage Status
// =============================================================================

/// Classification of a wastage job against its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WastageStatus {
    /// Actual wastage exceeded the allowed tolerance.
    Excess,
    /// Actual wastage came in under the allowed tolerance.
    Low,
    /// Actual wastage landed exactly on the tolerance.
    Ideal,
}

// =============================================================================
// Wastage Result
// =============================================================================

/// Computed wastage figures for one job, all weights in grams.
///
/// Created fresh per calculation; never cached or persisted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WastageResult {
    /// Quoted wastage for the requested piece, 3 decimal places.
    pub theoretical_wastage: f64,
    /// Tolerance for the piece actually produced, 3 decimal places.
    pub allowed_wastage: f64,
    /// Metal genuinely lost during crafting, 3 decimal places.
    pub actual_wastage: f64,
    /// Actual minus allowed, 4 decimal places.
    pub difference: f64,
    /// Sign classification of the (unrounded) difference.
    pub status: WastageStatus,
}

impl WastageResult {
    /// Computes wastage figures for an already-parsed grade.
    ///
    /// Infallible: the grade carries its own coefficients, so there is no
    /// lookup to miss. `purity_corrected_balance` defaults to 0 when absent.
    ///
    /// The status is classified on the exact (unrounded) difference with
    /// exact floating equality for `Ideal`; the stored figures are then
    /// rounded for display (3 dp for weights, 4 dp for the difference).
    pub fn compute(
        grade: KaratGrade,
        target_weight: f64,
        final_metal_weight: f64,
        gold_given: f64,
        purity_corrected_balance: Option<f64>,
    ) -> WastageResult {
        let coeff = grade.wastage_coefficient();

        let theoretical = target_weight * coeff;
        let allowed = final_metal_weight * coeff;
        let actual = gold_given - final_metal_weight - purity_corrected_balance.unwrap_or(0.0);
        let difference = actual - allowed;

        // Classify before rounding so the stored status always matches the
        // exact arithmetic, not the display figures.
        let status = if difference > 0.0 {
            WastageStatus::Excess
        } else if difference < 0.0 {
            WastageStatus::Low
        } else {
            WastageStatus::Ideal
        };

        WastageResult {
            theoretical_wastage: round_to(theoretical, 3),
            allowed_wastage: round_to(allowed, 3),
            actual_wastage: round_to(actual, 3),
            difference: round_to(difference, 4),
            status,
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Calculates wastage for a karatage given as a textual key.
///
/// ## Contract
/// 1. Resolve the grade; an unrecognized key fails with
///    [`CoreError::InvalidGrade`](crate::CoreError::InvalidGrade) and no
///    partial result is produced.
/// 2. Compute theoretical/allowed/actual wastage and their difference.
/// 3. Classify the difference sign: Excess (> 0), Low (< 0), Ideal (== 0).
///
/// ## Example
/// ```rust
/// use lumina_core::wastage::{calculate_wastage, WastageStatus};
///
/// let result = calculate_wastage("K22", 10.0, 9.5, 10.2, None).unwrap();
/// assert_eq!(result.status, WastageStatus::Excess);
/// ```
pub fn calculate_wastage(
    karatage: &str,
    target_weight: f64,
    final_metal_weight: f64,
    gold_given: f64,
    purity_corrected_balance: Option<f64>,
) -> CoreResult<WastageResult> {
    let grade = KaratGrade::from_str(karatage)?;

    Ok(WastageResult::compute(
        grade,
        target_weight,
        final_metal_weight,
        gold_given,
        purity_corrected_balance,
    ))
}

/// Rounds to `places` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_excess_when_actual_exceeds_allowed() {
        // K22: allowed = 9.5 * 0.0562 = 0.5339, actual = 10.2 - 9.5 = 0.7
        let result = calculate_wastage("K22", 10.0, 9.5, 10.2, None).unwrap();

        assert_eq!(result.theoretical_wastage, 0.562);
        assert_eq!(result.allowed_wastage, 0.534);
        assert_eq!(result.actual_wastage, 0.7);
        assert_eq!(result.difference, 0.1661);
        assert_eq!(result.status, WastageStatus::Excess);
    }

    #[test]
    fn test_low_when_actual_under_allowed() {
        // K18: allowed = 9.8 * 0.1 = 0.98, actual = 10.0 - 9.8 = 0.2
        let result = calculate_wastage("K18", 10.0, 9.8, 10.0, None).unwrap();

        assert_eq!(result.status, WastageStatus::Low);
        assert!(result.difference < 0.0);
    }

    #[test]
    fn test_ideal_on_exact_equality() {
        // Choose inputs where actual == allowed exactly in f64:
        // K18 coeff 0.1 with final 10.0 → allowed = 1.0 exactly (10.0 * 0.1),
        // gold_given 11.0 → actual = 1.0 exactly.
        let result = calculate_wastage("K18", 10.0, 10.0, 11.0, None).unwrap();

        assert_eq!(result.difference, 0.0);
        assert_eq!(result.status, WastageStatus::Ideal);
    }

    #[test]
    fn test_purity_corrected_balance_defaults_to_zero() {
        let without = calculate_wastage("K21", 5.0, 4.8, 5.1, None).unwrap();
        let explicit = calculate_wastage("K21", 5.0, 4.8, 5.1, Some(0.0)).unwrap();
        assert_eq!(without, explicit);
    }

    #[test]
    fn test_purity_corrected_balance_reduces_actual() {
        let plain = calculate_wastage("K22", 10.0, 9.0, 10.0, None).unwrap();
        let corrected = calculate_wastage("K22", 10.0, 9.0, 10.0, Some(0.5)).unwrap();

        assert_eq!(plain.actual_wastage, 1.0);
        assert_eq!(corrected.actual_wastage, 0.5);
    }

    #[test]
    fn test_invalid_grade_is_hard_failure() {
        let err = calculate_wastage("K23", 10.0, 9.5, 10.0, None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidGrade(ref key) if key == "K23"));
    }

    #[test]
    fn test_status_matches_sign_for_all_grades() {
        for grade in KaratGrade::ALL {
            let result =
                WastageResult::compute(grade, 10.0, 9.5, 10.5, None);
            match result.status {
                WastageStatus::Excess => assert!(result.difference > 0.0),
                WastageStatus::Low => assert!(result.difference < 0.0),
                WastageStatus::Ideal => assert_eq!(result.difference, 0.0),
            }
        }
    }

    #[test]
    fn test_rounding_places() {
        assert_eq!(round_to(0.56199, 3), 0.562);
        assert_eq!(round_to(0.16611, 4), 0.1661);
        assert_eq!(round_to(-0.0005, 3), -0.001); // half away from zero
    }
}
