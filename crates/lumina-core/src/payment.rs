//! # Payment Surcharge Rule
//!
//! Sibling rule to the wastage engine: card payments at or above the
//! surcharge threshold carry the bank's 3% processing charge.
//!
//! ## Rule
//! ```text
//! paymentType == Card AND total ≥ 20 000  →  amount = total + total × 3%
//! anything else                           →  amount = total
//! ```
//!
//! Pure and deterministic; the only rounding is the 2-decimal-place
//! monetary display contract.

use crate::types::PaymentType;
use crate::wastage::round_to;
use crate::{CARD_SURCHARGE_PERCENT, CARD_SURCHARGE_THRESHOLD};

/// Applies the card surcharge rule to a bill subtotal.
///
/// ## Example
/// ```rust
/// use lumina_core::payment::calculate_payment_amount;
/// use lumina_core::types::PaymentType;
///
/// assert_eq!(calculate_payment_amount(20000.0, PaymentType::Card), 20600.0);
/// assert_eq!(calculate_payment_amount(19999.0, PaymentType::Card), 19999.0);
/// assert_eq!(calculate_payment_amount(50000.0, PaymentType::Cash), 50000.0);
/// ```
pub fn calculate_payment_amount(total_value: f64, payment_type: PaymentType) -> f64 {
    if payment_type == PaymentType::Card && total_value >= CARD_SURCHARGE_THRESHOLD {
        let charge = (total_value * CARD_SURCHARGE_PERCENT) / 100.0;
        return round_to(total_value + charge, 2);
    }

    round_to(total_value, 2)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_at_threshold_gets_surcharge() {
        assert_eq!(calculate_payment_amount(20000.0, PaymentType::Card), 20600.0);
    }

    #[test]
    fn test_card_below_threshold_unchanged() {
        assert_eq!(calculate_payment_amount(19999.0, PaymentType::Card), 19999.0);
    }

    #[test]
    fn test_cash_never_surcharged() {
        assert_eq!(calculate_payment_amount(50000.0, PaymentType::Cash), 50000.0);
    }

    #[test]
    fn test_koko_never_surcharged() {
        assert_eq!(calculate_payment_amount(62000.0, PaymentType::Koko), 62000.0);
    }

    #[test]
    fn test_result_rounds_to_two_places() {
        // 21333.33 × 3% = 639.9999 → 21973.3299 → 21973.33
        assert_eq!(
            calculate_payment_amount(21333.33, PaymentType::Card),
            21973.33
        );
    }
}
