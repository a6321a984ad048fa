//! # Validation Module
//!
//! Boundary validation for billing payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape checks: required fields, enum keys                          │
//! │  └── Unknown karatage / metal / payment type rejected here             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Non-negative weights and prices                                   │
//! │  ├── Karatage admissible for the item's metal                          │
//! │  └── Bill carries a customer and at least one item                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (SQLite)                                               │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{BillItemInput, CreateBillInput, NewWorksheet, StoneInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a gram weight. Zero is allowed (stone-only lines).
pub fn validate_weight(field: &str, grams: f64) -> ValidationResult<()> {
    if !grams.is_finite() || grams < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a monetary amount. Zero is allowed.
pub fn validate_price(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a piece/stone count.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

fn validate_stone(stone: &StoneInput) -> ValidationResult<()> {
    if stone.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "stone name".to_string(),
        });
    }
    validate_quantity(stone.quantity)?;
    validate_weight("stone weight", stone.weight)?;
    validate_price("stone rate", stone.rate)?;

    Ok(())
}

fn validate_bill_item(item: &BillItemInput) -> ValidationResult<()> {
    if item.description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if !item.metal_type.allows(item.karatage) {
        return Err(ValidationError::NotAllowed {
            field: format!("karatage for {}", item.metal_type),
            allowed: item
                .metal_type
                .allowed_karatages()
                .iter()
                .map(|g| g.to_string())
                .collect(),
        });
    }

    validate_weight("weight", item.weight)?;
    if let Some(pure) = item.pure_weight {
        validate_weight("pure_weight", pure)?;
    }
    validate_quantity(item.quantity)?;
    if let Some(rate) = item.rate {
        validate_price("rate", rate)?;
    }
    validate_price("price", item.price)?;

    for stone in &item.stones {
        validate_stone(stone)?;
    }

    Ok(())
}

/// Validates a complete bill payload before it reaches the orchestrator.
///
/// ## Rules
/// - A customer must be selected
/// - At least one line item, each with a description
/// - All numerics non-negative, quantities positive
/// - Each item's karatage must be admissible for its metal
pub fn validate_bill_input(input: &CreateBillInput) -> ValidationResult<()> {
    if input.customer_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer_id".to_string(),
        });
    }

    if input.items.is_empty() {
        return Err(ValidationError::EmptyBill);
    }

    validate_price("tax", input.tax)?;

    for item in &input.items {
        validate_bill_item(item)?;
    }

    Ok(())
}

/// Validates a worksheet payload.
pub fn validate_worksheet_input(input: &NewWorksheet) -> ValidationResult<()> {
    if input.customer_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer_id".to_string(),
        });
    }
    if input.description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if !input.metal_type.allows(input.karatage) {
        return Err(ValidationError::NotAllowed {
            field: format!("karatage for {}", input.metal_type),
            allowed: input
                .metal_type
                .allowed_karatages()
                .iter()
                .map(|g| g.to_string())
                .collect(),
        });
    }

    validate_weight("gold_given", input.gold_given)?;
    validate_weight("target_weight", input.target_weight)?;
    validate_weight("final_weight", input.final_weight)?;
    validate_weight("wastage", input.wastage)?;

    for stone in &input.stones {
        validate_stone(stone)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::karat::KaratGrade;
    use crate::types::{MetalType, PaymentType};

    fn item(description: &str) -> BillItemInput {
        BillItemInput {
            description: description.to_string(),
            metal_type: MetalType::Gold,
            karatage: KaratGrade::K22,
            weight: 5.5,
            pure_weight: None,
            size: Some("Ring".to_string()),
            size_value: Some("18".to_string()),
            quantity: 1,
            rate: Some(6500.0),
            price: 35750.0,
            stones: vec![],
        }
    }

    fn bill_input() -> CreateBillInput {
        CreateBillInput {
            customer_id: "1".to_string(),
            items: vec![item("Gold Ring")],
            bill_type: Default::default(),
            tax: 0.0,
            payment_type: PaymentType::Cash,
        }
    }

    #[test]
    fn test_valid_bill_passes() {
        assert!(validate_bill_input(&bill_input()).is_ok());
    }

    #[test]
    fn test_missing_customer_rejected() {
        let mut input = bill_input();
        input.customer_id = "  ".to_string();
        assert!(matches!(
            validate_bill_input(&input),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut input = bill_input();
        input.items.clear();
        assert!(matches!(
            validate_bill_input(&input),
            Err(ValidationError::EmptyBill)
        ));
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut input = bill_input();
        input.items[0].description = String::new();
        assert!(validate_bill_input(&input).is_err());
    }

    #[test]
    fn test_karatage_must_match_metal() {
        let mut input = bill_input();
        // K22 is not orderable in white gold
        input.items[0].metal_type = MetalType::WhiteGold;
        assert!(matches!(
            validate_bill_input(&input),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_negative_numerics_rejected() {
        let mut input = bill_input();
        input.items[0].weight = -1.0;
        assert!(validate_bill_input(&input).is_err());

        let mut input = bill_input();
        input.items[0].price = f64::NAN;
        assert!(validate_bill_input(&input).is_err());

        let mut input = bill_input();
        input.items[0].quantity = 0;
        assert!(validate_bill_input(&input).is_err());
    }
}
