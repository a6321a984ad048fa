//! # Domain Types
//!
//! Core domain types for the billing system.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Bill       │   │   Worksheet     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  bill_number    │   │  customer_id    │       │
//! │  │  phone, city    │   │  items[]        │   │  gold_given     │       │
//! │  └─────────────────┘   │  payment_amount │   │  final_weight   │       │
//! │                        └─────────────────┘   │  stones[]       │       │
//! │  ┌─────────────────┐                         └─────────────────┘       │
//! │  │  InventoryItem  │   Bill ──owns──► BillItem ──owns──► Stone        │
//! │  │  ─────────────  │                                                   │
//! │  │  sku, karatage  │   Customer ──referenced by──► Bill, Worksheet    │
//! │  │  quantity       │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for store relations
//! - Business ID where one exists (bill_number, sku) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};
use crate::karat::KaratGrade;
use crate::wastage::round_to;

// =============================================================================
// Metal Type
// =============================================================================

/// The base metal of a piece. Each metal admits only some karat grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetalType {
    Gold,
    WhiteGold,
    RoseGold,
    Silver,
}

impl MetalType {
    /// Karat grades that can be ordered in this metal.
    ///
    /// Gold alone goes up to K22/K21; the white and rose alloys top out at
    /// K18, and silver is always sterling.
    pub const fn allowed_karatages(&self) -> &'static [KaratGrade] {
        match self {
            MetalType::Gold => &[
                KaratGrade::K22,
                KaratGrade::K21,
                KaratGrade::K18,
                KaratGrade::K16,
                KaratGrade::K14,
                KaratGrade::K9,
            ],
            MetalType::WhiteGold | MetalType::RoseGold => &[
                KaratGrade::K18,
                KaratGrade::K16,
                KaratGrade::K14,
                KaratGrade::K9,
            ],
            MetalType::Silver => &[KaratGrade::Silver925],
        }
    }

    /// Checks whether a grade is orderable in this metal.
    pub fn allows(&self, grade: KaratGrade) -> bool {
        self.allowed_karatages().contains(&grade)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MetalType::Gold => "Gold",
            MetalType::WhiteGold => "WhiteGold",
            MetalType::RoseGold => "RoseGold",
            MetalType::Silver => "Silver",
        }
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gold" => Ok(MetalType::Gold),
            "WhiteGold" => Ok(MetalType::WhiteGold),
            "RoseGold" => Ok(MetalType::RoseGold),
            "Silver" => Ok(MetalType::Silver),
            _ => Err(CoreError::Validation(ValidationError::NotAllowed {
                field: "metal_type".to_string(),
                allowed: vec![
                    "Gold".to_string(),
                    "WhiteGold".to_string(),
                    "RoseGold".to_string(),
                    "Silver".to_string(),
                ],
            })),
        }
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// How a bill is settled. `Koko` is the installment provider the shop
/// accepts alongside cash and card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Card,
    Koko,
}

impl PaymentType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Card => "Card",
            PaymentType::Koko => "Koko",
        }
    }
}

impl Default for PaymentType {
    fn default() -> Self {
        PaymentType::Cash
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(PaymentType::Cash),
            "Card" => Ok(PaymentType::Card),
            "Koko" => Ok(PaymentType::Koko),
            other => Err(CoreError::Validation(ValidationError::InvalidFormat {
                field: "payment_type".to_string(),
                reason: format!("unknown payment type '{other}'"),
            })),
        }
    }
}

// =============================================================================
// Bill Status & Type
// =============================================================================

/// Lifecycle status of a persisted bill.
///
/// Bills are immutable once cut; the only permitted transition is
/// Completed → Cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Completed,
    Cancelled,
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Completed
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BillStatus::Completed => "Completed",
            BillStatus::Cancelled => "Cancelled",
        })
    }
}

impl FromStr for BillStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(BillStatus::Completed),
            "Cancelled" => Ok(BillStatus::Cancelled),
            other => Err(CoreError::Validation(ValidationError::InvalidFormat {
                field: "bill_status".to_string(),
                reason: format!("unknown bill status '{other}'"),
            })),
        }
    }
}

/// Whether a bill covers shelf stock or a finished custom order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillType {
    ReadyMade,
    CustomOrder,
}

impl Default for BillType {
    fn default() -> Self {
        BillType::ReadyMade
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BillType::ReadyMade => "ReadyMade",
            BillType::CustomOrder => "CustomOrder",
        })
    }
}

impl FromStr for BillType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ReadyMade" => Ok(BillType::ReadyMade),
            "CustomOrder" => Ok(BillType::CustomOrder),
            other => Err(CoreError::Validation(ValidationError::InvalidFormat {
                field: "bill_type".to_string(),
                reason: format!("unknown bill type '{other}'"),
            })),
        }
    }
}

// =============================================================================
// Worksheet Status
// =============================================================================

/// Progress of a custom-order worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorksheetStatus {
    InProgress,
    Completed,
}

impl Default for WorksheetStatus {
    fn default() -> Self {
        WorksheetStatus::InProgress
    }
}

impl fmt::Display for WorksheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorksheetStatus::InProgress => "InProgress",
            WorksheetStatus::Completed => "Completed",
        })
    }
}

impl FromStr for WorksheetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InProgress" => Ok(WorksheetStatus::InProgress),
            "Completed" => Ok(WorksheetStatus::Completed),
            other => Err(CoreError::Validation(ValidationError::InvalidFormat {
                field: "worksheet_status".to_string(),
                reason: format!("unknown worksheet status '{other}'"),
            })),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the shop. Owned by the ledger store; the core only reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Inventory
// =============================================================================

/// A shelf-stock piece available for ready-made sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    /// Stock Keeping Unit - business identifier (e.g. "GR-22K-001").
    pub sku: String,
    pub name: String,
    pub metal_type: MetalType,
    pub karatage: KaratGrade,
    /// Weight of one piece in grams.
    pub weight: f64,
    /// Pieces on the shelf. Floors at zero, never negative.
    pub quantity: i64,
    /// Ticket price per piece.
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Bill
// =============================================================================

/// A completed sale. Identified by its sequential `bill_number`
/// (LJ-YYYYMMDD-NNNN) and an internal UUID; owns an ordered sequence
/// of line items, each optionally carrying stone sub-records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub bill_number: String,
    pub customer_id: String,
    pub bill_date: DateTime<Utc>,
    pub bill_type: BillType,
    pub subtotal: f64,
    pub tax: f64,
    pub payment_type: PaymentType,
    /// Subtotal after the card surcharge rule, 2 decimal places.
    pub payment_amount: f64,
    pub status: BillStatus,
    pub items: Vec<BillItem>,
    pub created_at: DateTime<Utc>,
}

/// A line item on a bill. Descriptive fields are frozen at sale time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItem {
    pub id: String,
    pub bill_id: String,
    pub description: String,
    pub metal_type: MetalType,
    pub karatage: KaratGrade,
    /// Gross weight in grams.
    pub weight: f64,
    /// Fine-metal content in grams (weight × karat coefficient).
    pub pure_weight: f64,
    /// Size descriptor ("Ring", "Chain", ...), free-form per jewelry kind.
    pub size: Option<String>,
    pub size_value: Option<String>,
    pub quantity: i64,
    /// Per-gram metal rate used on the ticket, when quoted that way.
    pub rate: Option<f64>,
    pub total_value: f64,
    pub stones: Vec<Stone>,
}

/// A stone set into a bill item or tracked on a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    /// Carat weight.
    pub weight: f64,
    pub rate: f64,
    pub total_value: f64,
}

// =============================================================================
// Worksheet
// =============================================================================

/// Tracking record for a custom jewelry order, distinct from a completed
/// sale bill. Read/write passthrough to the store; the wastage figure on
/// it is whatever the goldsmith recorded, not an engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub id: String,
    pub customer_id: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub metal_type: MetalType,
    pub karatage: KaratGrade,
    /// Metal handed over by the customer, grams.
    pub gold_given: f64,
    /// Weight the order was quoted at, grams.
    pub target_weight: f64,
    /// Weight of the finished piece, grams.
    pub final_weight: f64,
    /// Recorded wastage for the job, grams.
    pub wastage: f64,
    pub status: WorksheetStatus,
    pub stones: Vec<Stone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Boundary Inputs
// =============================================================================
// Explicit input schemas validated before they reach the orchestrator.
// Optional fields carry serde defaults so a sparse payload deserializes
// to the same values the original form submitted.

/// Payload for creating a bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBillInput {
    pub customer_id: String,
    pub items: Vec<BillItemInput>,
    #[serde(default)]
    pub bill_type: BillType,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub payment_type: PaymentType,
}

/// One line item of a [`CreateBillInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItemInput {
    pub description: String,
    pub metal_type: MetalType,
    pub karatage: KaratGrade,
    pub weight: f64,
    /// Fine-metal content; derived from weight and purity when absent.
    #[serde(default)]
    pub pure_weight: Option<f64>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub size_value: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub rate: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub stones: Vec<StoneInput>,
}

fn default_quantity() -> i64 {
    1
}

impl BillItemInput {
    /// Fine-metal content of the item: the explicit figure when one was
    /// entered, otherwise weight × purity rounded to 3 decimal places.
    pub fn pure_weight_or_derived(&self) -> f64 {
        self.pure_weight
            .unwrap_or_else(|| round_to(self.weight * self.karatage.karat_coefficient(), 3))
    }
}

/// One stone of a [`BillItemInput`] or [`NewWorksheet`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoneInput {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub weight: f64,
    pub rate: f64,
}

impl StoneInput {
    /// Ticket value of the stone line: rate × quantity, 2 decimal places.
    pub fn total_value(&self) -> f64 {
        round_to(self.rate * self.quantity as f64, 2)
    }
}

/// Payload for opening a custom-order worksheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorksheet {
    pub customer_id: String,
    pub description: String,
    pub metal_type: MetalType,
    pub karatage: KaratGrade,
    pub gold_given: f64,
    pub target_weight: f64,
    pub final_weight: f64,
    pub wastage: f64,
    #[serde(default)]
    pub stones: Vec<StoneInput>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_type_allows_grades() {
        assert!(MetalType::Gold.allows(KaratGrade::K22));
        assert!(!MetalType::WhiteGold.allows(KaratGrade::K22));
        assert!(MetalType::RoseGold.allows(KaratGrade::K18));
        assert!(MetalType::Silver.allows(KaratGrade::Silver925));
        assert!(!MetalType::Silver.allows(KaratGrade::K18));
        assert!(!MetalType::Gold.allows(KaratGrade::Silver925));
    }

    #[test]
    fn test_pure_weight_derived_from_purity() {
        let item = BillItemInput {
            description: "Silver Chain".to_string(),
            metal_type: MetalType::Silver,
            karatage: KaratGrade::Silver925,
            weight: 3.0,
            pure_weight: None,
            size: None,
            size_value: None,
            quantity: 1,
            rate: Some(75.0),
            price: 8000.0,
            stones: vec![],
        };
        assert_eq!(item.pure_weight_or_derived(), 2.775);

        let explicit = BillItemInput {
            pure_weight: Some(5.0),
            ..item
        };
        assert_eq!(explicit.pure_weight_or_derived(), 5.0);
    }

    #[test]
    fn test_stone_total_value() {
        let stone = StoneInput {
            name: "Diamond".to_string(),
            quantity: 2,
            weight: 0.5,
            rate: 25000.0,
        };
        assert_eq!(stone.total_value(), 50000.0);
    }

    #[test]
    fn test_enum_text_round_trips() {
        assert_eq!("Card".parse::<PaymentType>().unwrap(), PaymentType::Card);
        assert_eq!(
            "WhiteGold".parse::<MetalType>().unwrap(),
            MetalType::WhiteGold
        );
        assert_eq!(
            "CustomOrder".parse::<BillType>().unwrap(),
            BillType::CustomOrder
        );
        assert_eq!(
            "InProgress".parse::<WorksheetStatus>().unwrap(),
            WorksheetStatus::InProgress
        );
        assert!("Cheque".parse::<PaymentType>().is_err());
    }

    #[test]
    fn test_sparse_bill_input_deserializes_with_defaults() {
        let json = r#"{
            "customer_id": "1",
            "items": [{
                "description": "Gold Ring",
                "metal_type": "Gold",
                "karatage": "K18",
                "weight": 4.2,
                "price": 31000.0
            }]
        }"#;

        let input: CreateBillInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.payment_type, PaymentType::Cash);
        assert_eq!(input.bill_type, BillType::ReadyMade);
        assert_eq!(input.tax, 0.0);
        assert_eq!(input.items[0].quantity, 1);
        assert!(input.items[0].stones.is_empty());
    }
}
