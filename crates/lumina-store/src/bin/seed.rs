//! # Seed Data Generator
//!
//! Populates the database with the sample ledger for development:
//! three customers and five inventory items.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p lumina-store --bin seed
//!
//! # Specify database path
//! cargo run -p lumina-store --bin seed -- --db ./data/lumina.db
//! ```

use std::env;

use chrono::Utc;
use lumina_core::{Customer, InventoryItem, KaratGrade, MetalType};
use lumina_store::{Database, DbConfig};

/// Sample customers: (name, phone, city)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Rajesh Kumar", "9876543210", "Mumbai"),
    ("Priya Sharma", "9876543211", "Delhi"),
    ("Amit Patel", "9876543212", "Ahmedabad"),
];

/// Sample inventory: (sku, name, metal, grade, weight, quantity, price)
const INVENTORY: &[(&str, &str, MetalType, KaratGrade, f64, i64, f64)] = &[
    ("GR-22K-001", "Gold Ring 22K", MetalType::Gold, KaratGrade::K22, 5.5, 12, 35000.0),
    ("SB-925-001", "Silver Bracelet", MetalType::Silver, KaratGrade::Silver925, 8.0, 25, 8000.0),
    ("GN-18K-001", "Gold Necklace 18K", MetalType::Gold, KaratGrade::K18, 12.0, 8, 62000.0),
    ("DP-18K-001", "Diamond Pendant", MetalType::Gold, KaratGrade::K18, 2.5, 15, 45000.0),
    ("PE-22K-001", "Pearl Earrings", MetalType::Gold, KaratGrade::K22, 4.0, 20, 28000.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./lumina_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Lumina Billing Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./lumina_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Lumina Billing Seed Data Generator");
    println!("=====================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.customers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} customers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding customers...");

    let now = Utc::now();
    for (idx, (name, phone, city)) in CUSTOMERS.iter().enumerate() {
        let customer = Customer {
            id: format!("{}", idx + 1),
            name: (*name).to_string(),
            phone: Some((*phone).to_string()),
            city: Some((*city).to_string()),
            created_at: now,
            updated_at: now,
        };
        db.customers().insert(&customer).await?;
        println!("  + {}", customer.name);
    }

    println!();
    println!("Seeding inventory...");

    for (idx, (sku, name, metal_type, karatage, weight, quantity, price)) in
        INVENTORY.iter().enumerate()
    {
        let item = InventoryItem {
            id: format!("{}", idx + 1),
            sku: (*sku).to_string(),
            name: (*name).to_string(),
            metal_type: *metal_type,
            karatage: *karatage,
            weight: *weight,
            quantity: *quantity,
            price: *price,
            created_at: now,
            updated_at: now,
        };
        db.inventory().insert(&item).await?;
        println!("  + {} ({})", item.name, item.sku);
    }

    println!();
    println!("✓ Seeded {} customers, {} inventory items", CUSTOMERS.len(), INVENTORY.len());

    db.close().await;

    Ok(())
}
