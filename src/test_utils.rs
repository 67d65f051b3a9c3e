//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::settings::DocumentDefaults,
    core::{
        calculator::LineItemInput,
        document::{self, DocumentWithItems, NewDocument},
        employee::{self, NewEmployee},
        job::{self, NewJob},
        supplier::{self, NewSupplier},
    },
    entities::{self, DocumentType, SupplierKind},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A line item with the given quantity and unit price.
#[must_use]
pub fn test_item(quantity: f64, unit_price: f64) -> LineItemInput {
    LineItemInput {
        description: "Test item".to_string(),
        quantity,
        unit: "pcs".to_string(),
        unit_price,
    }
}

/// Creates a draft document with sensible defaults.
///
/// # Defaults
/// * `title`: "Test document"
/// * `items`: 2 × 100.00 and 1 × 50.00 (subtotal 250.00)
/// * `vat_rate`: 7% (from [`DocumentDefaults`])
/// * no job, supplier or requester
pub async fn create_test_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
) -> Result<DocumentWithItems> {
    document::create_document(
        db,
        doc_type,
        NewDocument {
            title: "Test document".to_string(),
            items: vec![test_item(2.0, 100.0), test_item(1.0, 50.0)],
            ..NewDocument::default()
        },
        &DocumentDefaults::default(),
    )
    .await
}

/// Creates a job with the given code.
///
/// # Defaults
/// * `name`: "Test job <code>"
/// * `budget`: 10,000.00
pub async fn create_test_job(db: &DatabaseConnection, code: &str) -> Result<entities::job::Model> {
    job::create_job(
        db,
        NewJob {
            code: code.to_string(),
            name: format!("Test job {code}"),
            budget: 10_000.0,
            ..NewJob::default()
        },
    )
    .await
}

/// Creates a supplier or trader with only a name.
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
    kind: SupplierKind,
) -> Result<entities::supplier::Model> {
    supplier::create_supplier(
        db,
        kind,
        NewSupplier {
            name: name.to_string(),
            ..NewSupplier::default()
        },
    )
    .await
}

/// Creates an employee with only a code and name.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        NewEmployee {
            code: code.to_string(),
            name: name.to_string(),
            ..NewEmployee::default()
        },
    )
    .await
}
