//! Supplier business logic - vendors and traders.
//!
//! `/suppliers` and `/traders` are both served from here; every function takes
//! the [`SupplierKind`] it operates on, and a row of the other kind is treated
//! as not found.

use crate::{
    entities::{Supplier, SupplierKind, supplier},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewSupplier {
    pub name: String,
    pub tax_id: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

const fn entity_name(kind: SupplierKind) -> &'static str {
    match kind {
        SupplierKind::Supplier => "Supplier",
        SupplierKind::Trader => "Trader",
    }
}

fn validate_email(email: Option<&str>) -> Result<()> {
    match email {
        Some(email) if !email.contains('@') => Err(Error::validation(format!(
            "'{email}' is not a valid email address"
        ))),
        _ => Ok(()),
    }
}

/// Active suppliers of `kind` ordered by name, optionally matching `search`
/// against name, tax ID or contact.
pub async fn list_suppliers(
    db: &DatabaseConnection,
    kind: SupplierKind,
    search: Option<&str>,
) -> Result<Vec<supplier::Model>> {
    let mut select = Supplier::find()
        .filter(supplier::Column::Kind.eq(kind))
        .filter(supplier::Column::IsDeleted.eq(false));
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(supplier::Column::Name.contains(term))
                .add(supplier::Column::TaxId.contains(term))
                .add(supplier::Column::ContactName.contains(term)),
        );
    }
    select
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a supplier of `kind` by ID, returning None if not found or deleted.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    kind: SupplierKind,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Ok(Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .filter(|s| s.kind == kind && !s.is_deleted))
}

/// Creates a supplier or trader.
pub async fn create_supplier(
    db: &DatabaseConnection,
    kind: SupplierKind,
    input: NewSupplier,
) -> Result<supplier::Model> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::validation(format!(
            "{} name cannot be empty",
            entity_name(kind)
        )));
    }
    validate_email(input.email.as_deref())?;

    let now = Utc::now().naive_utc();
    let model = supplier::ActiveModel {
        kind: Set(kind),
        name: Set(name),
        tax_id: Set(input.tax_id),
        contact_name: Set(input.contact_name),
        phone: Set(input.phone),
        email: Set(input.email),
        address: Set(input.address),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Updates the given fields of a supplier or trader.
pub async fn update_supplier(
    db: &DatabaseConnection,
    kind: SupplierKind,
    supplier_id: i64,
    update: SupplierUpdate,
) -> Result<supplier::Model> {
    let existing = get_supplier_by_id(db, kind, supplier_id)
        .await?
        .ok_or_else(|| Error::not_found(entity_name(kind), supplier_id))?;

    let name = update.name.map(|n| n.trim().to_string());
    if name.as_deref().is_some_and(str::is_empty) {
        return Err(Error::validation(format!(
            "{} name cannot be empty",
            entity_name(kind)
        )));
    }
    validate_email(update.email.as_deref())?;

    let mut active: supplier::ActiveModel = existing.into();
    if let Some(name) = name {
        active.name = Set(name);
    }
    if update.tax_id.is_some() {
        active.tax_id = Set(update.tax_id);
    }
    if update.contact_name.is_some() {
        active.contact_name = Set(update.contact_name);
    }
    if update.phone.is_some() {
        active.phone = Set(update.phone);
    }
    if update.email.is_some() {
        active.email = Set(update.email);
    }
    if update.address.is_some() {
        active.address = Set(update.address);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Soft-deletes a supplier or trader.
pub async fn delete_supplier(
    db: &DatabaseConnection,
    kind: SupplierKind,
    supplier_id: i64,
) -> Result<()> {
    let existing = get_supplier_by_id(db, kind, supplier_id)
        .await?
        .ok_or_else(|| Error::not_found(entity_name(kind), supplier_id))?;
    let mut active: supplier::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_supplier_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let empty = create_supplier(&db, SupplierKind::Supplier, NewSupplier::default()).await;
        assert!(matches!(empty.unwrap_err(), Error::Validation { .. }));

        let bad_email = create_supplier(
            &db,
            SupplierKind::Supplier,
            NewSupplier {
                name: "Siam Steel".to_string(),
                email: Some("not-an-email".to_string()),
                ..NewSupplier::default()
            },
        )
        .await;
        assert!(matches!(bad_email.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_kinds_are_separate_collections() -> Result<()> {
        let db = setup_test_db().await?;
        let vendor = create_test_supplier(&db, "Siam Steel", SupplierKind::Supplier).await?;
        create_test_supplier(&db, "Bangkok Plumbing", SupplierKind::Trader).await?;
        create_test_supplier(&db, "Apex Concrete", SupplierKind::Supplier).await?;

        let suppliers = list_suppliers(&db, SupplierKind::Supplier, None).await?;
        let names: Vec<&str> = suppliers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Apex Concrete", "Siam Steel"]);

        let traders = list_suppliers(&db, SupplierKind::Trader, None).await?;
        assert_eq!(traders.len(), 1);

        let as_trader = get_supplier_by_id(&db, SupplierKind::Trader, vendor.id).await?;
        assert!(as_trader.is_none());

        let delete_wrong_kind = delete_supplier(&db, SupplierKind::Trader, vendor.id).await;
        assert!(matches!(
            delete_wrong_kind.unwrap_err(),
            Error::NotFound { entity: "Trader", .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_supplier() -> Result<()> {
        let db = setup_test_db().await?;
        let vendor = create_test_supplier(&db, "Siam Steel", SupplierKind::Supplier).await?;

        let updated = update_supplier(
            &db,
            SupplierKind::Supplier,
            vendor.id,
            SupplierUpdate {
                phone: Some("02-555-0100".to_string()),
                ..SupplierUpdate::default()
            },
        )
        .await?;
        assert_eq!(updated.phone.as_deref(), Some("02-555-0100"));
        assert_eq!(updated.name, "Siam Steel");

        delete_supplier(&db, SupplierKind::Supplier, vendor.id).await?;
        assert!(list_suppliers(&db, SupplierKind::Supplier, None).await?.is_empty());

        Ok(())
    }
}
