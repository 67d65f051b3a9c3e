//! Line item entity - one row of a document's item table.
//!
//! `total_price` is always `quantity * unit_price`, written by the calculator.
//! `item_no` runs 1..n within a document and is rewritten whenever the item
//! list changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "line_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning document
    pub document_id: i64,
    /// Position within the document, starting at 1
    pub item_no: i32,
    pub description: String,
    pub quantity: f64,
    /// Unit of measure (e.g. "pcs", "m", "lot")
    pub unit: String,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one document
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::Id"
    )]
    Document,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
