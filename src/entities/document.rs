//! Document entity - PR, PO, WR and WO share one table keyed by `doc_type`.
//!
//! Every derived amount (`subtotal` through `total_amount`) is written by
//! `core::document` from the line items and rates; nothing else sets them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The four procurement document kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DocumentType {
    /// Purchase Requisition
    #[sea_orm(string_value = "pr")]
    #[serde(rename = "pr")]
    PurchaseRequisition,
    /// Purchase Order
    #[sea_orm(string_value = "po")]
    #[serde(rename = "po")]
    PurchaseOrder,
    /// Work Request
    #[sea_orm(string_value = "wr")]
    #[serde(rename = "wr")]
    WorkRequest,
    /// Work Order
    #[sea_orm(string_value = "wo")]
    #[serde(rename = "wo")]
    WorkOrder,
}

/// Canonical document status. Raw strings are normalised in `core::status`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "complete")]
    Complete,
}

/// Document header model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub doc_type: DocumentType,
    /// Running number such as `PO-2026-0007`
    pub number: String,
    pub status: DocumentStatus,
    pub title: String,
    pub job_id: Option<i64>,
    pub supplier_id: Option<i64>,
    /// Employee who raised the document
    pub requester_id: Option<i64>,
    /// PR a PO was converted from, or WR a WO was converted from
    pub source_document_id: Option<i64>,
    pub request_date: Date,
    pub required_date: Option<Date>,
    pub delivery_date: Option<Date>,
    /// Days between `request_date` and `required_date`; unset when negative
    pub duration_days: Option<i64>,
    pub currency: String,
    pub vat_rate: f64,
    pub service_tax_rate: f64,
    pub discount_rate: f64,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub vat_amount: f64,
    pub service_tax_amount: f64,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One document has many line items
    #[sea_orm(has_many = "super::line_item::Entity")]
    LineItems,
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
