//! Job entity - the project/cost unit documents are charged to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job (project) database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    /// Unique identifier for the job
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short code used on documents (e.g. "J-2026-014"), unique among active jobs
    pub code: String,
    /// Human-readable project name
    pub name: String,
    /// Customer the job is performed for
    pub customer: Option<String>,
    /// Approved budget for the job
    pub budget: f64,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Closed jobs stay visible but are flagged inactive
    pub is_active: bool,
    /// Soft delete flag - if true, job is hidden but data is preserved
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One job has many documents
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
