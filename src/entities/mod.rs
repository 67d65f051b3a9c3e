//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod document;
pub mod employee;
pub mod job;
pub mod line_item;
pub mod supplier;
pub mod system_state;

// Re-export specific types to avoid conflicts
pub use document::{
    Column as DocumentColumn, DocumentStatus, DocumentType, Entity as Document,
    Model as DocumentModel,
};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use job::{Column as JobColumn, Entity as Job, Model as JobModel};
pub use line_item::{Column as LineItemColumn, Entity as LineItem, Model as LineItemModel};
pub use supplier::{
    Column as SupplierColumn, Entity as Supplier, Model as SupplierModel, SupplierKind,
};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
