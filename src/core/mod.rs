//! Core business logic - framework-agnostic document, master-data and
//! reporting operations. The HTTP layer in `api` is a thin wrapper over these.

/// Line item pricing and document totals
pub mod calculator;
/// Dashboard aggregation
pub mod dashboard;
/// PR/PO/WR/WO lifecycle
pub mod document;
/// Employee master data
pub mod employee;
/// Jobs/projects and their budgets
pub mod job;
/// Running document numbers
pub mod numbering;
/// Date/duration derivation
pub mod schedule;
/// Status normalisation, labels and transitions
pub mod status;
/// Suppliers and traders
pub mod supplier;
