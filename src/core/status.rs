//! Document status normalisation, display labels and lifecycle rules.
//!
//! Raw status strings arrive in several spellings (upper/lower case, English
//! or Thai labels). They are parsed into [`DocumentStatus`] at the edge and
//! only turned back into display text through [`label`].

use crate::entities::{DocumentStatus, DocumentType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display language for status labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Th,
}

/// Text and colour tag shown for a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLabel {
    pub code: String,
    pub text: String,
    pub color_class: String,
}

/// Colour tag for codes not in the table.
pub const NEUTRAL_COLOR_CLASS: &str = "badge-secondary";

/// `(code, english, thai, color_class)`
const STATUS_TABLE: [(&str, &str, &str, &str); 6] = [
    ("draft", "Draft", "ฉบับร่าง", "badge-light"),
    ("pending", "Pending Approval", "รออนุมัติ", "badge-warning"),
    ("submitted", "Submitted", "ส่งแล้ว", "badge-info"),
    ("approved", "Approved", "อนุมัติแล้ว", "badge-success"),
    ("rejected", "Rejected", "ไม่อนุมัติ", "badge-danger"),
    ("complete", "Complete", "เสร็จสิ้น", "badge-primary"),
];

impl DocumentStatus {
    /// Lowercase wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Complete => "complete",
        }
    }

    /// Parses any known spelling of a status. Returns `None` for unknown text.
    #[must_use]
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        let status = match normalized.as_str() {
            "draft" => Self::Draft,
            "pending" | "pending_approval" | "waiting" => Self::Pending,
            "submitted" | "submit" => Self::Submitted,
            "approved" | "approve" => Self::Approved,
            "rejected" | "reject" => Self::Rejected,
            "complete" | "completed" | "done" | "closed" => Self::Complete,
            _ => STATUS_TABLE
                .iter()
                .find(|(_, _, thai, _)| *thai == raw.trim())
                .and_then(|(code, _, _, _)| Self::parse_loose(code))?,
        };
        Some(status)
    }

    /// Draft and rejected documents may still be edited or deleted.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Waiting for an approver.
    #[must_use]
    pub const fn is_awaiting_approval(self) -> bool {
        matches!(self, Self::Pending | Self::Submitted)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Looks up the label for a raw status code. Unknown codes get the code itself
/// as text and the neutral colour.
#[must_use]
pub fn label(code: &str, locale: Locale) -> StatusLabel {
    let key = code.trim().to_lowercase();
    let row = DocumentStatus::parse_loose(&key)
        .and_then(|status| STATUS_TABLE.iter().find(|(c, ..)| *c == status.code()));

    match row {
        Some((code, en, th, color)) => StatusLabel {
            code: (*code).to_string(),
            text: match locale {
                Locale::En => (*en).to_string(),
                Locale::Th => (*th).to_string(),
            },
            color_class: (*color).to_string(),
        },
        None => StatusLabel {
            code: key,
            text: code.trim().to_string(),
            color_class: NEUTRAL_COLOR_CLASS.to_string(),
        },
    }
}

/// Label for a canonical status.
#[must_use]
pub fn status_label(status: DocumentStatus, locale: Locale) -> StatusLabel {
    label(status.code(), locale)
}

/// Every known status label in lifecycle order.
#[must_use]
pub fn all_labels(locale: Locale) -> Vec<StatusLabel> {
    STATUS_TABLE
        .iter()
        .map(|(code, ..)| label(code, locale))
        .collect()
}

/// A requested lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Submit,
    Approve,
    Reject,
    Reopen,
    Complete,
}

impl StatusAction {
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Reopen => "reopen",
            Self::Complete => "complete",
        }
    }
}

impl DocumentType {
    /// Status a submitted document waits in: requisitions and orders go to
    /// `pending`, work requests and work orders to `submitted`.
    #[must_use]
    pub const fn awaiting_status(self) -> DocumentStatus {
        match self {
            Self::PurchaseRequisition | Self::PurchaseOrder => DocumentStatus::Pending,
            Self::WorkRequest | Self::WorkOrder => DocumentStatus::Submitted,
        }
    }
}

/// Target status of `action` from `current`, or `None` when the transition is
/// not allowed.
#[must_use]
pub fn next_status(
    doc_type: DocumentType,
    current: DocumentStatus,
    action: StatusAction,
) -> Option<DocumentStatus> {
    match (action, current) {
        (StatusAction::Submit, DocumentStatus::Draft) => Some(doc_type.awaiting_status()),
        (StatusAction::Approve, s) if s.is_awaiting_approval() => Some(DocumentStatus::Approved),
        (StatusAction::Reject, s) if s.is_awaiting_approval() => Some(DocumentStatus::Rejected),
        (StatusAction::Reopen, DocumentStatus::Rejected) => Some(DocumentStatus::Draft),
        (StatusAction::Complete, DocumentStatus::Approved) => Some(DocumentStatus::Complete),
        _ => None,
    }
}
