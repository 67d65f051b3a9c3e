//! Running document numbers (`PR-2026-0001`).
//!
//! One counter per document type and year lives in the `system_state` table
//! under `doc_seq:<type>:<year>`. Callers pass a database transaction so the
//! increment commits together with the document that uses the number.

use crate::{
    entities::{DocumentType, SystemState, system_state},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};

fn sequence_key(doc_type: DocumentType, year: i32) -> String {
    format!("doc_seq:{}:{year}", doc_type.slug())
}

/// Formats a document number from its parts.
#[must_use]
pub fn format_document_number(doc_type: DocumentType, year: i32, sequence: u32) -> String {
    format!("{}-{year}-{sequence:04}", doc_type.prefix())
}

/// Last sequence handed out for `doc_type` in `year`, 0 if none yet.
pub async fn current_sequence<C>(db: &C, doc_type: DocumentType, year: i32) -> Result<u32>
where
    C: ConnectionTrait,
{
    let state = SystemState::find()
        .filter(system_state::Column::Key.eq(sequence_key(doc_type, year)))
        .one(db)
        .await?;

    match state {
        Some(s) => s.value.parse().map_err(|e| Error::Config {
            message: format!("Corrupt document counter '{}': {e}", s.key),
        }),
        None => Ok(0),
    }
}

/// Increments the counter for `doc_type`/`year` and returns the new number.
pub async fn next_document_number<C>(db: &C, doc_type: DocumentType, year: i32) -> Result<String>
where
    C: ConnectionTrait,
{
    let key = sequence_key(doc_type, year);
    let now = Utc::now().naive_utc();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(key.as_str()))
        .one(db)
        .await?;

    let sequence = if let Some(state) = existing {
        let next = state
            .value
            .parse::<u32>()
            .map_err(|e| Error::Config {
                message: format!("Corrupt document counter '{key}': {e}"),
            })?
            + 1;
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(next.to_string());
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
        next
    } else {
        let new_state = system_state::ActiveModel {
            key: Set(key),
            value: Set("1".to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        new_state.insert(db).await?;
        1
    };

    Ok(format_document_number(doc_type, year, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;
    use sea_orm::TransactionTrait;

    #[test]
    fn test_format_document_number() {
        assert_eq!(
            format_document_number(DocumentType::PurchaseOrder, 2026, 7),
            "PO-2026-0007"
        );
        assert_eq!(
            format_document_number(DocumentType::WorkRequest, 2025, 12345),
            "WR-2025-12345"
        );
    }

    #[tokio::test]
    async fn test_counters_are_per_type_and_year() -> Result<()> {
        let db = setup_test_db().await?;

        let pr = DocumentType::PurchaseRequisition;
        assert_eq!(next_document_number(&db, pr, 2026).await?, "PR-2026-0001");
        assert_eq!(next_document_number(&db, pr, 2026).await?, "PR-2026-0002");
        assert_eq!(next_document_number(&db, pr, 2027).await?, "PR-2027-0001");
        assert_eq!(
            next_document_number(&db, DocumentType::WorkOrder, 2026).await?,
            "WO-2026-0001"
        );
        assert_eq!(current_sequence(&db, pr, 2026).await?, 2);
        assert_eq!(current_sequence(&db, pr, 2030).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_rolled_back_number_is_reused() -> Result<()> {
        let db = setup_test_db().await?;
        let po = DocumentType::PurchaseOrder;

        let txn = db.begin().await?;
        assert_eq!(next_document_number(&txn, po, 2026).await?, "PO-2026-0001");
        txn.rollback().await?;

        assert_eq!(next_document_number(&db, po, 2026).await?, "PO-2026-0001");
        Ok(())
    }
}
