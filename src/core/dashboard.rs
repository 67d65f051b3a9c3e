//! Dashboard aggregation.
//!
//! Builds the summary shown on the reporting page: per-type document counts
//! and amounts, committed spend per job, and the most recently touched
//! documents. Sections are computed independently; a section that fails is
//! logged and listed in `failed_sections` while the rest are still returned.

use crate::{
    entities::{Document, DocumentStatus, DocumentType, Job, document, job},
    errors::Result,
};
use sea_orm::{DatabaseConnection, QueryOrder, QuerySelect, prelude::*};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Counts and amounts for one document type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSection {
    pub doc_type: DocumentType,
    pub total_count: u64,
    /// Status code → number of documents
    pub by_status: BTreeMap<String, u64>,
    pub total_amount: f64,
    /// Sum over approved and complete documents
    pub approved_amount: f64,
}

/// Committed spend against one job's budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSpend {
    pub job_id: i64,
    pub code: String,
    pub name: String,
    pub budget: f64,
    /// Approved/complete PO and WO totals
    pub committed: f64,
    pub remaining: f64,
    /// `committed / budget * 100`, 0 when there is no budget
    pub utilization_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub documents: Vec<DocumentSection>,
    pub job_spend: Vec<JobSpend>,
    pub recent_documents: Vec<document::Model>,
    /// Names of sections that could not be computed
    pub failed_sections: Vec<String>,
}

/// How much of the budget is committed, as a percentage.
///
/// - 0% = nothing committed
/// - 100% = budget fully committed
/// - above 100% = over budget
#[must_use]
pub fn calculate_utilization(committed: f64, budget: f64) -> f64 {
    if budget == 0.0 {
        return 0.0;
    }

    (committed / budget) * 100.0
}

const fn counts_as_committed(status: DocumentStatus) -> bool {
    matches!(status, DocumentStatus::Approved | DocumentStatus::Complete)
}

/// Aggregates one document type.
pub async fn document_section(
    db: &DatabaseConnection,
    doc_type: DocumentType,
) -> Result<DocumentSection> {
    let documents = Document::find()
        .filter(document::Column::DocType.eq(doc_type))
        .filter(document::Column::IsDeleted.eq(false))
        .all(db)
        .await?;

    let mut by_status = BTreeMap::new();
    let mut total_amount = 0.0;
    let mut approved_amount = 0.0;
    for doc in &documents {
        *by_status.entry(doc.status.code().to_string()).or_insert(0) += 1;
        total_amount += doc.total_amount;
        if counts_as_committed(doc.status) {
            approved_amount += doc.total_amount;
        }
    }

    Ok(DocumentSection {
        doc_type,
        total_count: u64::try_from(documents.len()).unwrap_or(u64::MAX),
        by_status,
        total_amount,
        approved_amount,
    })
}

/// Committed spend for every active job, ordered by job code.
pub async fn job_spend(db: &DatabaseConnection) -> Result<Vec<JobSpend>> {
    let jobs = Job::find()
        .filter(job::Column::IsDeleted.eq(false))
        .order_by_asc(job::Column::Code)
        .all(db)
        .await?;

    let orders = Document::find()
        .filter(
            document::Column::DocType
                .is_in([DocumentType::PurchaseOrder, DocumentType::WorkOrder]),
        )
        .filter(
            document::Column::Status.is_in([DocumentStatus::Approved, DocumentStatus::Complete]),
        )
        .filter(document::Column::IsDeleted.eq(false))
        .filter(document::Column::JobId.is_not_null())
        .all(db)
        .await?;

    let mut committed_by_job: BTreeMap<i64, f64> = BTreeMap::new();
    for order in &orders {
        if let Some(job_id) = order.job_id {
            *committed_by_job.entry(job_id).or_insert(0.0) += order.total_amount;
        }
    }

    Ok(jobs
        .into_iter()
        .map(|job| {
            let committed = committed_by_job.get(&job.id).copied().unwrap_or(0.0);
            JobSpend {
                job_id: job.id,
                code: job.code,
                name: job.name,
                budget: job.budget,
                committed,
                remaining: job.budget - committed,
                utilization_percent: calculate_utilization(committed, job.budget),
            }
        })
        .collect())
}

/// Most recently updated documents of any type.
pub async fn recent_documents(db: &DatabaseConnection, limit: u64) -> Result<Vec<document::Model>> {
    Document::find()
        .filter(document::Column::IsDeleted.eq(false))
        .order_by_desc(document::Column::UpdatedAt)
        .order_by_desc(document::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Builds the full dashboard, tolerating failed sections.
pub async fn dashboard_summary(db: &DatabaseConnection, recent_limit: u64) -> DashboardSummary {
    let mut failed_sections = Vec::new();

    let mut documents = Vec::with_capacity(DocumentType::ALL.len());
    for doc_type in DocumentType::ALL {
        match document_section(db, doc_type).await {
            Ok(section) => documents.push(section),
            Err(e) => {
                warn!("Dashboard section '{}' failed: {}", doc_type.slug(), e);
                failed_sections.push(doc_type.slug().to_string());
            }
        }
    }

    let job_spend = job_spend(db).await.unwrap_or_else(|e| {
        warn!("Dashboard section 'job_spend' failed: {}", e);
        failed_sections.push("job_spend".to_string());
        Vec::new()
    });

    let recent_documents = recent_documents(db, recent_limit)
        .await
        .unwrap_or_else(|e| {
            warn!("Dashboard section 'recent_documents' failed: {}", e);
            failed_sections.push("recent_documents".to_string());
            Vec::new()
        });

    DashboardSummary {
        documents,
        job_spend,
        recent_documents,
        failed_sections,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::settings::DocumentDefaults;
    use crate::core::document::{
        NewDocument, approve_document, create_document, submit_document,
    };
    use crate::test_utils::*;
    use sea_orm::{ConnectionTrait, Schema};

    #[test]
    fn test_calculate_utilization() {
        assert_eq!(calculate_utilization(0.0, 100.0), 0.0);
        assert_eq!(calculate_utilization(50.0, 100.0), 50.0);
        assert_eq!(calculate_utilization(150.0, 100.0), 150.0);
        assert_eq!(calculate_utilization(50.0, 0.0), 0.0);
    }

    #[tokio::test]
    async fn test_dashboard_summary_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let job = create_test_job(&db, "J-900").await?;
        let po = DocumentType::PurchaseOrder;

        let approved = create_document(
            &db,
            po,
            NewDocument {
                title: "Steel".to_string(),
                job_id: Some(job.id),
                vat_rate: Some(0.0),
                items: vec![test_item(4.0, 250.0)],
                ..NewDocument::default()
            },
            &DocumentDefaults::default(),
        )
        .await?;
        submit_document(&db, po, approved.document.id).await?;
        approve_document(&db, po, approved.document.id).await?;

        // A draft does not count towards committed spend
        create_test_document(&db, po).await?;
        create_test_document(&db, DocumentType::WorkRequest).await?;

        let summary = dashboard_summary(&db, 2).await;
        assert!(summary.failed_sections.is_empty());
        assert_eq!(summary.documents.len(), 4);

        let po_section = summary.documents.iter().find(|s| s.doc_type == po).unwrap();
        assert_eq!(po_section.total_count, 2);
        assert_eq!(po_section.by_status.get("approved"), Some(&1));
        assert_eq!(po_section.by_status.get("draft"), Some(&1));
        assert_eq!(po_section.approved_amount, 1000.0);

        assert_eq!(summary.job_spend.len(), 1);
        assert_eq!(summary.job_spend[0].committed, 1000.0);
        assert_eq!(summary.job_spend[0].remaining, 9000.0);
        assert_eq!(summary.job_spend[0].utilization_percent, 10.0);

        assert_eq!(summary.recent_documents.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_section_does_not_hide_others() -> Result<()> {
        // Only the document tables exist, so the job section fails
        let db = sea_orm::Database::connect("sqlite::memory:").await?;
        let builder = db.get_database_backend();
        let schema = Schema::new(builder);
        db.execute(builder.build(&schema.create_table_from_entity(Document)))
            .await?;

        let summary = dashboard_summary(&db, 5).await;
        assert_eq!(summary.failed_sections, vec!["job_spend".to_string()]);
        assert_eq!(summary.documents.len(), 4);
        assert!(summary.recent_documents.is_empty());

        Ok(())
    }
}
