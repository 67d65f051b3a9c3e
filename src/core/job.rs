//! Job business logic - projects that documents are charged to.
//!
//! Job codes are unique among active jobs. Deleting a job is a soft delete;
//! documents keep pointing at it.

use crate::{
    entities::{Job, job},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewJob {
    pub code: String,
    pub name: String,
    pub customer: Option<String>,
    pub budget: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub customer: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

fn validate_budget(budget: f64) -> Result<()> {
    if budget < 0.0 || !budget.is_finite() {
        return Err(Error::InvalidAmount { amount: budget });
    }
    Ok(())
}

fn validate_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(Error::validation(format!(
                "Job end date {end} is before start date {start}"
            )));
        }
    }
    Ok(())
}

async fn ensure_code_free(db: &DatabaseConnection, code: &str, except: Option<i64>) -> Result<()> {
    let mut select = Job::find()
        .filter(job::Column::Code.eq(code))
        .filter(job::Column::IsDeleted.eq(false));
    if let Some(id) = except {
        select = select.filter(job::Column::Id.ne(id));
    }
    if select.one(db).await?.is_some() {
        return Err(Error::validation(format!("Job code '{code}' is already in use")));
    }
    Ok(())
}

/// Retrieves active (non-deleted) jobs ordered by code, optionally matching
/// `search` against code, name or customer.
pub async fn list_jobs(db: &DatabaseConnection, search: Option<&str>) -> Result<Vec<job::Model>> {
    let mut select = Job::find().filter(job::Column::IsDeleted.eq(false));
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(job::Column::Code.contains(term))
                .add(job::Column::Name.contains(term))
                .add(job::Column::Customer.contains(term)),
        );
    }
    select
        .order_by_asc(job::Column::Code)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a job by ID, returning None if not found or deleted.
pub async fn get_job_by_id(db: &DatabaseConnection, job_id: i64) -> Result<Option<job::Model>> {
    Ok(Job::find_by_id(job_id)
        .one(db)
        .await?
        .filter(|job| !job.is_deleted))
}

/// Creates a new active job.
///
/// # Errors
/// Returns an error if:
/// - The code or name is empty or whitespace-only
/// - The code is used by another active job
/// - The budget is negative or not finite
/// - The end date precedes the start date
pub async fn create_job(db: &DatabaseConnection, input: NewJob) -> Result<job::Model> {
    let code = input.code.trim().to_string();
    let name = input.name.trim().to_string();
    if code.is_empty() {
        return Err(Error::validation("Job code cannot be empty"));
    }
    if name.is_empty() {
        return Err(Error::validation("Job name cannot be empty"));
    }
    validate_budget(input.budget)?;
    validate_dates(input.start_date, input.end_date)?;
    ensure_code_free(db, &code, None).await?;

    let now = Utc::now().naive_utc();
    let job = job::ActiveModel {
        code: Set(code),
        name: Set(name),
        customer: Set(input.customer),
        budget: Set(input.budget),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        is_active: Set(true),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    job.insert(db).await.map_err(Into::into)
}

/// Updates the given fields of a job.
pub async fn update_job(db: &DatabaseConnection, job_id: i64, update: JobUpdate) -> Result<job::Model> {
    let existing = get_job_by_id(db, job_id)
        .await?
        .ok_or_else(|| Error::not_found("Job", job_id))?;

    let code = update.code.map(|c| c.trim().to_string());
    if let Some(code) = &code {
        if code.is_empty() {
            return Err(Error::validation("Job code cannot be empty"));
        }
        ensure_code_free(db, code, Some(job_id)).await?;
    }
    let name = update.name.map(|n| n.trim().to_string());
    if name.as_deref().is_some_and(str::is_empty) {
        return Err(Error::validation("Job name cannot be empty"));
    }
    if let Some(budget) = update.budget {
        validate_budget(budget)?;
    }
    validate_dates(
        update.start_date.or(existing.start_date),
        update.end_date.or(existing.end_date),
    )?;

    let mut active: job::ActiveModel = existing.into();
    if let Some(code) = code {
        active.code = Set(code);
    }
    if let Some(name) = name {
        active.name = Set(name);
    }
    if update.customer.is_some() {
        active.customer = Set(update.customer);
    }
    if let Some(budget) = update.budget {
        active.budget = Set(budget);
    }
    if update.start_date.is_some() {
        active.start_date = Set(update.start_date);
    }
    if update.end_date.is_some() {
        active.end_date = Set(update.end_date);
    }
    if let Some(is_active) = update.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Soft-deletes a job.
pub async fn delete_job(db: &DatabaseConnection, job_id: i64) -> Result<()> {
    let existing = get_job_by_id(db, job_id)
        .await?
        .ok_or_else(|| Error::not_found("Job", job_id))?;
    let mut active: job::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_job_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let empty_code = create_job(
            &db,
            NewJob {
                name: "Warehouse".to_string(),
                ..NewJob::default()
            },
        )
        .await;
        assert!(matches!(empty_code.unwrap_err(), Error::Validation { .. }));

        let negative_budget = create_job(
            &db,
            NewJob {
                code: "J-1".to_string(),
                name: "Warehouse".to_string(),
                budget: -5.0,
                ..NewJob::default()
            },
        )
        .await;
        assert!(matches!(
            negative_budget.unwrap_err(),
            Error::InvalidAmount { amount: -5.0 }
        ));

        let bad_dates = create_job(
            &db,
            NewJob {
                code: "J-1".to_string(),
                name: "Warehouse".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
                end_date: NaiveDate::from_ymd_opt(2026, 4, 1),
                ..NewJob::default()
            },
        )
        .await;
        assert!(matches!(bad_dates.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_job_codes_are_unique_among_active_jobs() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_job(&db, "J-100").await?;

        let duplicate = create_test_job(&db, "J-100").await;
        assert!(matches!(duplicate.unwrap_err(), Error::Validation { .. }));

        delete_job(&db, first.id).await?;
        let reused = create_test_job(&db, "J-100").await?;
        assert_ne!(reused.id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_list_jobs() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_job(&db, "J-002").await?;
        create_test_job(&db, "J-001").await?;

        let updated = update_job(
            &db,
            a.id,
            JobUpdate {
                name: Some("Riverside Condo".to_string()),
                budget: Some(2_500_000.0),
                is_active: Some(false),
                ..JobUpdate::default()
            },
        )
        .await?;
        assert_eq!(updated.name, "Riverside Condo");
        assert_eq!(updated.budget, 2_500_000.0);
        assert!(!updated.is_active);
        assert_eq!(updated.code, "J-002");

        let jobs = list_jobs(&db, None).await?;
        let codes: Vec<&str> = jobs.iter().map(|j| j.code.as_str()).collect();
        assert_eq!(codes, vec!["J-001", "J-002"]);

        let found = list_jobs(&db, Some("riverside")).await?;
        assert_eq!(found.len(), 1);

        let missing = update_job(&db, 999, JobUpdate::default()).await;
        assert!(matches!(missing.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }
}
