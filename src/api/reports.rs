//! Dashboard, status labels and schedule helpers.

use super::AppState;
use crate::{
    core::{
        dashboard::{self, DashboardSummary},
        schedule::{compute_duration, date_from_duration},
        status::{self, Locale, StatusLabel},
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_RECENT_LIMIT: u64 = 10;
const MAX_RECENT_LIMIT: u64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardParams {
    pub recent: Option<u64>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Json<DashboardSummary> {
    let limit = params
        .recent
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);
    Json(dashboard::dashboard_summary(&state.db, limit).await)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocaleParams {
    pub locale: Locale,
}

pub async fn status_labels(Query(params): Query<LocaleParams>) -> Json<Vec<StatusLabel>> {
    Json(status::all_labels(params.locale))
}

/// Label for any raw code. Unknown codes come back as-is with the neutral colour.
pub async fn status_label(
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> Json<StatusLabel> {
    Json(status::label(&code, params.locale))
}

#[derive(Debug, Deserialize)]
pub struct DurationParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct EndDateParams {
    pub start: NaiveDate,
    pub days: i64,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
}

/// Days between two dates; negative when `end` is before `start`.
pub async fn duration(Query(params): Query<DurationParams>) -> Json<ScheduleResponse> {
    Json(ScheduleResponse {
        start: params.start,
        end: params.end,
        duration_days: compute_duration(params.start, params.end),
    })
}

pub async fn end_date(Query(params): Query<EndDateParams>) -> Result<Json<ScheduleResponse>> {
    let end = date_from_duration(params.start, params.days).ok_or_else(|| {
        Error::validation(format!(
            "{} days from {} is out of range",
            params.days, params.start
        ))
    })?;
    Ok(Json(ScheduleResponse {
        start: params.start,
        end,
        duration_days: params.days,
    }))
}
