//! Jobs, suppliers, traders and employees.

use super::AppState;
use crate::{
    core::{
        employee::{self, EmployeeUpdate, NewEmployee},
        job::{self, JobUpdate, NewJob},
        supplier::{self, NewSupplier, SupplierUpdate},
    },
    entities::{EmployeeModel, JobModel, SupplierKind, SupplierModel},
    errors::{Error, Result},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

/// `?q=` free-text filter shared by the master-data lists.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route(
            "/:id",
            get(show_job)
                .put(update_job)
                .patch(update_job)
                .delete(delete_job),
        )
}

/// Suppliers and traders share storage; `kind` picks which one this router serves.
pub fn supplier_routes(kind: SupplierKind) -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(show_supplier)
                .put(update_supplier)
                .patch(update_supplier)
                .delete(delete_supplier),
        )
        .layer(Extension(kind))
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(show_employee)
                .put(update_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
}

const fn kind_name(kind: SupplierKind) -> &'static str {
    match kind {
        SupplierKind::Supplier => "Supplier",
        SupplierKind::Trader => "Trader",
    }
}

async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobModel>>> {
    Ok(Json(job::list_jobs(&state.db, params.q.as_deref()).await?))
}

async fn create_job(
    State(state): State<AppState>,
    Json(input): Json<NewJob>,
) -> Result<(StatusCode, Json<JobModel>)> {
    let created = job::create_job(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn show_job(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<JobModel>> {
    job::get_job_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("Job", id))
}

async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<JobModel>> {
    Ok(Json(job::update_job(&state.db, id, update).await?))
}

async fn delete_job(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    job::delete_job(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_suppliers(
    State(state): State<AppState>,
    Extension(kind): Extension<SupplierKind>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SupplierModel>>> {
    Ok(Json(
        supplier::list_suppliers(&state.db, kind, params.q.as_deref()).await?,
    ))
}

async fn create_supplier(
    State(state): State<AppState>,
    Extension(kind): Extension<SupplierKind>,
    Json(input): Json<NewSupplier>,
) -> Result<(StatusCode, Json<SupplierModel>)> {
    let created = supplier::create_supplier(&state.db, kind, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn show_supplier(
    State(state): State<AppState>,
    Extension(kind): Extension<SupplierKind>,
    Path(id): Path<i64>,
) -> Result<Json<SupplierModel>> {
    supplier::get_supplier_by_id(&state.db, kind, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found(kind_name(kind), id))
}

async fn update_supplier(
    State(state): State<AppState>,
    Extension(kind): Extension<SupplierKind>,
    Path(id): Path<i64>,
    Json(update): Json<SupplierUpdate>,
) -> Result<Json<SupplierModel>> {
    Ok(Json(
        supplier::update_supplier(&state.db, kind, id, update).await?,
    ))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Extension(kind): Extension<SupplierKind>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    supplier::delete_supplier(&state.db, kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<EmployeeModel>>> {
    Ok(Json(
        employee::list_employees(&state.db, params.q.as_deref()).await?,
    ))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<NewEmployee>,
) -> Result<(StatusCode, Json<EmployeeModel>)> {
    let created = employee::create_employee(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn show_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EmployeeModel>> {
    employee::get_employee_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found("Employee", id))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<EmployeeUpdate>,
) -> Result<Json<EmployeeModel>> {
    Ok(Json(employee::update_employee(&state.db, id, update).await?))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    employee::delete_employee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
