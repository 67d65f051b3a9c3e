//! `/pr`, `/po`, `/wr` and `/wo` collections.
//!
//! The same handlers serve all four; [`routes`] attaches the document type as
//! a request extension.

use super::AppState;
use crate::{
    core::{
        calculator::{DocumentTotals, LineItemInput, PricedLine, Rates, ServiceTaxMode, calculate_document},
        document::{self, DocumentQuery, DocumentUpdate, DocumentWithItems, NewDocument, Page},
    },
    entities::{DocumentModel, DocumentStatus, DocumentType},
    errors::{Error, Result},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

/// Router for one document type, to be nested under its collection path.
pub fn routes(doc_type: DocumentType) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(list).post(create))
        .route("/calculate", post(calculate))
        .route("/:id", get(show).put(update).patch(update).delete(remove))
        .route("/:id/submit", post(submit))
        .route("/:id/approve", post(approve))
        .route("/:id/reject", post(reject))
        .route("/:id/reopen", post(reopen))
        .route("/:id/complete", post(complete))
        .route("/:id/duplicate", post(duplicate));

    let router = if doc_type.converts_to().is_some() {
        router.route("/:id/convert", post(convert))
    } else {
        router
    };

    router.layer(Extension(doc_type))
}

/// List query string. `status` accepts any spelling `DocumentStatus::parse_loose` knows.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub status: Option<String>,
    pub job_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub q: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl TryFrom<ListParams> for DocumentQuery {
    type Error = Error;

    fn try_from(params: ListParams) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|raw| {
                DocumentStatus::parse_loose(raw)
                    .ok_or_else(|| Error::validation(format!("Unknown status '{raw}'")))
            })
            .transpose()?;

        Ok(Self {
            status,
            job_id: params.job_id,
            supplier_id: params.supplier_id,
            search: params.q,
            page: params.page,
            per_page: params.per_page,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CalculateRequest {
    pub items: Vec<LineItemInput>,
    pub vat_rate: Option<f64>,
    pub service_tax_rate: Option<f64>,
    pub discount_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub items: Vec<PricedLine>,
    pub totals: DocumentTotals,
    pub service_tax_mode: ServiceTaxMode,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

async fn list(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<DocumentModel>>> {
    let query = DocumentQuery::try_from(params)?;
    let page =
        document::list_documents(&state.db, doc_type, &query, &state.config.documents).await?;
    Ok(Json(page))
}

async fn create(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Json(input): Json<NewDocument>,
) -> Result<(StatusCode, Json<DocumentWithItems>)> {
    let created =
        document::create_document(&state.db, doc_type, input, &state.config.documents).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Prices items and computes totals without storing anything.
async fn calculate(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Json(request): Json<CalculateRequest>,
) -> Json<CalculateResponse> {
    let rates = Rates {
        vat_rate: request
            .vat_rate
            .unwrap_or(state.config.documents.default_vat_rate),
        service_tax_rate: request.service_tax_rate.unwrap_or(0.0),
        discount_rate: request.discount_rate.unwrap_or(0.0),
    };
    let (items, totals) = calculate_document(doc_type, &request.items, rates);
    Json(CalculateResponse {
        items,
        totals,
        service_tax_mode: doc_type.service_tax_mode(),
    })
}

async fn show(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentWithItems>> {
    Ok(Json(document::get_document(&state.db, doc_type, id).await?))
}

async fn update(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
    Json(update): Json<DocumentUpdate>,
) -> Result<Json<DocumentWithItems>> {
    Ok(Json(
        document::update_document(&state.db, doc_type, id, update).await?,
    ))
}

async fn remove(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    document::delete_document(&state.db, doc_type, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentModel>> {
    Ok(Json(document::submit_document(&state.db, doc_type, id).await?))
}

async fn approve(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentModel>> {
    Ok(Json(document::approve_document(&state.db, doc_type, id).await?))
}

async fn reject(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<DocumentModel>> {
    Ok(Json(
        document::reject_document(&state.db, doc_type, id, request.reason).await?,
    ))
}

async fn reopen(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentModel>> {
    Ok(Json(document::reopen_document(&state.db, doc_type, id).await?))
}

async fn complete(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<Json<DocumentModel>> {
    Ok(Json(document::complete_document(&state.db, doc_type, id).await?))
}

async fn duplicate(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<DocumentWithItems>)> {
    let copy =
        document::duplicate_document(&state.db, doc_type, id, &state.config.documents).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

async fn convert(
    State(state): State<AppState>,
    Extension(doc_type): Extension<DocumentType>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<DocumentWithItems>)> {
    let converted =
        document::convert_document(&state.db, doc_type, id, &state.config.documents).await?;
    Ok((StatusCode::CREATED, Json(converted)))
}
