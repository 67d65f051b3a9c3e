//! JSON REST API.
//!
//! Every collection is mounted under the configured base path (`/api` by
//! default); `/health` always lives at the root.

pub mod documents;
pub mod error;
pub mod master_data;
pub mod reports;

use crate::{
    config::AppConfig,
    entities::{DocumentType, SupplierKind},
};
use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let mut api = Router::new();
    for doc_type in DocumentType::ALL {
        api = api.nest(&format!("/{}", doc_type.slug()), documents::routes(doc_type));
    }

    let api = api
        .nest("/jobs", master_data::job_routes())
        .nest("/suppliers", master_data::supplier_routes(SupplierKind::Supplier))
        .nest("/traders", master_data::supplier_routes(SupplierKind::Trader))
        .nest("/employees", master_data::employee_routes())
        .route("/dashboard", get(reports::dashboard))
        .route("/status-labels", get(reports::status_labels))
        .route("/status-labels/:code", get(reports::status_label))
        .route("/schedule/duration", get(reports::duration))
        .route("/schedule/end-date", get(reports::end_date));

    let app = match state.config.api.normalized_base_path() {
        Some(base) => Router::new().nest(&base, api),
        None => api,
    };

    app.route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
