//! Document business logic - PR, PO, WR and WO lifecycle.
//!
//! Creating or editing a document always reprices its line items and rewrites
//! every derived amount, so stored totals can never drift from the items and
//! rates they came from. Status changes go through [`transition_document`],
//! which only allows the steps defined in `core::status`.

use crate::{
    config::settings::DocumentDefaults,
    core::{
        calculator::{
            LineItemInput, PricedLine, Rates, calculate_document, sanitize_rate,
            totals_from_subtotal,
        },
        numbering,
        schedule::{LinkedSchedule, date_from_duration, end_date_for},
        status::{StatusAction, next_status},
    },
    entities::{
        Document, DocumentStatus, DocumentType, Employee, Job, LineItem, Supplier, SupplierKind,
        document, line_item,
    },
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    Condition, DatabaseTransaction, PaginatorTrait, QueryOrder, Set, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

impl DocumentType {
    /// All document types in workflow order.
    pub const ALL: [Self; 4] = [
        Self::PurchaseRequisition,
        Self::PurchaseOrder,
        Self::WorkRequest,
        Self::WorkOrder,
    ];

    /// Lowercase path segment (`pr`, `po`, `wr`, `wo`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::PurchaseRequisition => "pr",
            Self::PurchaseOrder => "po",
            Self::WorkRequest => "wr",
            Self::WorkOrder => "wo",
        }
    }

    /// Prefix of the running number.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::PurchaseRequisition => "PR",
            Self::PurchaseOrder => "PO",
            Self::WorkRequest => "WR",
            Self::WorkOrder => "WO",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PurchaseRequisition => "Purchase Requisition",
            Self::PurchaseOrder => "Purchase Order",
            Self::WorkRequest => "Work Request",
            Self::WorkOrder => "Work Order",
        }
    }

    /// Document type an approved document of this type converts into.
    #[must_use]
    pub const fn converts_to(self) -> Option<Self> {
        match self {
            Self::PurchaseRequisition => Some(Self::PurchaseOrder),
            Self::WorkRequest => Some(Self::WorkOrder),
            Self::PurchaseOrder | Self::WorkOrder => None,
        }
    }

    /// Kind of counterparty the `supplier_id` of this type must reference.
    #[must_use]
    pub const fn counterparty_kind(self) -> SupplierKind {
        match self {
            Self::PurchaseRequisition | Self::PurchaseOrder => SupplierKind::Supplier,
            Self::WorkRequest | Self::WorkOrder => SupplierKind::Trader,
        }
    }
}

/// Input for a new document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewDocument {
    pub title: String,
    pub job_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub requester_id: Option<i64>,
    /// Defaults to today
    pub request_date: Option<NaiveDate>,
    pub required_date: Option<NaiveDate>,
    /// Used to derive `required_date` when that is not given
    pub duration_days: Option<i64>,
    pub delivery_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub vat_rate: Option<f64>,
    pub service_tax_rate: Option<f64>,
    pub discount_rate: Option<f64>,
    pub notes: Option<String>,
    pub items: Vec<LineItemInput>,
}

/// Partial update of a draft or rejected document. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentUpdate {
    pub title: Option<String>,
    pub job_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub requester_id: Option<i64>,
    pub request_date: Option<NaiveDate>,
    pub required_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub delivery_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub vat_rate: Option<f64>,
    pub service_tax_rate: Option<f64>,
    pub discount_rate: Option<f64>,
    pub notes: Option<String>,
    /// Replaces the whole item list when present
    pub items: Option<Vec<LineItemInput>>,
}

/// A document header together with its ordered line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentWithItems {
    #[serde(flatten)]
    pub document: document::Model,
    pub items: Vec<line_item::Model>,
}

/// Filters for [`list_documents`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentQuery {
    pub status: Option<DocumentStatus>,
    pub job_id: Option<i64>,
    pub supplier_id: Option<i64>,
    /// Matches number or title
    pub search: Option<String>,
    /// 1-based
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl From<line_item::Model> for LineItemInput {
    fn from(item: line_item::Model) -> Self {
        Self {
            description: item.description,
            quantity: item.quantity,
            unit: item.unit,
            unit_price: item.unit_price,
        }
    }
}

fn rates_of(document: &document::Model) -> Rates {
    Rates {
        vat_rate: document.vat_rate,
        service_tax_rate: document.service_tax_rate,
        discount_rate: document.discount_rate,
    }
}

/// Resolves `(required_date, duration_days)` from the request date and
/// whichever of the two the caller supplied. An explicit date wins.
fn resolve_schedule(
    request_date: NaiveDate,
    required_date: Option<NaiveDate>,
    duration_days: Option<i64>,
) -> Result<(Option<NaiveDate>, Option<i64>)> {
    let mut schedule = LinkedSchedule::new(Some(request_date));
    if required_date.is_some() {
        schedule.set_end(required_date);
    } else if let Some(days) = duration_days {
        end_date_for(request_date, days)?;
        schedule.set_duration(Some(days));
    }
    Ok((schedule.end(), schedule.duration()))
}

fn invalid_transition(document: &document::Model, action: &'static str) -> Error {
    Error::InvalidTransition {
        doc_type: document.doc_type.label().to_string(),
        from: document.status.code().to_string(),
        action,
    }
}

async fn find_active<C>(db: &C, doc_type: DocumentType, id: i64) -> Result<document::Model>
where
    C: ConnectionTrait,
{
    Document::find_by_id(id)
        .one(db)
        .await?
        .filter(|d| d.doc_type == doc_type && !d.is_deleted)
        .ok_or_else(|| Error::not_found(doc_type.label(), id))
}

async fn items_for<C>(db: &C, document_id: i64) -> Result<Vec<line_item::Model>>
where
    C: ConnectionTrait,
{
    LineItem::find()
        .filter(line_item::Column::DocumentId.eq(document_id))
        .order_by_asc(line_item::Column::ItemNo)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn insert_lines<C>(
    db: &C,
    document_id: i64,
    lines: Vec<PricedLine>,
) -> Result<Vec<line_item::Model>>
where
    C: ConnectionTrait,
{
    let mut inserted = Vec::with_capacity(lines.len());
    for line in lines {
        let model = line_item::ActiveModel {
            document_id: Set(document_id),
            item_no: Set(line.item_no),
            description: Set(line.description),
            quantity: Set(line.quantity),
            unit: Set(line.unit),
            unit_price: Set(line.unit_price),
            total_price: Set(line.total_price),
            ..Default::default()
        };
        inserted.push(model.insert(db).await?);
    }
    Ok(inserted)
}

/// Checks that referenced job, counterparty and requester exist and are not
/// deleted, and that the counterparty has the right kind for `doc_type`.
async fn validate_references<C>(
    db: &C,
    doc_type: DocumentType,
    job_id: Option<i64>,
    supplier_id: Option<i64>,
    requester_id: Option<i64>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    if let Some(job_id) = job_id {
        Job::find_by_id(job_id)
            .one(db)
            .await?
            .filter(|job| !job.is_deleted)
            .ok_or_else(|| Error::not_found("Job", job_id))?;
    }

    if let Some(supplier_id) = supplier_id {
        let supplier = Supplier::find_by_id(supplier_id)
            .one(db)
            .await?
            .filter(|s| !s.is_deleted)
            .ok_or_else(|| Error::not_found("Supplier", supplier_id))?;
        let expected = doc_type.counterparty_kind();
        if supplier.kind != expected {
            return Err(Error::validation(format!(
                "{} requires a {expected:?} counterparty, '{}' is a {:?}",
                doc_type.label(),
                supplier.name,
                supplier.kind
            )));
        }
    }

    if let Some(requester_id) = requester_id {
        Employee::find_by_id(requester_id)
            .one(db)
            .await?
            .filter(|e| !e.is_deleted)
            .ok_or_else(|| Error::not_found("Employee", requester_id))?;
    }

    Ok(())
}

/// Inserts a header plus items inside `txn` with a freshly allocated number.
async fn insert_document(
    txn: &DatabaseTransaction,
    doc_type: DocumentType,
    input: NewDocument,
    defaults: &DocumentDefaults,
    source_document_id: Option<i64>,
) -> Result<DocumentWithItems> {
    let rates = Rates {
        vat_rate: sanitize_rate(input.vat_rate.unwrap_or(defaults.default_vat_rate)),
        service_tax_rate: sanitize_rate(input.service_tax_rate.unwrap_or(0.0)),
        discount_rate: sanitize_rate(input.discount_rate.unwrap_or(0.0)),
    };
    let (lines, totals) = calculate_document(doc_type, &input.items, rates);

    let request_date = input
        .request_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let (required_date, duration_days) =
        resolve_schedule(request_date, input.required_date, input.duration_days)?;
    let currency = input
        .currency
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| defaults.default_currency.clone());

    let number = numbering::next_document_number(txn, doc_type, request_date.year()).await?;
    let now = Utc::now().naive_utc();

    let document = document::ActiveModel {
        doc_type: Set(doc_type),
        number: Set(number),
        status: Set(DocumentStatus::Draft),
        title: Set(input.title.trim().to_string()),
        job_id: Set(input.job_id),
        supplier_id: Set(input.supplier_id),
        requester_id: Set(input.requester_id),
        source_document_id: Set(source_document_id),
        request_date: Set(request_date),
        required_date: Set(required_date),
        delivery_date: Set(input.delivery_date),
        duration_days: Set(duration_days),
        currency: Set(currency),
        vat_rate: Set(rates.vat_rate),
        service_tax_rate: Set(rates.service_tax_rate),
        discount_rate: Set(rates.discount_rate),
        subtotal: Set(totals.subtotal),
        discount_amount: Set(totals.discount_amount),
        vat_amount: Set(totals.vat_amount),
        service_tax_amount: Set(totals.service_tax_amount),
        total_amount: Set(totals.total_amount),
        notes: Set(input.notes),
        rejection_reason: Set(None),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let items = insert_lines(txn, document.id, lines).await?;
    Ok(DocumentWithItems { document, items })
}

/// Creates a draft document, allocating its number and computing totals.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or whitespace-only
/// - A referenced job, supplier or employee does not exist
/// - The supplier is of the wrong kind for `doc_type`
/// - The database operation fails
pub async fn create_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    input: NewDocument,
    defaults: &DocumentDefaults,
) -> Result<DocumentWithItems> {
    if input.title.trim().is_empty() {
        return Err(Error::validation("Document title cannot be empty"));
    }
    validate_references(
        db,
        doc_type,
        input.job_id,
        input.supplier_id,
        input.requester_id,
    )
    .await?;

    let txn = db.begin().await?;
    let created = insert_document(&txn, doc_type, input, defaults, None).await?;
    txn.commit().await?;

    info!(
        number = %created.document.number,
        total = created.document.total_amount,
        "Created {}",
        doc_type.label()
    );
    Ok(created)
}

/// Retrieves a document and its items. Deleted documents and documents of a
/// different type are reported as not found.
pub async fn get_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
) -> Result<DocumentWithItems> {
    let document = find_active(db, doc_type, id).await?;
    let items = items_for(db, document.id).await?;
    Ok(DocumentWithItems { document, items })
}

/// Lists documents of one type, newest first.
pub async fn list_documents(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    query: &DocumentQuery,
    defaults: &DocumentDefaults,
) -> Result<Page<document::Model>> {
    let per_page = query
        .per_page
        .unwrap_or(defaults.default_page_size)
        .clamp(1, defaults.max_page_size.max(1));
    let page = query.page.unwrap_or(1).max(1);

    let mut select = Document::find()
        .filter(document::Column::DocType.eq(doc_type))
        .filter(document::Column::IsDeleted.eq(false));

    if let Some(status) = query.status {
        select = select.filter(document::Column::Status.eq(status));
    }
    if let Some(job_id) = query.job_id {
        select = select.filter(document::Column::JobId.eq(job_id));
    }
    if let Some(supplier_id) = query.supplier_id {
        select = select.filter(document::Column::SupplierId.eq(supplier_id));
    }
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(document::Column::Number.contains(search))
                .add(document::Column::Title.contains(search)),
        );
    }

    let paginator = select
        .order_by_desc(document::Column::Id)
        .paginate(db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        total,
        page,
        per_page,
        total_pages: total.div_ceil(per_page),
    })
}

/// Applies a partial update. Replacing items renumbers them; any change to
/// items or rates recomputes every derived amount.
///
/// # Errors
/// Returns [`Error::InvalidTransition`] unless the document is draft or rejected.
pub async fn update_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
    update: DocumentUpdate,
) -> Result<DocumentWithItems> {
    if update
        .title
        .as_deref()
        .is_some_and(|title| title.trim().is_empty())
    {
        return Err(Error::validation("Document title cannot be empty"));
    }

    let txn = db.begin().await?;
    let existing = find_active(&txn, doc_type, id).await?;
    if !existing.status.is_editable() {
        return Err(invalid_transition(&existing, "edit"));
    }
    if let (None, Some(days)) = (update.required_date, update.duration_days) {
        end_date_for(update.request_date.unwrap_or(existing.request_date), days)?;
    }
    validate_references(
        &txn,
        doc_type,
        update.job_id,
        update.supplier_id,
        update.requester_id,
    )
    .await?;

    let current = rates_of(&existing);
    let rates = Rates {
        vat_rate: sanitize_rate(update.vat_rate.unwrap_or(current.vat_rate)),
        service_tax_rate: sanitize_rate(
            update.service_tax_rate.unwrap_or(current.service_tax_rate),
        ),
        discount_rate: sanitize_rate(update.discount_rate.unwrap_or(current.discount_rate)),
    };

    let (items, totals) = if let Some(inputs) = update.items {
        LineItem::delete_many()
            .filter(line_item::Column::DocumentId.eq(id))
            .exec(&txn)
            .await?;
        let (lines, totals) = calculate_document(doc_type, &inputs, rates);
        (insert_lines(&txn, id, lines).await?, totals)
    } else {
        let items = items_for(&txn, id).await?;
        let subtotal = items.iter().map(|item| item.total_price).sum();
        let totals = totals_from_subtotal(subtotal, rates, doc_type.service_tax_mode());
        (items, totals)
    };

    let mut schedule = LinkedSchedule::new(Some(existing.request_date));
    schedule.set_end(existing.required_date);
    if update.required_date.is_some() {
        schedule.set_end(update.required_date);
    } else if update.duration_days.is_some() {
        schedule.set_duration(update.duration_days);
    }
    if let Some(request_date) = update.request_date {
        schedule.set_start(Some(request_date));
    }

    let mut active: document::ActiveModel = existing.into();
    if let Some(title) = update.title {
        active.title = Set(title.trim().to_string());
    }
    if update.job_id.is_some() {
        active.job_id = Set(update.job_id);
    }
    if update.supplier_id.is_some() {
        active.supplier_id = Set(update.supplier_id);
    }
    if update.requester_id.is_some() {
        active.requester_id = Set(update.requester_id);
    }
    if let Some(request_date) = schedule.start() {
        active.request_date = Set(request_date);
    }
    active.required_date = Set(schedule.end());
    active.duration_days = Set(schedule.duration());
    if update.delivery_date.is_some() {
        active.delivery_date = Set(update.delivery_date);
    }
    if let Some(currency) = update
        .currency
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
    {
        active.currency = Set(currency);
    }
    if update.notes.is_some() {
        active.notes = Set(update.notes);
    }
    active.vat_rate = Set(rates.vat_rate);
    active.service_tax_rate = Set(rates.service_tax_rate);
    active.discount_rate = Set(rates.discount_rate);
    active.subtotal = Set(totals.subtotal);
    active.discount_amount = Set(totals.discount_amount);
    active.vat_amount = Set(totals.vat_amount);
    active.service_tax_amount = Set(totals.service_tax_amount);
    active.total_amount = Set(totals.total_amount);
    active.updated_at = Set(Utc::now().naive_utc());

    let document = active.update(&txn).await?;
    txn.commit().await?;

    Ok(DocumentWithItems { document, items })
}

/// Soft-deletes a draft or rejected document.
pub async fn delete_document(db: &DatabaseConnection, doc_type: DocumentType, id: i64) -> Result<()> {
    let existing = find_active(db, doc_type, id).await?;
    if !existing.status.is_editable() {
        return Err(invalid_transition(&existing, "delete"));
    }

    let number = existing.number.clone();
    let mut active: document::ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;

    info!(number = %number, "Deleted {}", doc_type.label());
    Ok(())
}

/// Moves a document one step through its lifecycle. The status check and
/// the write share one transaction.
///
/// Submitting requires at least one line item; rejecting requires a
/// non-empty reason, which is stored on the document until it is reopened.
pub async fn transition_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
    action: StatusAction,
    reason: Option<String>,
) -> Result<document::Model> {
    let txn = db.begin().await?;
    let existing = find_active(&txn, doc_type, id).await?;
    let target = next_status(doc_type, existing.status, action)
        .ok_or_else(|| invalid_transition(&existing, action.verb()))?;

    if action == StatusAction::Submit && items_for(&txn, id).await?.is_empty() {
        return Err(Error::validation(format!(
            "{} {} has no line items",
            doc_type.label(),
            existing.number
        )));
    }

    let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
    if action == StatusAction::Reject && reason.is_none() {
        return Err(Error::validation("A rejection reason is required"));
    }

    let from = existing.status;
    let mut active: document::ActiveModel = existing.into();
    active.status = Set(target);
    match action {
        StatusAction::Reject => active.rejection_reason = Set(reason),
        StatusAction::Reopen => active.rejection_reason = Set(None),
        _ => {}
    }
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    info!(
        number = %updated.number,
        from = %from,
        to = %target,
        "{} {}",
        action.verb(),
        doc_type.label()
    );
    Ok(updated)
}

/// `draft` → awaiting approval.
pub async fn submit_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
) -> Result<document::Model> {
    transition_document(db, doc_type, id, StatusAction::Submit, None).await
}

/// Awaiting approval → `approved`.
pub async fn approve_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
) -> Result<document::Model> {
    transition_document(db, doc_type, id, StatusAction::Approve, None).await
}

/// Awaiting approval → `rejected`, recording the reason.
pub async fn reject_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
    reason: String,
) -> Result<document::Model> {
    transition_document(db, doc_type, id, StatusAction::Reject, Some(reason)).await
}

/// `rejected` → `draft`.
pub async fn reopen_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
) -> Result<document::Model> {
    transition_document(db, doc_type, id, StatusAction::Reopen, None).await
}

/// `approved` → `complete`.
pub async fn complete_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
) -> Result<document::Model> {
    transition_document(db, doc_type, id, StatusAction::Complete, None).await
}

fn copy_input(source: &document::Model, items: Vec<line_item::Model>) -> NewDocument {
    let today = Utc::now().date_naive();
    NewDocument {
        title: source.title.clone(),
        job_id: source.job_id,
        supplier_id: source.supplier_id,
        requester_id: source.requester_id,
        request_date: Some(today),
        required_date: source
            .duration_days
            .and_then(|days| date_from_duration(today, days)),
        duration_days: source.duration_days,
        delivery_date: None,
        currency: Some(source.currency.clone()),
        vat_rate: Some(source.vat_rate),
        service_tax_rate: Some(source.service_tax_rate),
        discount_rate: Some(source.discount_rate),
        notes: source.notes.clone(),
        items: items.into_iter().map(LineItemInput::from).collect(),
    }
}

/// Copies a document of any status into a new draft of the same type with a
/// fresh number, dated today. The schedule keeps its duration.
pub async fn duplicate_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
    defaults: &DocumentDefaults,
) -> Result<DocumentWithItems> {
    let txn = db.begin().await?;
    let source = find_active(&txn, doc_type, id).await?;
    let items = items_for(&txn, id).await?;
    let input = copy_input(&source, items);
    let created = insert_document(&txn, doc_type, input, defaults, None).await?;
    txn.commit().await?;

    info!(
        source = %source.number,
        number = %created.document.number,
        "Duplicated {}",
        doc_type.label()
    );
    Ok(created)
}

/// Derives a PO from an approved PR, or a WO from an approved WR.
///
/// The new draft references the source through `source_document_id` and the
/// source moves to `complete`. A source can only be converted once.
pub async fn convert_document(
    db: &DatabaseConnection,
    doc_type: DocumentType,
    id: i64,
    defaults: &DocumentDefaults,
) -> Result<DocumentWithItems> {
    let target_type = doc_type.converts_to().ok_or_else(|| {
        Error::validation(format!("{} cannot be converted", doc_type.label()))
    })?;

    let txn = db.begin().await?;
    let source = find_active(&txn, doc_type, id).await?;
    if source.status != DocumentStatus::Approved {
        return Err(invalid_transition(&source, "convert"));
    }

    let existing_conversion = Document::find()
        .filter(document::Column::SourceDocumentId.eq(id))
        .filter(document::Column::IsDeleted.eq(false))
        .one(&txn)
        .await?;
    if let Some(existing) = existing_conversion {
        return Err(Error::validation(format!(
            "{} was already converted to {}",
            source.number, existing.number
        )));
    }

    let items = items_for(&txn, id).await?;
    let mut input = copy_input(&source, items);
    input.required_date = source.required_date;
    input.duration_days = None;
    let created = insert_document(&txn, target_type, input, defaults, Some(source.id)).await?;

    let source_number = source.number.clone();
    let mut active: document::ActiveModel = source.into();
    active.status = Set(DocumentStatus::Complete);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&txn).await?;
    txn.commit().await?;

    info!(
        source = %source_number,
        number = %created.document.number,
        "Converted {} to {}",
        doc_type.label(),
        target_type.label()
    );
    Ok(created)
}
