//! Request handlers for the contact API.

use crate::domain::TenantId;
use crate::error::ContactError;
use crate::models::{Contact, ContactPage};
use crate::server::AppState;
use crate::services::{CreateContactParams, ImportRecord, ImportReport, UpdateContactParams};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

/// Error shape returned by every route: an HTTP status plus a message body.
#[derive(Debug)]
pub(super) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        let status = match &err {
            ContactError::Validation(_)
            | ContactError::InvalidContact(_)
            | ContactError::UnreachableNumber { .. } => StatusCode::BAD_REQUEST,
            ContactError::NotFound(_) => StatusCode::NOT_FOUND,
            ContactError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Resolve the acting tenant from the `x-company-id` header.
///
/// Tenant-resolution middleware is out of scope for this service; the tenant
/// arrives as an explicit header and is threaded as an argument from here on.
pub(super) fn tenant_from_headers(headers: &HeaderMap) -> Result<TenantId, ApiError> {
    headers
        .get("x-company-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<TenantId>().ok())
        .ok_or_else(|| ApiError::bad_request("missing or invalid x-company-id header"))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListQuery {
    #[serde(default)]
    search_param: String,
    #[serde(default)]
    page_number: Option<usize>,
}

pub(super) async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<ContactPage>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let page = query.page_number.unwrap_or(1);
    let result = state.service.list(tenant, &query.search_param, page).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub(super) struct LookupBody {
    name: String,
    number: String,
}

pub(super) async fn lookup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LookupBody>,
) -> Result<Json<Contact>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let contact = state
        .service
        .lookup_by_name_and_number(tenant, &body.name, &body.number)
        .await?;
    Ok(Json(contact))
}

pub(super) async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<CreateContactParams>,
) -> Result<Json<Contact>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let contact = state.service.create(tenant, params).await?;
    Ok(Json(contact))
}

#[derive(Debug, Deserialize)]
pub(super) struct ImportBody {
    contacts: Vec<ImportRecord>,
}

pub(super) async fn bulk_import(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ImportBody>,
) -> Result<Json<ImportReport>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let report = state.service.bulk_import(tenant, body.contacts).await?;
    Ok(Json(report))
}

pub(super) async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let contact = state.service.show(tenant, &id).await?;
    Ok(Json(contact))
}

pub(super) async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(params): Json<UpdateContactParams>,
) -> Result<Json<Contact>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let contact = state.service.update(tenant, &id, params).await?;
    Ok(Json(contact))
}

pub(super) async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    state.service.delete(tenant, &id).await?;
    Ok(Json(json!({ "message": "Contact deleted" })))
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct SimpleListQuery {
    #[serde(default)]
    name: String,
}

pub(super) async fn simple_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SimpleListQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let tenant = tenant_from_headers(&headers)?;
    let contacts = state.service.simple_list(tenant, &query.name).await?;
    Ok(Json(contacts))
}
