use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::contract::ContractDocument;
use crate::error::ServiceError;
use crate::soap::SOAP_CONTENT_TYPE;
use crate::state::AppState;

/// `scheme://host` the request was addressed to. The scheme is taken from
/// `X-Forwarded-Proto` when present.
fn request_origin(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    Some(format!("{}://{}", scheme, host))
}

fn xml_response(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)], body).into_response()
}

/// Entry point for every SOAP message posted under the service root
pub async fn dispatch_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let response = state.dispatcher.dispatch(&body).await?;
    Ok(xml_response(response))
}

/// Serve the schema or WSDL published under the service root
pub async fn contract_document(
    State(state): State<AppState>,
    Path(document): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServiceError> {
    let origin = request_origin(&headers);
    debug!("Contract document requested: {}", document);

    match state.contract.document(&document, origin.as_deref())? {
        Some(ContractDocument::Schema(body)) | Some(ContractDocument::Wsdl(body)) => {
            Ok(xml_response(body))
        }
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
