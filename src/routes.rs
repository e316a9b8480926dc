use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{contract_document, dispatch_message, health_check};
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let root = state.config.system_config.service_root.trim_end_matches('/');
    let (dispatch_path, document_path) = if root.is_empty() {
        ("/".to_string(), "/:document".to_string())
    } else {
        (root.to_string(), format!("{}/:document", root))
    };

    Router::new()
        // Health check
        .route("/api/health", get(health_check))

        // SOAP messages and published contract
        .route(&dispatch_path, post(dispatch_message))
        .route(&document_path, get(contract_document).post(dispatch_message))
}

/// Full application with tracing and CORS layers applied
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
