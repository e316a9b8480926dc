use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::dispatcher::PayloadRoot;
use crate::soap::{write_envelope, FaultCode, SoapFault, SOAP_CONTENT_TYPE};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid encoding: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Validation error")]
    Validation(Vec<String>),

    #[error("No endpoint mapping found for {0}")]
    NoEndpoint(PayloadRoot),

    #[error("{0}")]
    Translation(anyhow::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Xml(_) | ServiceError::Encoding(_) | ServiceError::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NoEndpoint(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) | ServiceError::Translation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The fault reported to the caller. Unmapped payload roots get none.
    pub fn fault(&self) -> Option<SoapFault> {
        match self {
            ServiceError::NoEndpoint(_) => None,
            ServiceError::Validation(violations) => {
                Some(SoapFault::client(self.to_string()).with_detail(violations.clone()))
            }
            ServiceError::Translation(_) => Some(SoapFault::server(self.to_string())),
            _ => Some(SoapFault::client(self.to_string())),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let Some(fault) = self.fault() else {
            warn!("{}", self);
            return status.into_response();
        };

        match fault.code {
            FaultCode::Client => warn!("Client fault: {}", self),
            FaultCode::Server => error!("Server fault: {}", self),
        }

        match write_envelope(&fault.to_element()) {
            Ok(body) => (status, [(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)], body).into_response(),
            Err(e) => {
                error!("Failed to serialize SOAP fault: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
