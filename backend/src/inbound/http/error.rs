//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting handlers turn
//! failures into consistent JSON responses. Only `internal_error` bodies are
//! redacted; store and configuration messages reach the caller verbatim.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ConfigurationError
        | ErrorCode::BackendError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => error!(error = %self, "internal error"),
            ErrorCode::ConfigurationError | ErrorCode::BackendError => {
                warn!(code = ?self.code(), error = %self, "request failed");
            }
            _ => {}
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Map body deserialisation failures to `400 invalid_request`.
///
/// Registered through [`json_config`] so malformed JSON never reaches a
/// handler and always yields the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}"))
        .with_details(json!({ "code": "invalid_json" }))
        .into()
}

/// Map query string failures to `400 invalid_request`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}"))
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}

/// Map path segment failures to `400 invalid_request`.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path: {err}"))
        .with_details(json!({ "code": "invalid_path" }))
        .into()
}

/// JSON extractor configuration used by every API scope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor configuration used by every API scope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Path extractor configuration used by every API scope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
