use opentelemetry_semantic_conventions::{attribute::OTEL_STATUS_CODE, trace::ERROR_TYPE};
use rocket::Request;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Span, error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// `{"detail": "..."}` body shared by error responses and the reset endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{} not found", entity))
    }

    /// Maps a failed write to `Conflict` when the store rejected it on a
    /// UNIQUE constraint, otherwise keeps it as a database error.
    pub fn from_write(error: sqlx::Error, conflict_message: &str) -> Self {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(conflict_message.to_string())
            }
            _ => AppError::Database(error),
        }
    }

    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        let error_kind = match self {
            AppError::Database(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Database error");
                "database_error"
            }
            AppError::NotFound(msg) => {
                warn!(message = %msg, context = %ctx, "Not found error");
                "not_found_error"
            }
            AppError::Conflict(msg) => {
                warn!(message = %msg, context = %ctx, "Conflict error");
                "conflict_error"
            }
            AppError::Storage(msg) => {
                error!(message = %msg, context = %ctx, "Storage error");
                "storage_error"
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal server error");
                "internal_error"
            }
        };

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record(ERROR_TYPE, tracing::field::display(error_kind));
            current_span.record("error.message", tracing::field::display(&message));

            match self {
                AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                    current_span.record(OTEL_STATUS_CODE, tracing::field::display("ERROR"));
                }
                _ => {}
            }
        }
    }

    pub fn status_code(&self) -> Status {
        match self {
            AppError::Database(_) => Status::InternalServerError,
            AppError::NotFound(_) => Status::NotFound,
            AppError::Conflict(_) => Status::BadRequest,
            AppError::Storage(_) => Status::InternalServerError,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    /// Message returned to the caller. Generic store failures are not echoed;
    /// storage failures from the reset path are.
    pub fn detail(&self) -> String {
        match self {
            AppError::Database(_) => "Database error".to_string(),
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Storage(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }

    pub fn to_response_with_log(&self, context: &str) -> Custom<Json<ErrorResponse>> {
        self.log_and_record(context);
        Custom(self.status_code(), Json(ErrorResponse::new(self.detail())))
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'static> {
        self.to_response_with_log(&format!("Request to {} {}", req.method(), req.uri()))
            .respond_to(req)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration error: {}", error))
    }
}

#[catch(404)]
pub fn not_found(req: &Request) -> Custom<Json<ErrorResponse>> {
    warn!(uri = %req.uri(), "No route matched request");
    Custom(Status::NotFound, Json(ErrorResponse::new("Not Found")))
}

#[catch(422)]
pub fn unprocessable_entity(req: &Request) -> Custom<Json<ErrorResponse>> {
    warn!(uri = %req.uri(), "Request body failed validation");
    Custom(
        Status::UnprocessableEntity,
        Json(ErrorResponse::new("Request body is missing required fields or has the wrong types")),
    )
}

#[catch(default)]
pub fn default_catcher(status: Status, req: &Request) -> Custom<Json<ErrorResponse>> {
    warn!(uri = %req.uri(), status = status.code, "Request failed");
    Custom(
        status,
        Json(ErrorResponse::new(
            status.reason().unwrap_or("Request failed").to_string(),
        )),
    )
}
