// src/common/error.rs

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erros de domínio. Os handlers convertem para `ApiError` na borda HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", validation_summary(.0))]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Payout batch not found")]
    BatchNotFound,

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),

    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),

    // A mensagem do banco é exposta ao cliente (ferramenta interna de RH)
    #[error("{0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Email provider error: {0}")]
    MailerError(String),

    #[error("{0}")]
    InternalServerError(#[from] anyhow::Error),
}

fn validation_summary(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    fields.sort();
    format!("Validation failed ({})", fields.join("; "))
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidJson(_)
            | AppError::InvalidWalletAddress(_) => StatusCode::BAD_REQUEST,
            AppError::EmployeeNotFound | AppError::BatchNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_api_error(self) -> ApiError {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }
        ApiError {
            status,
            message: self.to_string(),
        }
    }
}

// Resposta de erro que vai para o cliente: {"success": false, "error": "..."}
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        err.to_api_error()
    }
}

// Usado pelo `WithRejection` nos corpos JSON
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidJson(rejection.body_text()).to_api_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}
