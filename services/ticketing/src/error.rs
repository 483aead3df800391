use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Ticketing service error variants.
///
/// Validation and business rejections (`InvalidWindow`, `ConflictInTime`, ...)
/// are ordinary values; only `Internal` carries an underlying cause, and that
/// cause is logged, never rendered.
#[derive(Debug, thiserror::Error)]
pub enum TicketingError {
    #[error("start must precede end")]
    InvalidWindow,
    #[error("identity must not be empty")]
    MissingIdentity,
    #[error("address fields must not be empty")]
    MissingAddress,
    #[error("invalid ticket id")]
    InvalidTicketId,
    #[error("malformed request body")]
    InvalidRequest,
    #[error("overlaps existing ticket")]
    ConflictInTime,
    #[error("ticket not found")]
    TicketNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl TicketingError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidWindow => "INVALID_WINDOW",
            Self::MissingIdentity => "MISSING_IDENTITY",
            Self::MissingAddress => "MISSING_ADDRESS",
            Self::InvalidTicketId => "INVALID_TICKET_ID",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::ConflictInTime => "CONFLICT_IN_TIME",
            Self::TicketNotFound => "TICKET_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

/// Body extraction failures render through the same envelope as every other
/// client error instead of axum's plaintext rejection.
impl From<JsonRejection> for TicketingError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self::InvalidRequest
    }
}

impl IntoResponse for TicketingError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidWindow
            | Self::MissingIdentity
            | Self::MissingAddress
            | Self::InvalidTicketId
            | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::ConflictInTime => StatusCode::CONFLICT,
            Self::TicketNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client outcomes and already visible in the TraceLayer span.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
