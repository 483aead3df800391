use axum::http::StatusCode;

use crate::error::AppError;

/// `GET /healthz`: liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map the outcome of a dependency probe (database ping, ...) to a readiness
/// response. Services wrap this in their own `GET /readyz` handler.
pub fn readiness<E: std::fmt::Display>(probe: Result<(), E>) -> Result<StatusCode, AppError> {
    probe.map(|()| StatusCode::OK).map_err(|e| {
        tracing::warn!(error = %e, "readiness probe failed");
        AppError::Unavailable
    })
}
