use axum::extract::State;
use axum::http::StatusCode;

use safeticket_core::error::AppError;
use safeticket_core::health::readiness;

use crate::state::AppState;

/// `GET /readyz`: 200 when the database answers a ping, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    readiness(state.db.ping().await)
}
