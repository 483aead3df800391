use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use safeticket_core::error::fallback;
use safeticket_core::health::healthz;
use safeticket_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    ticket::{create_ticket, get_ticket, invalidate_ticket, my_tickets, retrieve_tickets},
    token::{check_token, create_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Identity token
        .route("/api/v1/auth/token", post(create_token).get(check_token))
        // Tickets
        .route("/api/v1/tickets", post(create_ticket))
        .route("/api/v1/tickets/identity", post(retrieve_tickets))
        .route("/api/v1/tickets/@me", get(my_tickets))
        .route(
            "/api/v1/tickets/{ticket_id}",
            get(get_ticket).delete(invalidate_ticket),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}
