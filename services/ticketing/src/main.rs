use sea_orm::Database;
use tracing::info;

use safeticket_core::tracing::init_tracing;
use safeticket_ticketing::config::TicketingConfig;
use safeticket_ticketing::router::build_router;
use safeticket_ticketing::scheduler::ExpirySweeper;
use safeticket_ticketing::state::AppState;
use safeticket_ticketing::usecase::expiry::ExpireOverdueTicketsUseCase;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = TicketingConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        identity_salt: config.identity_salt,
        identity_token_ttl_secs: config.identity_token_ttl_secs,
        code_strategy: config.verification_code_strategy,
    };

    if config.expiry_sweep_enabled {
        let sweeper = ExpirySweeper {
            usecase: ExpireOverdueTicketsUseCase {
                tickets: state.ticket_repo(),
            },
            run_at: config.expiry_sweep_at,
        };
        tokio::spawn(sweeper.run());
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.ticketing_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("ticketing service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
