//! Shared application state for the Axum API server.

use herald_common::config::AppConfig;
use herald_notifier::DeliveryDispatcher;
use sqlx::PgPool;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub dispatcher: DeliveryDispatcher,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(pool: PgPool, dispatcher: DeliveryDispatcher, config: AppConfig) -> Self {
        Self {
            pool,
            dispatcher,
            config,
        }
    }
}
