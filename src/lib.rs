pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod handlers;
pub mod middleware;
pub mod payment;
pub mod services;
pub mod store;
pub mod validation;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::feed::OrderFeed;
use crate::services::{orders::OrderService, sessions::SessionService};
use crate::store::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub orders: OrderService,
    pub sessions: SessionService,
    pub feed: OrderFeed,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let feed = OrderFeed::new();
        let orders = OrderService::new(catalog.clone(), OrderStore::new(), feed.clone());
        let sessions = SessionService::new(&config.admin_username, &config.admin_password);

        Self {
            config: Arc::new(config),
            catalog,
            orders,
            sessions,
            feed,
            start_time: Instant::now(),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    // The feed authenticates via query token inside its own handler, so it
    // lives outside the bearer-token layer.
    let admin_routes = Router::new()
        .route("/admin/orders", get(handlers::admin::list_orders))
        .route("/admin/orders/:id/decision", post(handlers::admin::decide))
        .route("/admin/orders/:id/paid", post(handlers::admin::mark_paid))
        .route("/admin/logout", post(handlers::admin::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::admin_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/menu", get(handlers::menu::list_dishes))
        .route("/orders", post(handlers::orders::place_order))
        .route("/orders/:id", get(handlers::orders::get_order))
        .route("/orders/:id/status", get(handlers::orders::order_status))
        .route(
            "/orders/:id/payment",
            get(handlers::orders::payment_instructions),
        )
        .route("/admin/login", post(handlers::admin::login))
        .route("/admin/feed", get(handlers::ws::feed_handler))
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
