pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Public routes (for the customer-facing site)
        .nest("/public", public_routes())

        // Back office
        .nest("/admin", admin_routes())

        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/cars", get(handlers::public::list_cars))
        .route("/cars/:slug", get(handlers::public::get_car))
        .route("/categories", get(handlers::public::list_categories))
        .route("/locations", get(handlers::public::list_locations))
        .route("/contact", post(handlers::public::contact))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(handlers::admin::stats))
        .route("/dashboard/revenue", get(handlers::admin::revenue))
        .route("/dashboard/recent-bookings", get(handlers::admin::recent_bookings))
        .route("/options", get(handlers::admin::enum_options))
        .nest("/cars", car_routes())
        .nest("/categories", category_routes())
        .nest("/locations", location_routes())
        .nest("/customers", customer_routes())
        .nest("/bookings", booking_routes())
        .nest("/payments", payment_routes())
}

fn car_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::cars::list).post(handlers::cars::create))
        .route(
            "/:id",
            get(handlers::cars::get)
                .put(handlers::cars::update)
                .delete(handlers::cars::delete),
        )
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::categories::list).post(handlers::categories::create))
        .route(
            "/:id",
            get(handlers::categories::get)
                .put(handlers::categories::update)
                .delete(handlers::categories::delete),
        )
}

fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::locations::list).post(handlers::locations::create))
        .route(
            "/:id",
            get(handlers::locations::get)
                .put(handlers::locations::update)
                .delete(handlers::locations::delete),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::customers::list).post(handlers::customers::create))
        .route(
            "/:id",
            get(handlers::customers::get)
                .put(handlers::customers::update)
                .delete(handlers::customers::delete),
        )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::bookings::list).post(handlers::bookings::create))
        .route(
            "/:id",
            get(handlers::bookings::get)
                .put(handlers::bookings::update)
                .delete(handlers::bookings::delete),
        )
        .route("/:id/status", put(handlers::bookings::update_status))
        .route("/:id/send-reminder", post(handlers::bookings::send_reminder))
        .route("/:id/payments", get(handlers::bookings::payments))
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::payments::list).post(handlers::payments::create))
        .route(
            "/:id",
            get(handlers::payments::get).delete(handlers::payments::delete),
        )
        .route("/:id/status", put(handlers::payments::update_status))
}
