//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::SubscriptionService;
use crate::interfaces::http::common::ErrorResponse;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::subscriptions;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        subscriptions::create_subscription,
        subscriptions::list_subscriptions,
        subscriptions::get_subscription,
        subscriptions::update_subscription,
        subscriptions::delete_subscription,
        subscriptions::calculate_cost,
    ),
    components(
        schemas(
            ErrorResponse,
            subscriptions::SubscriptionResponse,
            subscriptions::SubscriptionListResponse,
            subscriptions::CreateSubscriptionRequest,
            subscriptions::UpdateSubscriptionRequest,
            subscriptions::CostCalculationRequest,
            subscriptions::CostCalculationResponse,
        )
    ),
    tags(
        (name = "Subscriptions", description = "User subscription records and period cost aggregation"),
    ),
    info(
        title = "Subscription Service API",
        version = "1.0.0",
        description = "REST API for tracking users' online subscriptions and what they cost over time",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(service: Arc<SubscriptionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let subscription_routes = Router::new()
        .route(
            "/api/v1/subscriptions",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route(
            "/api/v1/subscriptions/cost-calculation",
            post(subscriptions::calculate_cost),
        )
        .route(
            "/api/v1/subscriptions/{id}",
            get(subscriptions::get_subscription)
                .put(subscriptions::update_subscription)
                .delete(subscriptions::delete_subscription),
        )
        .with_state(service);

    let swagger_routes = SwaggerUi::new("/docs").url("/api/swagger.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(subscription_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
}
