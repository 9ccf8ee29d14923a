//! Subscription REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CostCalculationRequest, CostCalculationResponse, CreateSubscriptionRequest,
    ListSubscriptionsParams, SubscriptionListResponse, SubscriptionResponse,
    UpdateSubscriptionRequest,
};
use crate::application::{ListSubscriptionsQuery, SubscriptionService};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ErrorResponse, ValidatedJson};

pub type SubscriptionState = Arc<SubscriptionService>;

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| DomainError::InvalidData("invalid subscription ID".into()).into())
}

/// Absent, empty or non-numeric values fall back to 0, which the service
/// clamps to the default window.
fn parse_page_param(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0)
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Created", body = SubscriptionResponse),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_subscription(
    State(service): State<SubscriptionState>,
    ValidatedJson(req): ValidatedJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let created = service.create_subscription(req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/{id}",
    tag = "Subscriptions",
    params(("id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Subscription details", body = SubscriptionResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_subscription(
    State(service): State<SubscriptionState>,
    Path(id): Path<String>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = service.get_subscription(parse_id(&id)?).await?;
    Ok(Json(subscription.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    tag = "Subscriptions",
    params(ListSubscriptionsParams),
    responses(
        (status = 200, description = "Subscription page", body = SubscriptionListResponse),
        (status = 400, description = "Invalid filter or pagination", body = ErrorResponse)
    )
)]
pub async fn list_subscriptions(
    State(service): State<SubscriptionState>,
    Query(params): Query<ListSubscriptionsParams>,
) -> Result<Json<SubscriptionListResponse>, ApiError> {
    let query = ListSubscriptionsQuery {
        limit: parse_page_param(params.limit.as_deref()),
        offset: parse_page_param(params.offset.as_deref()),
        user_id: params.user_id,
        service_name: params.service_name,
    };
    let page = service.list_subscriptions(query).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/subscriptions/{id}",
    tag = "Subscriptions",
    params(("id" = i32, Path, description = "Subscription ID")),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Updated", body = SubscriptionResponse),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_subscription(
    State(service): State<SubscriptionState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateSubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let updated = service
        .update_subscription(parse_id(&id)?, req.into())
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/{id}",
    tag = "Subscriptions",
    params(("id" = i32, Path, description = "Subscription ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_subscription(
    State(service): State<SubscriptionState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_subscription(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions/cost-calculation",
    tag = "Subscriptions",
    request_body = CostCalculationRequest,
    responses(
        (status = 200, description = "Total cost for the period", body = CostCalculationResponse),
        (status = 400, description = "Invalid dates or filters", body = ErrorResponse)
    )
)]
pub async fn calculate_cost(
    State(service): State<SubscriptionState>,
    ValidatedJson(req): ValidatedJson<CostCalculationRequest>,
) -> Result<Json<CostCalculationResponse>, ApiError> {
    let summary = service.calculate_cost(req.into()).await?;
    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::Service;

    use super::*;
    use crate::infrastructure::InMemorySubscriptionRepository;
    use crate::interfaces::http::create_api_router;

    const USER: &str = "60601fee-2bf1-4721-ae6f-7636e79a0cba";

    fn app() -> Router {
        let repo = Arc::new(InMemorySubscriptionRepository::new());
        create_api_router(Arc::new(SubscriptionService::new(repo)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&b).unwrap())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let mut svc = app.clone().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create(app: &Router, body: Value) -> Value {
        let (status, created) = send(app, "POST", "/api/v1/subscriptions", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        created
    }

    #[test]
    fn unparseable_page_params_fall_back() {
        assert_eq!(parse_page_param(None), 0);
        assert_eq!(parse_page_param(Some(" 25 ")), 25);
        assert_eq!(parse_page_param(Some("ten")), 0);
        assert_eq!(parse_page_param(Some("")), 0);
    }

    #[tokio::test]
    async fn create_and_fetch() {
        let app = app();
        let created = create(
            &app,
            json!({"service_name": "Yandex Plus", "price": 400, "user_id": USER, "start_date": "07-2025"}),
        )
        .await;

        assert_eq!(created["id"], 1);
        assert_eq!(created["start_date"], "07-2025");
        assert!(created.get("end_date").is_none());

        let (status, fetched) = send(&app, "GET", "/api/v1/subscriptions/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["service_name"], "Yandex Plus");
        assert_eq!(fetched["user_id"], USER);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/subscriptions",
            Some(json!({"service_name": "Netflix", "price": 0, "user_id": USER, "start_date": "01-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "price must be a positive integer");
        assert_eq!(body["success"], false);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/subscriptions",
            Some(json!({"service_name": "", "price": 10, "user_id": USER, "start_date": "01-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("service_name"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/subscriptions",
            Some(json!({"service_name": "Netflix", "price": 10, "user_id": USER, "start_date": "1-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn padded_name_is_trimmed_before_length_check() {
        let app = app();
        let name = format!("  {}  ", "n".repeat(255));
        let created = create(
            &app,
            json!({"service_name": name, "price": 10, "user_id": USER, "start_date": "01-2024"}),
        )
        .await;
        assert_eq!(created["service_name"].as_str().unwrap().len(), 255);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/subscriptions/1",
            Some(json!({"service_name": format!(" {} ", "m".repeat(255))})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/subscriptions",
            Some(json!({"service_name": "n".repeat(256), "price": 10, "user_id": USER, "start_date": "01-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let app = app();
        let req = Request::post("/api/v1/subscriptions")
            .header("content-type", "application/json")
            .body(Body::from("{"))
            .unwrap();
        let resp = app.into_service().call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_ids() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/subscriptions/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid data provided: invalid subscription ID");

        let (status, _) = send(&app, "GET", "/api/v1/subscriptions/0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/v1/subscriptions/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn list_with_filters_and_pagination() {
        let app = app();
        for name in ["Netflix", "Spotify", "Netflix Kids"] {
            create(
                &app,
                json!({"service_name": name, "price": 100, "user_id": USER, "start_date": "01-2024"}),
            )
            .await;
        }

        let (status, page) = send(
            &app,
            "GET",
            "/api/v1/subscriptions?service_name=netflix&limit=1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 2);
        assert_eq!(page["limit"], 1);
        assert_eq!(page["subscriptions"].as_array().unwrap().len(), 1);
        assert_eq!(page["subscriptions"][0]["service_name"], "Netflix Kids");

        let (_, page) = send(&app, "GET", "/api/v1/subscriptions?limit=500&offset=-3", None).await;
        assert_eq!(page["limit"], 100);
        assert_eq!(page["offset"], 0);

        let (status, page) =
            send(&app, "GET", "/api/v1/subscriptions?limit=abc&offset=x", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["limit"], 10);
        assert_eq!(page["offset"], 0);
        assert_eq!(page["subscriptions"].as_array().unwrap().len(), 3);

        let (status, _) = send(&app, "GET", "/api/v1/subscriptions?user_id=nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_then_delete() {
        let app = app();
        create(
            &app,
            json!({"service_name": "Netflix", "price": 999, "user_id": USER, "start_date": "01-2024"}),
        )
        .await;

        let (status, body) = send(&app, "PUT", "/api/v1/subscriptions/1", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("at least one field"));

        let (status, updated) = send(
            &app,
            "PUT",
            "/api/v1/subscriptions/1",
            Some(json!({"end_date": "06-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["end_date"], "06-2024");
        assert_eq!(updated["price"], 999);

        let (status, _) = send(&app, "DELETE", "/api/v1/subscriptions/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", "/api/v1/subscriptions/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/subscriptions/1",
            Some(json!({"price": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cost_calculation_end_to_end() {
        let app = app();
        create(
            &app,
            json!({"service_name": "Netflix", "price": 999, "user_id": USER, "start_date": "01-2024"}),
        )
        .await;
        create(
            &app,
            json!({"service_name": "Spotify", "price": 300, "user_id": USER, "start_date": "03-2023", "end_date": "06-2023"}),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/subscriptions/cost-calculation",
            Some(json!({"user_id": USER, "start_date": "02-2024", "end_date": "03-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_cost"], 999);
        assert_eq!(body["start_date"], "02-2024");
        assert_eq!(body["user_id"], USER);
        assert!(body.get("service_name").is_none());

        let (_, body) = send(
            &app,
            "POST",
            "/api/v1/subscriptions/cost-calculation",
            Some(json!({"start_date": "01-2020", "end_date": "12-2020"})),
        )
        .await;
        assert_eq!(body["total_cost"], 0);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/subscriptions/cost-calculation",
            Some(json!({"start_date": "03-2024", "end_date": "02-2024"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid date range"));
    }

    #[tokio::test]
    async fn every_response_has_a_request_id() {
        let app = app();
        let req = Request::get("/api/v1/subscriptions/abc")
            .body(Body::empty())
            .unwrap();
        let resp = app.into_service().call(req).await.unwrap();
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app();
        let (status, doc) = send(&app, "GET", "/api/swagger.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/v1/subscriptions/cost-calculation"]["post"].is_object());
        assert!(doc["paths"]["/api/v1/subscriptions/{id}"]["delete"].is_object());
    }
}
