//! Subscription DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{
    CostCalculationQuery, CreateSubscriptionCommand, UpdateSubscriptionCommand,
};
use crate::domain::{CostSummary, Subscription};
use crate::shared::Page;

/// A stored subscription
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    /// Monthly price in the smallest currency unit
    #[schema(example = 400)]
    pub price: i32,
    #[schema(example = "60601fee-2bf1-4721-ae6f-7636e79a0cba")]
    pub user_id: String,
    #[schema(example = "07-2025")]
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            service_name: s.service_name,
            price: s.price,
            user_id: s.user_id.to_string(),
            start_date: s.start_date.to_string(),
            end_date: s.end_date.map(|d| d.to_string()),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionListResponse {
    pub subscriptions: Vec<SubscriptionResponse>,
    /// Number of matching subscriptions across all pages
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

impl From<Page<Subscription>> for SubscriptionListResponse {
    fn from(page: Page<Subscription>) -> Self {
        Self {
            subscriptions: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, message = "service_name is required"))]
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    #[schema(example = 400)]
    pub price: i64,
    #[schema(example = "60601fee-2bf1-4721-ae6f-7636e79a0cba")]
    pub user_id: String,
    /// Month the subscription starts, `MM-YYYY`
    #[schema(example = "07-2025")]
    pub start_date: String,
    /// Last paid month, `MM-YYYY`; omit for an open-ended subscription
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

impl From<CreateSubscriptionRequest> for CreateSubscriptionCommand {
    fn from(req: CreateSubscriptionRequest) -> Self {
        Self {
            service_name: req.service_name,
            price: req.price,
            user_id: req.user_id,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Partial update; omitted fields keep their current value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubscriptionRequest {
    #[validate(length(min = 1, message = "service_name must not be empty"))]
    pub service_name: Option<String>,
    pub price: Option<i64>,
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

impl From<UpdateSubscriptionRequest> for UpdateSubscriptionCommand {
    fn from(req: UpdateSubscriptionRequest) -> Self {
        Self {
            service_name: req.service_name,
            price: req.price,
            end_date: req.end_date,
        }
    }
}

/// Query string for listing subscriptions
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSubscriptionsParams {
    /// Only subscriptions owned by this user
    pub user_id: Option<String>,
    /// Case-insensitive substring of the service name
    pub service_name: Option<String>,
    /// Page size, 1-100 (default 10)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Rows to skip (default 0)
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CostCalculationRequest {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    #[validate(length(min = 1, message = "start_date is required"))]
    #[schema(example = "01-2025")]
    pub start_date: String,
    #[validate(length(min = 1, message = "end_date is required"))]
    #[schema(example = "12-2025")]
    pub end_date: String,
}

impl From<CostCalculationRequest> for CostCalculationQuery {
    fn from(req: CostCalculationRequest) -> Self {
        Self {
            user_id: req.user_id,
            service_name: req.service_name,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CostCalculationResponse {
    /// Sum of monthly prices of every subscription active during the period
    #[schema(example = 1299)]
    pub total_cost: i64,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl From<CostSummary> for CostCalculationResponse {
    fn from(c: CostSummary) -> Self {
        Self {
            total_cost: c.total_cost,
            start_date: c.period.start().to_string(),
            end_date: c.period.end().to_string(),
            user_id: c.user_id.map(|u| u.to_string()),
            service_name: c.service_name,
        }
    }
}
