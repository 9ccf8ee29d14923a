//! Subscription service: input validation and orchestration of the store

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    validate_range, CostQuery, CostSummary, DomainError, DomainResult, MonthDate,
    NewSubscription, Period, Subscription, SubscriptionFilter, SubscriptionPatch,
    SubscriptionRepository, SERVICE_NAME_MAX_LEN,
};
use crate::shared::validations::{clamp_pagination, non_blank, validate_uuid};
use crate::shared::Page;

/// Raw input for creating a subscription
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Raw input for a partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionCommand {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub end_date: Option<String>,
}

impl UpdateSubscriptionCommand {
    fn is_empty(&self) -> bool {
        self.service_name.is_none() && self.price.is_none() && self.end_date.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListSubscriptionsQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct CostCalculationQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

/// Service for subscription operations
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_subscription(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> DomainResult<Subscription> {
        let user_id = validate_uuid(&cmd.user_id)?;
        let start_date = MonthDate::parse(&cmd.start_date)?;
        let end_date = match cmd.end_date.as_deref() {
            Some(raw) => {
                let end = MonthDate::parse(raw)?;
                validate_range(&start_date, &end)?;
                Some(end)
            }
            None => None,
        };
        let price = validate_price(cmd.price)?;
        let service_name = validate_service_name(&cmd.service_name)?;

        let created = self
            .repo
            .insert(NewSubscription {
                service_name,
                price,
                user_id,
                start_date,
                end_date,
            })
            .await?;

        info!(
            subscription_id = created.id,
            user_id = %created.user_id,
            service_name = %created.service_name,
            price = created.price,
            "subscription created"
        );
        Ok(created)
    }

    pub async fn get_subscription(&self, id: i32) -> DomainResult<Subscription> {
        validate_id(id)?;
        self.repo.find_by_id(id).await
    }

    /// List subscriptions matching the optional filters.
    ///
    /// Out-of-range limit and offset are clamped; the returned page echoes
    /// the values actually used and `total` counts every matching row.
    pub async fn list_subscriptions(
        &self,
        query: ListSubscriptionsQuery,
    ) -> DomainResult<Page<Subscription>> {
        let page = clamp_pagination(query.limit, query.offset);
        let filter = SubscriptionFilter {
            user_id: query.user_id.as_deref().map(validate_uuid).transpose()?,
            service_name: non_blank(query.service_name),
        };

        let items = self.repo.list(&filter, page).await?;
        let total = self.repo.count(&filter).await?;
        debug!(returned = items.len(), total, "subscriptions listed");

        Ok(Page::new(items, total, page))
    }

    pub async fn update_subscription(
        &self,
        id: i32,
        cmd: UpdateSubscriptionCommand,
    ) -> DomainResult<Subscription> {
        validate_id(id)?;
        if cmd.is_empty() {
            return Err(DomainError::InvalidData(
                "at least one field must be provided for update".into(),
            ));
        }

        let existing = self.repo.find_by_id(id).await?;

        let end_date = match cmd.end_date.as_deref() {
            Some(raw) => {
                let end = MonthDate::parse(raw)?;
                validate_range(&existing.start_date, &end)?;
                Some(end)
            }
            None => None,
        };
        let patch = SubscriptionPatch {
            service_name: cmd
                .service_name
                .as_deref()
                .map(validate_service_name)
                .transpose()?,
            price: cmd.price.map(validate_price).transpose()?,
            end_date,
        };

        let updated = self.repo.update(id, patch).await?;
        info!(subscription_id = id, "subscription updated");
        Ok(updated)
    }

    pub async fn delete_subscription(&self, id: i32) -> DomainResult<()> {
        validate_id(id)?;
        self.repo.delete(id).await?;
        info!(subscription_id = id, "subscription deleted");
        Ok(())
    }

    /// Sum the monthly prices of subscriptions active at any point in the
    /// requested period.
    pub async fn calculate_cost(&self, query: CostCalculationQuery) -> DomainResult<CostSummary> {
        let period = Period::parse(&query.start_date, &query.end_date)?;
        let user_id = query.user_id.as_deref().map(validate_uuid).transpose()?;
        let service_name = non_blank(query.service_name);

        let cost_query = CostQuery {
            filter: SubscriptionFilter {
                user_id,
                service_name: service_name.clone(),
            },
            period,
        };
        let total_cost = self.repo.sum_overlapping(&cost_query).await?;

        info!(
            total_cost,
            start_date = %period.start(),
            end_date = %period.end(),
            user_id = ?user_id,
            service_name = ?service_name,
            "subscription cost calculated"
        );

        Ok(CostSummary {
            total_cost,
            period,
            user_id,
            service_name,
        })
    }
}

fn validate_id(id: i32) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::InvalidData("invalid subscription ID".into()));
    }
    Ok(())
}

fn validate_price(price: i64) -> DomainResult<i32> {
    if price <= 0 {
        return Err(DomainError::InvalidPrice);
    }
    i32::try_from(price).map_err(|_| DomainError::InvalidPrice)
}

fn validate_service_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidData(
            "service_name must not be empty".into(),
        ));
    }
    if name.chars().count() > SERVICE_NAME_MAX_LEN {
        return Err(DomainError::InvalidData(format!(
            "service_name must be at most {} characters",
            SERVICE_NAME_MAX_LEN
        )));
    }
    Ok(name.to_string())
}
