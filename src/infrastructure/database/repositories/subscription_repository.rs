//! SeaORM implementation of SubscriptionRepository
//!
//! Works against both SQLite and PostgreSQL. Service names are folded in
//! Rust and stored in `service_name_lower`; the filter is a plain
//! `LIKE '%needle%'` on that column so matching is identical on either
//! backend and agrees with the in-memory store.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::subscription::fold_service_name;
use crate::domain::{
    CostQuery, DomainError, DomainResult, MonthDate, NewSubscription, Subscription,
    SubscriptionFilter, SubscriptionPatch, SubscriptionRepository,
};
use crate::infrastructure::database::entities::subscription;
use crate::shared::PageRequest;

pub struct SeaOrmSubscriptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: subscription::Model) -> DomainResult<Subscription> {
    let user_id = Uuid::parse_str(&m.user_id).map_err(|e| {
        DomainError::Storage(format!(
            "subscription {} has a malformed user_id {:?}: {}",
            m.id, m.user_id, e
        ))
    })?;

    Ok(Subscription {
        id: m.id,
        service_name: m.service_name,
        price: m.price,
        user_id,
        start_date: MonthDate::from_date(m.start_date),
        end_date: m.end_date.map(MonthDate::from_date),
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

/// Folded `%needle%` with LIKE wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in fold_service_name(needle).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn filter_condition(filter: &SubscriptionFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(user_id) = filter.user_id {
        condition = condition.add(subscription::Column::UserId.eq(user_id.to_string()));
    }

    if let Some(name) = &filter.service_name {
        condition = condition.add(
            Expr::col(subscription::Column::ServiceNameLower)
                .like(LikeExpr::new(contains_pattern(name)).escape('\\')),
        );
    }

    condition
}

/// `start <= period.end AND (end IS NULL OR end >= period.start)`
fn overlap_condition(query: &CostQuery) -> Condition {
    Condition::all()
        .add(subscription::Column::StartDate.lte(query.period.end().first_day()))
        .add(
            Condition::any()
                .add(subscription::Column::EndDate.is_null())
                .add(subscription::Column::EndDate.gte(query.period.start().first_day())),
        )
}

fn map_update_err(id: i32, e: DbErr) -> DomainError {
    match e {
        DbErr::RecordNotUpdated => DomainError::subscription_not_found(id),
        other => other.into(),
    }
}

// ── SubscriptionRepository impl ─────────────────────────────────

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn insert(&self, s: NewSubscription) -> DomainResult<Subscription> {
        let now = Utc::now();
        let model = subscription::ActiveModel {
            service_name_lower: Set(fold_service_name(&s.service_name)),
            service_name: Set(s.service_name),
            price: Set(s.price),
            user_id: Set(s.user_id.to_string()),
            start_date: Set(s.start_date.first_day()),
            end_date: Set(s.end_date.map(|d| d.first_day())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        info!("Subscription saved: {} ({})", result.service_name, result.id);
        model_to_domain(result)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Subscription> {
        let model = subscription::Entity::find_by_id(id).one(&self.db).await?;
        match model {
            Some(m) => model_to_domain(m),
            None => Err(DomainError::subscription_not_found(id)),
        }
    }

    async fn list(
        &self,
        filter: &SubscriptionFilter,
        page: PageRequest,
    ) -> DomainResult<Vec<Subscription>> {
        let models = subscription::Entity::find()
            .filter(filter_condition(filter))
            .order_by_desc(subscription::Column::CreatedAt)
            .order_by_desc(subscription::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_domain).collect()
    }

    async fn count(&self, filter: &SubscriptionFilter) -> DomainResult<u64> {
        let total = subscription::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn update(&self, id: i32, patch: SubscriptionPatch) -> DomainResult<Subscription> {
        if patch.is_empty() {
            return Err(DomainError::InvalidData(
                "at least one field must be provided for update".into(),
            ));
        }
        debug!("Updating subscription: {}", id);

        let existing = subscription::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::subscription_not_found(id))?;

        let mut active: subscription::ActiveModel = existing.into();
        if let Some(name) = patch.service_name {
            active.service_name_lower = Set(fold_service_name(&name));
            active.service_name = Set(name);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(Some(end_date.first_day()));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(id, e))?;
        model_to_domain(updated)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = subscription::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::subscription_not_found(id));
        }
        info!("Subscription deleted: {}", id);
        Ok(())
    }

    async fn sum_overlapping(&self, query: &CostQuery) -> DomainResult<i64> {
        let total: Option<Option<i64>> = subscription::Entity::find()
            .select_only()
            .column_as(Expr::col(subscription::Column::Price).sum(), "total_cost")
            .filter(filter_condition(&query.filter))
            .filter(overlap_condition(query))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }
}
