//! In-memory subscription store

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    CostQuery, DomainError, DomainResult, NewSubscription, Subscription, SubscriptionFilter,
    SubscriptionPatch, SubscriptionRepository,
};
use crate::shared::PageRequest;

/// In-memory storage for development and testing
pub struct InMemorySubscriptionRepository {
    subscriptions: DashMap<i32, Subscription>,
    id_counter: AtomicI32,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self {
            subscriptions: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    fn matching(&self, filter: &SubscriptionFilter) -> Vec<Subscription> {
        self.subscriptions
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for InMemorySubscriptionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn insert(&self, s: NewSubscription) -> DomainResult<Subscription> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let subscription = Subscription {
            id,
            service_name: s.service_name,
            price: s.price,
            user_id: s.user_id,
            start_date: s.start_date,
            end_date: s.end_date,
            created_at: now,
            updated_at: now,
        };
        self.subscriptions.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Subscription> {
        self.subscriptions
            .get(&id)
            .map(|s| s.clone())
            .ok_or_else(|| DomainError::subscription_not_found(id))
    }

    async fn list(
        &self,
        filter: &SubscriptionFilter,
        page: PageRequest,
    ) -> DomainResult<Vec<Subscription>> {
        let mut rows = self.matching(filter);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(rows
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &SubscriptionFilter) -> DomainResult<u64> {
        Ok(self
            .subscriptions
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count() as u64)
    }

    async fn update(&self, id: i32, patch: SubscriptionPatch) -> DomainResult<Subscription> {
        if patch.is_empty() {
            return Err(DomainError::InvalidData(
                "at least one field must be provided for update".into(),
            ));
        }
        let mut entry = self
            .subscriptions
            .get_mut(&id)
            .ok_or_else(|| DomainError::subscription_not_found(id))?;
        entry.apply(patch, Utc::now());
        Ok(entry.clone())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.subscriptions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::subscription_not_found(id))
    }

    async fn sum_overlapping(&self, query: &CostQuery) -> DomainResult<i64> {
        Ok(self
            .subscriptions
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| i64::from(entry.value().price))
            .sum())
    }
}
