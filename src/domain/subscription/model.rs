//! Subscription domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::month_date::{MonthDate, Period};

/// Maximum length of a service name, in characters.
pub const SERVICE_NAME_MAX_LEN: usize = 255;

/// Unicode case fold used for service-name matching in every store.
pub fn fold_service_name(name: &str) -> String {
    name.to_lowercase()
}

/// A recurring paid subscription owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: i32,
    pub service_name: String,
    /// Monthly price in the smallest currency unit
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthDate,
    /// `None` means the subscription is still active
    pub end_date: Option<MonthDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    pub fn is_active_during(&self, period: &Period) -> bool {
        period.overlaps(self.start_date, self.end_date)
    }

    /// Case-insensitive substring match on the service name.
    pub fn service_name_contains(&self, needle: &str) -> bool {
        fold_service_name(&self.service_name).contains(&fold_service_name(needle))
    }

    /// Apply the present fields of `patch` and stamp `updated_at`.
    pub fn apply(&mut self, patch: SubscriptionPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.service_name {
            self.service_name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        self.updated_at = now;
    }
}

/// Validated data for a subscription that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthDate,
    pub end_date: Option<MonthDate>,
}

/// Partial update. `None` leaves the field unchanged; start date and owner
/// cannot be patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub end_date: Option<MonthDate>,
}

impl SubscriptionPatch {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none() && self.price.is_none() && self.end_date.is_none()
    }
}

/// Filters shared by listing and cost aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    /// Case-insensitive substring of the service name
    pub service_name: Option<String>,
}

impl SubscriptionFilter {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        self.user_id.map_or(true, |id| subscription.user_id == id)
            && self
                .service_name
                .as_deref()
                .map_or(true, |name| subscription.service_name_contains(name))
    }
}

/// Sum the prices of every subscription matching `filter` that was active
/// at some point during `period`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostQuery {
    pub filter: SubscriptionFilter,
    pub period: Period,
}

impl CostQuery {
    pub fn matches(&self, subscription: &Subscription) -> bool {
        self.filter.matches(subscription) && subscription.is_active_during(&self.period)
    }
}

/// Total cost for a period, echoing the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub total_cost: i64,
    pub period: Period,
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(raw: &str) -> MonthDate {
        MonthDate::parse_with_max_year(raw, 2035).unwrap()
    }

    fn sample(name: &str, start: &str, end: Option<&str>) -> Subscription {
        let now = Utc::now();
        Subscription {
            id: 1,
            service_name: name.into(),
            price: 400,
            user_id: Uuid::nil(),
            start_date: md(start),
            end_date: end.map(md),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn service_name_match_ignores_case() {
        let s = sample("Yandex Plus", "01-2024", None);
        assert!(s.service_name_contains("yandex"));
        assert!(s.service_name_contains("PLUS"));
        assert!(!s.service_name_contains("netflix"));

        let cyrillic = sample("Яндекс Плюс", "01-2024", None);
        assert!(cyrillic.service_name_contains("яндекс"));
        assert!(cyrillic.service_name_contains("ПЛЮС"));
    }

    #[test]
    fn filter_by_user_and_name() {
        let s = sample("Netflix", "01-2024", None);
        let other = Uuid::new_v4();

        assert!(SubscriptionFilter::default().matches(&s));
        assert!(SubscriptionFilter {
            user_id: Some(Uuid::nil()),
            service_name: Some("flix".into()),
        }
        .matches(&s));
        assert!(!SubscriptionFilter {
            user_id: Some(other),
            service_name: None,
        }
        .matches(&s));
    }

    #[test]
    fn cost_query_requires_overlap() {
        let s = sample("Spotify", "03-2023", Some("06-2023"));
        let query = |start, end| CostQuery {
            filter: SubscriptionFilter::default(),
            period: Period::new(md(start), md(end)).unwrap(),
        };
        assert!(query("06-2023", "07-2023").matches(&s));
        assert!(!query("07-2023", "08-2023").matches(&s));
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut s = sample("Netflix", "01-2024", None);
        let later = s.updated_at + chrono::Duration::seconds(5);
        s.apply(
            SubscriptionPatch {
                price: Some(1299),
                ..Default::default()
            },
            later,
        );
        assert_eq!(s.price, 1299);
        assert_eq!(s.service_name, "Netflix");
        assert_eq!(s.end_date, None);
        assert_eq!(s.updated_at, later);
    }

    #[test]
    fn empty_patch_detection() {
        assert!(SubscriptionPatch::default().is_empty());
        assert!(!SubscriptionPatch {
            end_date: Some(md("02-2024")),
            ..Default::default()
        }
        .is_empty());
    }
}
