//! Subscription entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub service_name: String,

    /// Unicode-lowercased `service_name`, the column name filters match on
    pub service_name_lower: String,

    /// Monthly price in the smallest currency unit
    pub price: i32,

    /// Owner UUID in hyphenated lowercase form
    pub user_id: String,

    /// First day of the starting month
    pub start_date: Date,

    /// First day of the final month; NULL while the subscription is active
    #[sea_orm(nullable)]
    pub end_date: Option<Date>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
