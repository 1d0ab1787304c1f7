use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::Type, Debug, Deserialize, Serialize, PartialEq, Eq, Copy, Clone)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")] // match the PostgreSQL type
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Expired,
    PastDue,
    Unknown,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row per billing customer. Rows are created on the first webhook event
/// for an unseen customer id and updated in place afterwards; expiration is a
/// status value, never a deletion.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub revenuecat_customer_id: String,
    pub status: SubscriptionStatus,
    pub product_identifier: Option<String>,
    pub entitlements: Vec<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub original_purchase_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expiration_date: Option<OffsetDateTime>,
    pub is_sandbox: bool,
    pub metadata: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub struct NewSubscription {
    pub user_id: Option<Uuid>,
    pub revenuecat_customer_id: String,
    pub status: SubscriptionStatus,
    pub product_identifier: Option<String>,
    pub entitlements: Vec<String>,
    pub original_purchase_date: OffsetDateTime,
    pub expiration_date: Option<OffsetDateTime>,
    pub is_sandbox: bool,
    pub metadata: Value,
}

/// Field set overwritten on every webhook event for an existing record.
pub struct SubscriptionUpdate {
    pub status: SubscriptionStatus,
    pub product_identifier: Option<String>,
    pub entitlements: Vec<String>,
    pub expiration_date: Option<OffsetDateTime>,
    pub is_sandbox: bool,
    pub metadata: Value,
}
