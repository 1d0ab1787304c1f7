use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::OffsetDateTime;

use crate::models::subscription::SubscriptionStatus;

/// Environment marker RevenueCat sends for live transactions. Anything else
/// (including an absent field) flags the record as sandbox.
pub const PRODUCTION_ENVIRONMENT: &str = "PRODUCTION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookEventType {
    InitialPurchase,
    Renewal,
    Cancellation,
    Uncancellation,
    NonRenewingPurchase,
    SubscriptionPaused,
    SubscriptionResumed,
    BillingIssue,
    ProductChange,
    Expiration,
    Transfer,
    #[serde(other)]
    Unknown,
}

impl WebhookEventType {
    /// Static, total mapping from event type to subscription status. There
    /// are no transition guards: a later event always overwrites whatever
    /// status an earlier one produced.
    pub fn subscription_status(self) -> SubscriptionStatus {
        match self {
            WebhookEventType::InitialPurchase
            | WebhookEventType::Renewal
            | WebhookEventType::Uncancellation
            | WebhookEventType::NonRenewingPurchase
            | WebhookEventType::SubscriptionResumed
            | WebhookEventType::ProductChange
            | WebhookEventType::Transfer => SubscriptionStatus::Active,
            WebhookEventType::Cancellation | WebhookEventType::SubscriptionPaused => {
                SubscriptionStatus::Canceled
            }
            WebhookEventType::BillingIssue => SubscriptionStatus::PastDue,
            WebhookEventType::Expiration => SubscriptionStatus::Expired,
            WebhookEventType::Unknown => SubscriptionStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WebhookEventType::InitialPurchase => "INITIAL_PURCHASE",
            WebhookEventType::Renewal => "RENEWAL",
            WebhookEventType::Cancellation => "CANCELLATION",
            WebhookEventType::Uncancellation => "UNCANCELLATION",
            WebhookEventType::NonRenewingPurchase => "NON_RENEWING_PURCHASE",
            WebhookEventType::SubscriptionPaused => "SUBSCRIPTION_PAUSED",
            WebhookEventType::SubscriptionResumed => "SUBSCRIPTION_RESUMED",
            WebhookEventType::BillingIssue => "BILLING_ISSUE",
            WebhookEventType::ProductChange => "PRODUCT_CHANGE",
            WebhookEventType::Expiration => "EXPIRATION",
            WebhookEventType::Transfer => "TRANSFER",
            WebhookEventType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    pub app_user_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub entitlement_ids: Vec<String>,
    #[serde(default)]
    pub expiration_at_ms: Option<i64>,
    #[serde(default)]
    pub original_transaction_id: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub period_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub api_version: Option<String>,
    pub event: WebhookEvent,
}

impl WebhookEvent {
    pub fn is_sandbox(&self) -> bool {
        self.environment.as_deref() != Some(PRODUCTION_ENVIRONMENT)
    }

    /// `expiration_at_ms` is milliseconds since epoch. Zero means unset.
    pub fn expiration_date(&self) -> Option<OffsetDateTime> {
        self.expiration_at_ms
            .filter(|ms| *ms != 0)
            .and_then(|ms| {
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
            })
    }

    /// Audit trail stored alongside the subscription; never consulted when
    /// deriving status.
    pub fn metadata(&self) -> Value {
        json!({
            "original_transaction_id": self.original_transaction_id,
            "store": self.store,
            "period_type": self.period_type,
            "last_event": self.event_type.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn status_mapping_covers_all_event_types() {
        use SubscriptionStatus::*;
        use WebhookEventType::*;

        let cases = [
            (InitialPurchase, Active),
            (Renewal, Active),
            (Cancellation, Canceled),
            (Uncancellation, Active),
            (NonRenewingPurchase, Active),
            (SubscriptionPaused, Canceled),
            (SubscriptionResumed, Active),
            (BillingIssue, PastDue),
            (ProductChange, Active),
            (Expiration, Expired),
            (Transfer, Active),
            (WebhookEventType::Unknown, SubscriptionStatus::Unknown),
        ];

        for (event_type, expected) in cases {
            assert_eq!(
                event_type.subscription_status(),
                expected,
                "wrong status for {event_type}"
            );
        }
    }

    #[test]
    fn unrecognized_event_type_deserializes_to_unknown() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "type": "SOME_FUTURE_EVENT",
            "app_user_id": "u1",
        }))
        .unwrap();

        assert_eq!(event.event_type, WebhookEventType::Unknown);
        assert_eq!(
            event.event_type.subscription_status(),
            SubscriptionStatus::Unknown
        );
    }

    #[test]
    fn wire_names_round_trip() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "type": "NON_RENEWING_PURCHASE",
            "app_user_id": "u1",
        }))
        .unwrap();
        assert_eq!(event.event_type, WebhookEventType::NonRenewingPurchase);
        assert_eq!(event.event_type.as_str(), "NON_RENEWING_PURCHASE");
    }

    #[test]
    fn sandbox_unless_environment_is_exactly_production() {
        let mut event: WebhookEvent = serde_json::from_value(json!({
            "type": "RENEWAL",
            "app_user_id": "u1",
        }))
        .unwrap();

        assert!(event.is_sandbox(), "absent environment is sandbox");

        event.environment = Some("SANDBOX".into());
        assert!(event.is_sandbox());

        event.environment = Some("production".into());
        assert!(event.is_sandbox(), "marker comparison is case sensitive");

        event.environment = Some("PRODUCTION".into());
        assert!(!event.is_sandbox());
    }

    #[test]
    fn expiration_milliseconds_convert_to_timestamp() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "type": "EXPIRATION",
            "app_user_id": "u1",
            "expiration_at_ms": 1_700_000_000_000i64,
        }))
        .unwrap();

        assert_eq!(
            event.expiration_date(),
            Some(datetime!(2023-11-14 22:13:20 UTC))
        );
    }

    #[test]
    fn zero_or_absent_expiration_is_none() {
        let mut event: WebhookEvent = serde_json::from_value(json!({
            "type": "EXPIRATION",
            "app_user_id": "u1",
        }))
        .unwrap();
        assert_eq!(event.expiration_date(), None);

        event.expiration_at_ms = Some(0);
        assert_eq!(event.expiration_date(), None);
    }

    #[test]
    fn metadata_captures_audit_fields() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "type": "RENEWAL",
            "app_user_id": "u1",
            "original_transaction_id": "txn_1",
            "store": "APP_STORE",
            "period_type": "NORMAL",
        }))
        .unwrap();

        let meta = event.metadata();
        assert_eq!(meta["original_transaction_id"], "txn_1");
        assert_eq!(meta["store"], "APP_STORE");
        assert_eq!(meta["period_type"], "NORMAL");
        assert_eq!(meta["last_event"], "RENEWAL");
    }
}
