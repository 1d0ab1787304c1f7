use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Internal user profile. `clerk_id` is the identity provider's stable
/// per-user id; RevenueCat is configured to use the same value as its app
/// user id, which is how webhook events are linked back to a profile.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub clerk_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
