use async_trait::async_trait;
use uuid::Uuid;

use crate::models::subscription::{NewSubscription, Subscription, SubscriptionUpdate};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error>;
    async fn update_from_event(
        &self,
        id: Uuid,
        update: &SubscriptionUpdate,
    ) -> Result<(), sqlx::Error>;
    async fn insert(&self, subscription: &NewSubscription) -> Result<Subscription, sqlx::Error>;
}
