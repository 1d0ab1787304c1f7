use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::subscription::{NewSubscription, Subscription, SubscriptionUpdate};

use super::subscription_repository::SubscriptionRepository;

pub struct PostgresSubscriptionRepository {
    pub pool: PgPool,
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id,
                   user_id,
                   revenuecat_customer_id,
                   status,
                   product_identifier,
                   entitlements,
                   original_purchase_date,
                   expiration_date,
                   is_sandbox,
                   metadata,
                   created_at
            FROM subscriptions
            WHERE revenuecat_customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_from_event(
        &self,
        id: Uuid,
        update: &SubscriptionUpdate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET status = $2,
                product_identifier = $3,
                entitlements = $4,
                expiration_date = $5,
                is_sandbox = $6,
                metadata = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.status)
        .bind(&update.product_identifier)
        .bind(&update.entitlements)
        .bind(update.expiration_date)
        .bind(update.is_sandbox)
        .bind(&update.metadata)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert(&self, subscription: &NewSubscription) -> Result<Subscription, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (
                user_id,
                revenuecat_customer_id,
                status,
                product_identifier,
                entitlements,
                original_purchase_date,
                expiration_date,
                is_sandbox,
                metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id,
                      user_id,
                      revenuecat_customer_id,
                      status,
                      product_identifier,
                      entitlements,
                      original_purchase_date,
                      expiration_date,
                      is_sandbox,
                      metadata,
                      created_at
            "#,
        )
        .bind(subscription.user_id)
        .bind(&subscription.revenuecat_customer_id)
        .bind(subscription.status)
        .bind(&subscription.product_identifier)
        .bind(&subscription.entitlements)
        .bind(subscription.original_purchase_date)
        .bind(subscription.expiration_date)
        .bind(subscription.is_sandbox)
        .bind(&subscription.metadata)
        .fetch_one(&self.pool)
        .await
    }
}
