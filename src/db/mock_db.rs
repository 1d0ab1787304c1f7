#![allow(dead_code)]
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::subscription::{NewSubscription, Subscription, SubscriptionUpdate};

use super::profile_repository::ProfileRepository;
use super::subscription_repository::SubscriptionRepository;

/// In-memory stand-in for both repositories. Write counters let tests assert
/// that a rejected request never touched persistence.
pub struct MockDb {
    pub subscriptions: Mutex<HashMap<String, Subscription>>,
    pub profiles: Mutex<HashMap<String, Uuid>>,
    pub fail_subscription_reads: bool,
    pub fail_subscription_writes: bool,
    pub fail_profile_reads: bool,
    pub insert_calls: Mutex<usize>,
    pub update_calls: Mutex<usize>,
}

impl Default for MockDb {
    fn default() -> Self {
        Self {
            subscriptions: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            fail_subscription_reads: false,
            fail_subscription_writes: false,
            fail_profile_reads: false,
            insert_calls: Mutex::new(0),
            update_calls: Mutex::new(0),
        }
    }
}

impl MockDb {
    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.subscriptions.lock().unwrap().insert(
            subscription.revenuecat_customer_id.clone(),
            subscription,
        );
        self
    }

    pub fn with_profile(self, clerk_id: &str, profile_id: Uuid) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(clerk_id.to_string(), profile_id);
        self
    }

    pub fn write_count(&self) -> usize {
        *self.insert_calls.lock().unwrap() + *self.update_calls.lock().unwrap()
    }
}

#[async_trait]
impl SubscriptionRepository for MockDb {
    async fn find_by_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        if self.fail_subscription_reads {
            return Err(sqlx::Error::Protocol("Mock DB failure".into()));
        }
        Ok(self.subscriptions.lock().unwrap().get(customer_id).cloned())
    }

    async fn update_from_event(
        &self,
        id: Uuid,
        update: &SubscriptionUpdate,
    ) -> Result<(), sqlx::Error> {
        if self.fail_subscription_writes {
            return Err(sqlx::Error::Protocol("Mock DB failure".into()));
        }
        *self.update_calls.lock().unwrap() += 1;

        let mut subscriptions = self.subscriptions.lock().unwrap();
        for subscription in subscriptions.values_mut() {
            if subscription.id == id {
                subscription.status = update.status;
                subscription.product_identifier = update.product_identifier.clone();
                subscription.entitlements = update.entitlements.clone();
                subscription.expiration_date = update.expiration_date;
                subscription.is_sandbox = update.is_sandbox;
                subscription.metadata = update.metadata.clone();
                return Ok(());
            }
        }
        Err(sqlx::Error::RowNotFound)
    }

    async fn insert(&self, new: &NewSubscription) -> Result<Subscription, sqlx::Error> {
        if self.fail_subscription_writes {
            return Err(sqlx::Error::Protocol("Mock DB failure".into()));
        }
        *self.insert_calls.lock().unwrap() += 1;

        let subscription = Subscription {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            revenuecat_customer_id: new.revenuecat_customer_id.clone(),
            status: new.status,
            product_identifier: new.product_identifier.clone(),
            entitlements: new.entitlements.clone(),
            original_purchase_date: Some(new.original_purchase_date),
            expiration_date: new.expiration_date,
            is_sandbox: new.is_sandbox,
            metadata: new.metadata.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.subscriptions.lock().unwrap().insert(
            subscription.revenuecat_customer_id.clone(),
            subscription.clone(),
        );
        Ok(subscription)
    }
}

#[async_trait]
impl ProfileRepository for MockDb {
    async fn find_profile_id_by_clerk_id(
        &self,
        clerk_id: &str,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        if self.fail_profile_reads {
            return Err(sqlx::Error::Protocol("Mock DB failure".into()));
        }
        Ok(self.profiles.lock().unwrap().get(clerk_id).copied())
    }
}
