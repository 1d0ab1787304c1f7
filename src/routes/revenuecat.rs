use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::{extract::State, Json};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::revenuecat::{WebhookEvent, WebhookPayload};
use crate::models::subscription::{NewSubscription, SubscriptionUpdate};
use crate::responses::ApiError;
use crate::state::AppState;

// POST /api/webhooks/revenuecat
//
// Configure this URL in the RevenueCat dashboard. The optional shared secret
// is checked against the Authorization header; without a configured secret
// the endpoint is open.
pub async fn revenuecat_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(secret) = app_state.config.revenuecat_webhook_secret.as_deref() {
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|h| h == format!("Bearer {secret}"))
            .unwrap_or(false);
        if !authorized {
            warn!("invalid revenuecat webhook secret");
            return Err(ApiError::Unauthorized);
        }
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|_| ApiError::Validation("Invalid webhook payload".into()))?;
    let event = payload.event;

    info!(
        event_type = %event.event_type,
        app_user_id = %event.app_user_id,
        product_id = ?event.product_id,
        "processing revenuecat webhook"
    );

    apply_event(&app_state, &event).await?;

    info!(
        event_type = %event.event_type,
        app_user_id = %event.app_user_id,
        "revenuecat webhook processed"
    );
    Ok(Json(json!({ "success": true })))
}

/// One read, one write: look up the subscription by customer id, then either
/// overwrite the existing row or insert a fresh one. Last write wins; events
/// arriving out of order are applied as-is.
async fn apply_event(app_state: &AppState, event: &WebhookEvent) -> Result<(), ApiError> {
    let status = event.event_type.subscription_status();

    let existing = app_state
        .subscriptions
        .find_by_customer_id(&event.app_user_id)
        .await
        .map_err(|err| {
            error!(?err, app_user_id = %event.app_user_id, "failed to look up subscription");
            ApiError::Internal(err)
        })?;

    match existing {
        Some(subscription) => {
            let update = SubscriptionUpdate {
                status,
                product_identifier: event.product_id.clone(),
                entitlements: event.entitlement_ids.clone(),
                expiration_date: event.expiration_date(),
                is_sandbox: event.is_sandbox(),
                metadata: event.metadata(),
            };
            app_state
                .subscriptions
                .update_from_event(subscription.id, &update)
                .await
                .map_err(|err| {
                    error!(?err, subscription_id = %subscription.id, "failed to update subscription");
                    ApiError::Internal(err)
                })?;
        }
        None => {
            // RevenueCat is configured with the Clerk user id as its app user
            // id, so the profile lookup goes through clerk_id. A missing or
            // unreadable profile still creates the row, just unlinked.
            let user_id = resolve_user_id(app_state, &event.app_user_id).await;
            if user_id.is_none() {
                warn!(
                    app_user_id = %event.app_user_id,
                    "no profile matched webhook customer; creating unlinked subscription"
                );
            }

            let new = NewSubscription {
                user_id,
                revenuecat_customer_id: event.app_user_id.clone(),
                status,
                product_identifier: event.product_id.clone(),
                entitlements: event.entitlement_ids.clone(),
                original_purchase_date: OffsetDateTime::now_utc(),
                expiration_date: event.expiration_date(),
                is_sandbox: event.is_sandbox(),
                metadata: event.metadata(),
            };
            app_state.subscriptions.insert(&new).await.map_err(|err| {
                error!(?err, app_user_id = %event.app_user_id, "failed to create subscription");
                ApiError::Internal(err)
            })?;
        }
    }

    Ok(())
}

async fn resolve_user_id(app_state: &AppState, app_user_id: &str) -> Option<Uuid> {
    match app_state
        .profiles
        .find_profile_id_by_clerk_id(app_user_id)
        .await
    {
        Ok(opt) => opt,
        Err(err) => {
            warn!(?err, app_user_id, "profile lookup failed; leaving subscription unlinked");
            None
        }
    }
}
