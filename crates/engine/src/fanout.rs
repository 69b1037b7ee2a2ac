//! Fan-out coordinator — the single entry point for sending a broadcast.
//!
//! Resolution and persistence form one blocking unit of work; delivery is
//! launched afterwards as detached per-recipient tasks whose outcome is
//! invisible to the caller. The reported `sent_count` depends only on what
//! was durably persisted.

use sqlx::PgPool;

use herald_common::error::AppError;
use herald_common::types::{BroadcastOutcome, PushPayload, RecipientSpec};
use herald_notifier::DeliveryDispatcher;

use crate::directory::UserDirectory;
use crate::resolver::RecipientResolver;
use crate::store::NotificationStore;

pub struct FanoutCoordinator;

impl FanoutCoordinator {
    /// Broadcast a message to every user the spec resolves to.
    ///
    /// Resolving to nobody is a normal zero-count outcome with no
    /// persistence and no delivery attempts. Once the batch commits, one
    /// dispatch task is fired per created row; their handles are dropped
    /// here, so a slow or failing push never holds up the response.
    pub async fn broadcast(
        pool: &PgPool,
        directory: &dyn UserDirectory,
        dispatcher: &DeliveryDispatcher,
        spec: &RecipientSpec,
        title: &str,
        body: &str,
    ) -> Result<BroadcastOutcome, AppError> {
        let recipients = RecipientResolver::resolve(spec, directory).await?;

        if recipients.is_empty() {
            tracing::info!("Broadcast resolved to no recipients");
            return Ok(BroadcastOutcome { sent_count: 0 });
        }

        let created = NotificationStore::create_batch(pool, &recipients, title, body).await?;

        for notification in &created {
            dispatcher.dispatch(
                notification.recipient_id,
                PushPayload {
                    title: notification.title.clone(),
                    body: notification.body.clone(),
                },
            );
        }

        tracing::info!(
            sent_count = created.len(),
            title = %title,
            "Broadcast fanned out"
        );

        Ok(BroadcastOutcome {
            sent_count: created.len(),
        })
    }
}
