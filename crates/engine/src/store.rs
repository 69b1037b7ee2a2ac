//! Notification store — durable per-recipient rows with read/unread state.
//!
//! `create_batch` is the only writer of new rows and runs in a single
//! transaction: a batch is either fully persisted or not at all, so a
//! partial fan-out is never observable. The only mutation after creation
//! is the one-way read flag.

use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use herald_common::error::AppError;
use herald_common::types::Notification;

/// Service layer for notification persistence.
pub struct NotificationStore;

impl NotificationStore {
    /// Atomically insert one notification row per recipient.
    ///
    /// An empty recipient set is a no-op returning an empty vec. Any row
    /// failure rolls back the whole batch.
    pub async fn create_batch(
        pool: &PgPool,
        recipient_ids: &HashSet<i64>,
        title: &str,
        body: &str,
    ) -> Result<Vec<Notification>, AppError> {
        if recipient_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(recipient_ids.len());

        for recipient_id in recipient_ids {
            let notification: Notification = sqlx::query_as(
                r#"
                INSERT INTO notifications (id, recipient_id, title, body)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(recipient_id)
            .bind(title)
            .bind(body)
            .fetch_one(&mut *tx)
            .await?;

            created.push(notification);
        }

        tx.commit().await?;

        tracing::info!(count = created.len(), "Notification batch persisted");

        Ok(created)
    }

    /// Flip a notification's read flag to true on behalf of its owner.
    ///
    /// Fails with `NotFound` for an unknown id and `Forbidden` when the
    /// requester does not own the row. Idempotent: re-marking an already
    /// read notification succeeds and changes nothing.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: Uuid,
        requester_id: i64,
    ) -> Result<Notification, AppError> {
        let existing: Notification =
            sqlx::query_as("SELECT * FROM notifications WHERE id = $1")
                .bind(notification_id)
                .fetch_optional(pool)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Notification {} not found", notification_id))
                })?;

        if existing.recipient_id != requester_id {
            return Err(AppError::Forbidden(
                "Not authorized to mark this notification".to_string(),
            ));
        }

        let updated: Notification = sqlx::query_as(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(notification_id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    /// Page through one user's notifications, unread before read, newest
    /// first within each group. Returns the page plus the total count
    /// matching the filter, independent of the page window.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: i64,
        unread_only: bool,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Notification>, i64), AppError> {
        let offset = (page - 1) * limit;

        let items: Vec<Notification> = sqlx::query_as(
            r#"
            SELECT * FROM notifications
            WHERE recipient_id = $1
              AND ($2 = FALSE OR read = FALSE)
            ORDER BY read ASC, created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM notifications
            WHERE recipient_id = $1
              AND ($2 = FALSE OR read = FALSE)
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_one(pool)
        .await?;

        Ok((items, total))
    }
}
