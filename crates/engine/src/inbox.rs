//! Inbox query service — a recipient's own view of the notification store.
//!
//! Every operation is scoped to the caller's identity: listing never
//! exposes another user's rows, and mark-as-read enforces ownership in the
//! store (NotFound/Forbidden propagate unchanged).

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use herald_common::error::AppError;
use herald_common::types::Notification;

use crate::store::NotificationStore;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for listing a user's inbox.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboxQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of a user's inbox plus the total matching the filter.
#[derive(Debug, Serialize)]
pub struct InboxPage {
    pub items: Vec<Notification>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

pub struct InboxService;

impl InboxService {
    /// List the caller's notifications, unread first, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: i64,
        query: &InboxQuery,
    ) -> Result<InboxPage, AppError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let (items, total) =
            NotificationStore::list_for_user(pool, user_id, query.unread_only, page, limit)
                .await?;

        Ok(InboxPage {
            items,
            total,
            page,
            limit,
        })
    }

    /// Mark one of the caller's notifications as read.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: Uuid,
        requester_id: i64,
    ) -> Result<Notification, AppError> {
        NotificationStore::mark_read(pool, notification_id, requester_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_limit_defaults() {
        let query = InboxQuery::default();
        assert_eq!(query.page.unwrap_or(1).max(1), 1);
        assert_eq!(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            DEFAULT_PAGE_SIZE
        );
    }

    #[test]
    fn test_limit_clamped() {
        let query = InboxQuery {
            unread_only: false,
            page: Some(0),
            limit: Some(10_000),
        };
        assert_eq!(query.page.unwrap_or(1).max(1), 1);
        assert_eq!(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            MAX_PAGE_SIZE
        );
    }
}
