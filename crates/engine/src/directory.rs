//! User directory lookups consumed by the recipient resolver.
//!
//! Account management belongs to the surrounding hostel platform; the
//! resolver only needs two read-only views of it, expressed as a trait so
//! tests can substitute an in-memory directory.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;

use herald_common::error::AppError;
use herald_common::types::Role;

/// Read-only view of the user base.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every known user id.
    async fn list_all_user_ids(&self) -> Result<HashSet<i64>, AppError>;

    /// Ids of users holding the given role.
    async fn list_user_ids_by_role(&self, role: Role) -> Result<HashSet<i64>, AppError>;
}

/// Production directory backed by the shared `users` table.
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn list_all_user_ids(&self) -> Result<HashSet<i64>, AppError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn list_user_ids_by_role(&self, role: Role) -> Result<HashSet<i64>, AppError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE role = $1")
            .bind(role)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
