//! Recipient resolution — turns a broadcast's recipient spec into a
//! deduplicated set of user ids.
//!
//! A spec carries explicit id tokens and/or a role token. Both sources feed
//! one set, so a user reachable through both contributes a single id. An
//! empty result is a normal outcome ("broadcast to nobody"), not an error.

use std::collections::HashSet;

use herald_common::error::AppError;
use herald_common::types::{RecipientSpec, RoleSelector};

use crate::directory::UserDirectory;

/// Pure resolution over the spec plus directory lookups; no side effects.
pub struct RecipientResolver;

impl RecipientResolver {
    /// Resolve a recipient spec to the set of user ids it addresses.
    ///
    /// Unrecognized role tokens contribute no recipients rather than
    /// failing the broadcast. This is deliberate: fan-out availability is
    /// favored over strict validation of the role field.
    pub async fn resolve(
        spec: &RecipientSpec,
        directory: &dyn UserDirectory,
    ) -> Result<HashSet<i64>, AppError> {
        let mut recipients: HashSet<i64> = HashSet::new();

        for token in &spec.user_ids {
            if let Some(id) = coerce_user_id(token) {
                recipients.insert(id);
            }
        }

        if let Some(token) = &spec.role {
            match RoleSelector::parse(token) {
                Some(RoleSelector::All) => {
                    recipients.extend(directory.list_all_user_ids().await?);
                }
                Some(RoleSelector::Role(role)) => {
                    recipients.extend(directory.list_user_ids_by_role(role).await?);
                }
                None => {
                    tracing::debug!(role = %token, "Ignoring unrecognized role token");
                }
            }
        }

        Ok(recipients)
    }
}

/// Coerce a raw wire token to a canonical integer user id.
///
/// Accepts JSON integers and numeric strings; everything else is dropped.
fn coerce_user_id(token: &serde_json::Value) -> Option<i64> {
    match token {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use herald_common::types::Role;

    /// In-memory directory with a fixed user base.
    struct StubDirectory {
        users: Vec<(i64, Role)>,
    }

    #[async_trait]
    impl UserDirectory for StubDirectory {
        async fn list_all_user_ids(&self) -> Result<HashSet<i64>, AppError> {
            Ok(self.users.iter().map(|(id, _)| *id).collect())
        }

        async fn list_user_ids_by_role(&self, role: Role) -> Result<HashSet<i64>, AppError> {
            Ok(self
                .users
                .iter()
                .filter(|(_, r)| *r == role)
                .map(|(id, _)| *id)
                .collect())
        }
    }

    fn directory() -> StubDirectory {
        StubDirectory {
            users: vec![
                (1, Role::Student),
                (2, Role::Student),
                (3, Role::Warden),
            ],
        }
    }

    fn spec(user_ids: Vec<serde_json::Value>, role: Option<&str>) -> RecipientSpec {
        RecipientSpec {
            user_ids,
            role: role.map(|r| r.to_string()),
        }
    }

    #[test]
    fn test_coerce_numeric_and_string_tokens() {
        assert_eq!(coerce_user_id(&json!(42)), Some(42));
        assert_eq!(coerce_user_id(&json!("42")), Some(42));
        assert_eq!(coerce_user_id(&json!(" 7 ")), Some(7));
        assert_eq!(coerce_user_id(&json!("abc")), None);
        assert_eq!(coerce_user_id(&json!(1.5)), None);
        assert_eq!(coerce_user_id(&json!(null)), None);
        assert_eq!(coerce_user_id(&json!({"id": 1})), None);
    }

    #[tokio::test]
    async fn test_explicit_ids_deduplicated() {
        let resolved = RecipientResolver::resolve(
            &spec(vec![json!(1), json!("1"), json!(2)], None),
            &directory(),
        )
        .await
        .unwrap();

        assert_eq!(resolved, HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn test_all_token_addresses_everyone() {
        let resolved = RecipientResolver::resolve(&spec(vec![], Some("ALL")), &directory())
            .await
            .unwrap();

        assert_eq!(resolved, HashSet::from([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_role_token_filters_by_role() {
        let resolved = RecipientResolver::resolve(&spec(vec![], Some("student")), &directory())
            .await
            .unwrap();

        assert_eq!(resolved, HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn test_overlap_yields_union_not_sum() {
        // Explicit id 1 also matches the student role.
        let resolved = RecipientResolver::resolve(
            &spec(vec![json!(1)], Some("student")),
            &directory(),
        )
        .await
        .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved, HashSet::from([1, 2]));
    }

    #[tokio::test]
    async fn test_unknown_role_token_ignored_silently() {
        // Documented permissive behavior: an unrecognized role contributes
        // no recipients and does not fail the resolution.
        let resolved = RecipientResolver::resolve(
            &spec(vec![json!(3)], Some("janitor")),
            &directory(),
        )
        .await
        .unwrap();

        assert_eq!(resolved, HashSet::from([3]));
    }

    #[tokio::test]
    async fn test_empty_spec_resolves_to_nobody() {
        let resolved = RecipientResolver::resolve(&RecipientSpec::default(), &directory())
            .await
            .unwrap();

        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_tokens_dropped() {
        let resolved = RecipientResolver::resolve(
            &spec(vec![json!("abc"), json!(true), json!(2)], None),
            &directory(),
        )
        .await
        .unwrap();

        assert_eq!(resolved, HashSet::from([2]));
    }
}
