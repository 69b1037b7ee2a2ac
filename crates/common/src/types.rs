use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles a hostel account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Warden,
    Admin,
}

impl Role {
    /// Parse a role token permissively (case-insensitive).
    ///
    /// Returns `None` for unrecognized tokens; callers decide whether that
    /// is an error or a no-op.
    pub fn from_token(token: &str) -> Option<Role> {
        match token.to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "warden" => Some(Role::Warden),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether this role may send broadcasts.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Warden | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Warden => write!(f, "warden"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Parsed form of a broadcast's role token.
///
/// The reserved `"all"` token addresses every known user; any defined role
/// addresses the users holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelector {
    All,
    Role(Role),
}

impl RoleSelector {
    /// Parse a role token into a selector. Unknown tokens yield `None`;
    /// the resolver ignores them rather than rejecting the broadcast.
    pub fn parse(token: &str) -> Option<RoleSelector> {
        if token.eq_ignore_ascii_case("all") {
            return Some(RoleSelector::All);
        }
        Role::from_token(token).map(RoleSelector::Role)
    }
}

/// One persisted notification row, owned by a single recipient.
///
/// Created only by the fan-out coordinator; the only mutation ever applied
/// is flipping `read` from false to true.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: i64,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Transient description of who should receive a broadcast.
///
/// `user_ids` holds raw tokens as they arrive on the wire (JSON numbers or
/// numeric strings); the resolver coerces them to canonical integer ids.
/// `role` is an optional role token, with `"all"` reserved for everyone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipientSpec {
    #[serde(default)]
    pub user_ids: Vec<serde_json::Value>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload handed to the delivery transport for one recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
}

/// Result of a broadcast: how many notification rows were persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastOutcome {
    pub sent_count: usize,
}
