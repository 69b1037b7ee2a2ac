//! Best-effort push delivery for persisted notifications.
//!
//! The dispatcher spawns one detached task per notification after the
//! fan-out transaction commits. A failed or slow delivery never blocks the
//! broadcast caller and never touches the persisted rows.

pub mod dispatcher;
pub mod error;
pub mod transport;

pub use dispatcher::DeliveryDispatcher;
pub use error::NotifierError;
pub use transport::{DeliveryTransport, LogOnlyTransport, PushGatewayTransport};
