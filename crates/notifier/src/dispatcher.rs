//! Fire-and-forget dispatch of persisted notifications.

use std::sync::Arc;

use tokio::task::JoinHandle;

use herald_common::types::PushPayload;

use crate::transport::DeliveryTransport;

/// Spawns one detached delivery task per persisted notification.
///
/// Each task owns its own failure: a transport error is logged and
/// discarded, so one recipient's failed push cannot affect siblings or the
/// broadcast caller. There is no retry and no delivery-status bookkeeping.
#[derive(Clone)]
pub struct DeliveryDispatcher {
    transport: Arc<dyn DeliveryTransport>,
}

impl DeliveryDispatcher {
    pub fn new(transport: Arc<dyn DeliveryTransport>) -> Self {
        Self { transport }
    }

    /// Launch a delivery attempt for one recipient.
    ///
    /// Returns the task handle so tests can await completion; production
    /// callers drop it and the task runs to completion on its own.
    pub fn dispatch(&self, recipient_id: i64, payload: PushPayload) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            if let Err(e) = transport.send(recipient_id, &payload).await {
                tracing::warn!(
                    recipient_id,
                    title = %payload.title,
                    error = %e,
                    "Push delivery failed"
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::error::NotifierError;

    /// Records every attempt; fails for recipient ids listed in `fail_for`.
    struct RecordingTransport {
        attempts: Mutex<Vec<i64>>,
        fail_for: Vec<i64>,
    }

    impl RecordingTransport {
        fn new(fail_for: Vec<i64>) -> Self {
            Self {
                attempts: Mutex::new(Vec::new()),
                fail_for,
            }
        }
    }

    #[async_trait]
    impl DeliveryTransport for RecordingTransport {
        async fn send(
            &self,
            recipient_id: i64,
            _payload: &PushPayload,
        ) -> Result<(), NotifierError> {
            self.attempts.lock().unwrap().push(recipient_id);
            if self.fail_for.contains(&recipient_id) {
                return Err(NotifierError::Gateway(format!(
                    "simulated failure for {}",
                    recipient_id
                )));
            }
            Ok(())
        }
    }

    fn payload() -> PushPayload {
        PushPayload {
            title: "Mess menu updated".to_string(),
            body: "Check this week's menu".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_delivers_to_recipient() {
        let transport = Arc::new(RecordingTransport::new(vec![]));
        let dispatcher = DeliveryDispatcher::new(transport.clone());

        dispatcher.dispatch(7, payload()).await.unwrap();

        assert_eq!(*transport.attempts.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_siblings() {
        let transport = Arc::new(RecordingTransport::new(vec![2]));
        let dispatcher = DeliveryDispatcher::new(transport.clone());

        let handles: Vec<_> = [1, 2, 3]
            .into_iter()
            .map(|id| dispatcher.dispatch(id, payload()))
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let mut attempts = transport.attempts.lock().unwrap().clone();
        attempts.sort();
        assert_eq!(attempts, vec![1, 2, 3], "all recipients attempted");
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let transport = Arc::new(RecordingTransport::new(vec![5]));
        let dispatcher = DeliveryDispatcher::new(transport);

        // The task completes normally even though the transport errored.
        dispatcher.dispatch(5, payload()).await.unwrap();
    }
}
