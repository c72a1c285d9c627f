use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::{Notification, Notifier};

/// Handle for submitting notifications without waiting on delivery.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<Notification>,
}

impl NotificationQueue {
    /// Spawn the delivery worker. It stops once every queue handle is dropped.
    pub fn start(notifier: Arc<dyn Notifier>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(rx, notifier));
        (Self { tx }, worker)
    }

    /// Enqueue `n`. Returns `false` when the queue is full or closed; the
    /// notification is then dropped and a warning logged.
    pub fn submit(&self, n: Notification) -> bool {
        let kind = n.kind();
        match self.tx.try_send(n) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(kind, "notification_dropped_queue_full");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(kind, "notification_dropped_queue_closed");
                false
            }
        }
    }
}

async fn run_worker(mut rx: mpsc::Receiver<Notification>, notifier: Arc<dyn Notifier>) {
    while let Some(n) = rx.recv().await {
        match notifier.deliver(&n).await {
            Ok(()) => info!(kind = n.kind(), "notification_sent"),
            Err(e) => error!(kind = n.kind(), error = %e, "notification_failed"),
        }
    }
    info!("notification_worker_stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::mock::{FailingNotifier, RecordingNotifier};
    use chrono::Utc;
    use uuid::Uuid;

    fn contact(email: &str) -> models::contact_message::Model {
        models::contact_message::Model {
            id: Uuid::new_v4(),
            name: "Sam".into(),
            email: email.into(),
            subject: None,
            message: "hello".into(),
            status: "new".into(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn worker_delivers_in_order_and_stops_on_drop() {
        let rec = Arc::new(RecordingNotifier::default());
        let (queue, worker) = NotificationQueue::start(rec.clone(), 8);
        assert!(queue.submit(Notification::ContactReceived(contact("a@example.com"))));
        assert!(queue.submit(Notification::ContactReceived(contact("b@example.com"))));
        drop(queue);
        worker.await.unwrap();
        assert_eq!(rec.sent(), vec!["contact:a@example.com", "contact:b@example.com"]);
    }

    #[tokio::test]
    async fn failures_are_absorbed_by_worker() {
        let (queue, worker) = NotificationQueue::start(Arc::new(FailingNotifier), 4);
        assert!(queue.submit(Notification::ContactReceived(contact("c@example.com"))));
        drop(queue);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn submit_reports_closed_queue() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let queue = NotificationQueue { tx };
        assert!(!queue.submit(Notification::ContactReceived(contact("d@example.com"))));
    }
}
