//! User-facing notifications ("toasts").
//!
//! Every auth outcome and every rejected domain action is published here.
//! Subscribers that fall behind miss older notifications.

use tokio::sync::broadcast;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Fan-out of notifications to every subscriber.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(title.into(), description.into(), Severity::Info);
    }

    pub fn destructive(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(title.into(), description.into(), Severity::Destructive);
    }

    fn publish(&self, title: String, description: String, severity: Severity) {
        match severity {
            Severity::Info => info!(%title, %description, "Notification"),
            Severity::Destructive => warn!(%title, %description, "Notification"),
        }
        // No subscribers is fine.
        let _ = self.tx.send(Notification { title, description, severity });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_in_order() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();
        notifier.info("Login Successful", "Welcome, Admin User!");
        notifier.destructive("Login Failed", "Invalid credentials");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.title, "Login Successful");
        assert_eq!(first.severity, Severity::Info);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.severity, Severity::Destructive);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        Notifier::new(4).info("Logged Out", "");
    }
}
