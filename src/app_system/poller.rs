use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn, Instrument};
use crate::clients::OrderClient;
use crate::domain::{Order, UserId};
use crate::order_actor::OrderError;

/// Which orders a poller follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollScope {
    All,
    Customer(UserId),
}

/// Periodically re-reads orders and publishes each snapshot.
///
/// The first refresh happens immediately. Dropping the poller stops it.
pub struct OrderPoller {
    snapshots: watch::Receiver<Vec<Order>>,
    task: JoinHandle<()>,
}

impl OrderPoller {
    pub fn start(order_client: OrderClient, scope: PollScope, every: Duration) -> Self {
        let (sender, snapshots) = watch::channel(Vec::new());
        let span = tracing::info_span!("order_poller", ?scope);
        let task = tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(every);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    match fetch(&order_client, scope).await {
                        Ok(orders) => {
                            debug!(count = orders.len(), "Orders refreshed");
                            if sender.send(orders).is_err() {
                                break;
                            }
                        }
                        // Keep the last good snapshot.
                        Err(e) => warn!(error = %e, "Order refresh failed"),
                    }
                }
            }
            .instrument(span),
        );
        Self { snapshots, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Order>> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Vec<Order> {
        self.snapshots.borrow().clone()
    }
}

impl Drop for OrderPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn fetch(order_client: &OrderClient, scope: PollScope) -> Result<Vec<Order>, OrderError> {
    match scope {
        PollScope::All => order_client.list_orders().await,
        PollScope::Customer(id) => order_client.list_orders_for_customer(id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::PickupSystem;
    use crate::domain::OrderStatus;

    #[tokio::test]
    async fn publishes_scoped_snapshots() {
        let system = PickupSystem::start(8, Duration::ZERO);
        let poller = OrderPoller::start(
            system.order_client.clone(),
            PollScope::Customer(2),
            Duration::from_secs(30),
        );
        let mut updates = poller.subscribe();
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().len(), 3);
        assert_eq!(poller.latest().len(), 3);

        let nobody = OrderPoller::start(
            system.order_client.clone(),
            PollScope::Customer(1),
            Duration::from_secs(30),
        );
        let mut updates = nobody.subscribe();
        updates.changed().await.unwrap();
        assert!(updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn refreshes_on_each_tick() {
        let system = PickupSystem::start(8, Duration::ZERO);
        let poller = OrderPoller::start(system.order_client.clone(), PollScope::All, Duration::from_millis(10));
        let mut updates = poller.subscribe();
        updates.changed().await.unwrap();

        system.order_client.cancel_order(103).await.unwrap();
        let seen = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                updates.changed().await.unwrap();
                let status = updates.borrow().iter().find(|o| o.id == 103).map(|o| o.status);
                if status == Some(OrderStatus::Cancelled) {
                    break;
                }
            }
        })
        .await;
        assert!(seen.is_ok());
    }

    #[tokio::test]
    async fn dropping_stops_the_task() {
        let system = PickupSystem::start(8, Duration::ZERO);
        let poller = OrderPoller::start(system.order_client.clone(), PollScope::All, Duration::from_millis(5));
        let mut updates = poller.subscribe();
        drop(poller);
        // Sender goes away with the aborted task.
        while updates.changed().await.is_ok() {}
        assert!(updates.has_changed().is_err());
    }
}
