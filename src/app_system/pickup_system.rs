use std::time::Duration;

use tracing::{error, info};
use crate::clients::{OrderClient, PaymentClient, ProductClient, UserClient};
use crate::actor_framework::ResourceActor;
use crate::domain::{Order, Payment, Product, User};
use super::{seed, sequence, AppError};

/// The main application system that orchestrates all actors.
///
/// Starts one actor per collection with the demo data preloaded, wires the
/// clients together, and handles shutdown.
pub struct PickupSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub payment_client: PaymentClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PickupSystem {
    /// `latency` is added to every request to mimic a remote backend.
    pub fn start(buffer: usize, latency: Duration) -> Self {
        // 1. Users
        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new(buffer, sequence(seed::FIRST_USER_ID));
        let user_actor = user_actor.with_seed(seed::users());
        let user_client = UserClient::new(user_resource_client.with_latency(latency));
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Products
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer, sequence(seed::FIRST_PRODUCT_ID));
        let product_actor = product_actor.with_seed(seed::products());
        let product_client = ProductClient::new(product_resource_client.with_latency(latency));
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Orders
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(buffer, sequence(seed::FIRST_ORDER_ID));
        let order_actor = order_actor.with_seed(seed::orders());
        let order_client = OrderClient::new(
            order_resource_client.with_latency(latency),
            user_client.clone(),
            product_client.clone(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Payments
        let (payment_actor, payment_resource_client) =
            ResourceActor::<Payment>::new(buffer, sequence(seed::FIRST_PAYMENT_ID));
        let payment_actor = payment_actor.with_seed(seed::payments());
        let payment_client = PaymentClient::new(
            payment_resource_client.with_latency(latency),
            order_client.clone(),
            user_client.clone(),
            product_client.clone(),
        );
        let payment_handle = tokio::spawn(payment_actor.run());

        info!(buffer, latency_ms = latency.as_millis() as u64, "System started");

        Self {
            user_client,
            product_client,
            order_client,
            payment_client,
            handles: vec![user_handle, product_handle, order_handle, payment_handle],
        }
    }

    /// Drops every client held here and waits for the actors to drain.
    /// Clones handed out elsewhere must be dropped first or this waits on them.
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");

        drop(self.payment_client);
        drop(self.order_client);
        drop(self.product_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderStatus, PaymentStatus, Role};

    #[tokio::test]
    async fn starts_with_demo_data() {
        let system = PickupSystem::start(8, Duration::ZERO);

        let admins = system.user_client.list_users_by_role(Role::Admin).await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].login_name, "admin");
        assert!(system.user_client.authenticate("customer", "customer").await.unwrap().is_some());

        assert_eq!(system.product_client.list_products().await.unwrap().len(), 3);

        let orders = system.order_client.list_orders().await.unwrap();
        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![101, 102, 103]);
        assert_eq!(orders[2].status, OrderStatus::Pending);

        let payments = system.payment_client.list_payments().await.unwrap();
        assert_eq!(payments.len(), 5);
        assert_eq!(
            system.payment_client.payment_for_order(103).await.unwrap().unwrap().status,
            PaymentStatus::Pending
        );

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn new_ids_continue_after_seeded_ranges() {
        let system = PickupSystem::start(8, Duration::ZERO);
        let product = system
            .product_client
            .create_product(Default::default())
            .await
            .unwrap();
        assert_eq!(product.id, 4);
        assert_eq!(product.name, "New Product");
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn seeded_orphan_payments_have_no_receipt() {
        let system = PickupSystem::start(8, Duration::ZERO);
        assert!(system.payment_client.receipt(104).await.unwrap().is_none());
        assert!(system.payment_client.receipt(101).await.unwrap().is_some());
        let history = system.payment_client.payment_history(2).await.unwrap();
        assert_eq!(history.len(), 3);
        system.shutdown().await.unwrap();
    }
}
