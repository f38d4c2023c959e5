mod domain;
mod clients;

mod app_system;
mod auth;
mod config;
mod notify;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod user_actor;
mod product_actor;
mod order_actor;
mod payment_actor;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, AppError, OrderPoller, PickupSystem, PollScope};
use crate::auth::{AuthApi, AuthSession, FileSessionStore};
use crate::config::AppConfig;
use crate::domain::{BookingRequest, PaymentDetails, PaymentRequest};
use crate::notify::Notifier;
use crate::payment_actor::{upi_payment_uri, MOCK_OTP};

/// Scripted session: a customer books and pays, an admin works the order
/// through to delivery, then everyone signs out.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!("Starting PickupKart");

    let system = PickupSystem::start(config.channel_buffer, config.mock_latency);
    let notifier = Notifier::default();

    let api = AuthApi::new(
        &config.api_base_url,
        config.http_timeout,
        config.mock_fallback,
        system.user_client.clone(),
    )?;
    let store = FileSessionStore::open(&config.session_file)?;
    let mut session = AuthSession::restore(api, store, notifier.clone());

    if let Some(user) = session.current_user() {
        info!(user = %user.login_name, "Resuming previous session");
        session.logout()?;
    }

    // Customer books a courier and pays for it
    let customer = session.login("customer", "customer").await?;

    let span = tracing::info_span!("booking", customer_id = customer.id);
    let order = async {
        info!("Booking courier");
        system
            .order_client
            .book_courier(BookingRequest {
                customer_id: customer.id,
                product_id: 2,
                quantity: 1,
                courier_id: 4,
                custom_courier_name: Some("Blue Dart".to_string()),
            })
            .await
    }
    .instrument(span)
    .await?;

    info!(order_id = order.id, amount = order.amount, "Order booked successfully");
    info!(uri = %upi_payment_uri(order.id, order.amount), "UPI link available");

    let span = tracing::info_span!("payment", order_id = order.id);
    let payment = async {
        let request = PaymentRequest {
            order_id: order.id,
            amount: order.amount,
            details: PaymentDetails::Card {
                holder: customer.full_name.clone(),
                number: "4111 1111 1111 1111".to_string(),
                expiry: "12/30".to_string(),
                cvv: "123".to_string(),
            },
        };
        system.payment_client.process_payment(request, Some(MOCK_OTP)).await
    }
    .instrument(span)
    .await?;

    info!(
        payment_id = payment.id,
        transaction_id = payment.transaction_id.as_deref().unwrap_or("-"),
        "Payment completed"
    );

    let history = system.payment_client.payment_history(customer.id).await?;
    info!(payments = history.len(), "Payment history loaded");
    match system.payment_client.receipt(order.id).await? {
        Some(receipt) => info!(
            order_id = receipt.order.id,
            product = %receipt.product.name,
            status = %receipt.order.status,
            "Receipt ready"
        ),
        None => warn!(order_id = order.id, "No receipt available"),
    }

    session.logout()?;

    // Admin moves the order along
    let admin = session.login("admin", "admin").await?;
    if !admin.is_admin() {
        warn!(user = %admin.login_name, "Signed in without admin rights");
    }

    let span = tracing::info_span!("fulfilment", order_id = order.id);
    async {
        system.order_client.ship_order(order.id).await?;
        system.order_client.deliver_order(order.id).await?;
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    match system.order_client.cancel_order(order.id).await {
        Ok(order) => warn!(order_id = order.id, "Delivered order was cancelled"),
        Err(e) => {
            error!(error = %e, "Cancel rejected");
            notifier.destructive("Action Failed", e.to_string());
        }
    }

    let poller = OrderPoller::start(system.order_client.clone(), PollScope::All, config.poll_interval);
    let mut snapshots = poller.subscribe();
    if snapshots.changed().await.is_ok() {
        let orders = snapshots.borrow().clone();
        for order in &orders {
            info!(order_id = order.id, status = %order.status, closed = order.status.is_terminal(), "Order");
        }
    }
    drop(poller);

    session.logout()?;
    // The session holds a user client; release it before shutdown.
    drop(session);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
