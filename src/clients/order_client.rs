use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};
use crate::domain::{BookingRequest, Courier, Order, OrderCreate, OrderId, OrderStatus, UserId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::product_actor::ProductError;
use crate::actor_framework::ResourceClient;
use crate::clients::{UserClient, ProductClient};

/// Client for interacting with the Order actor.
///
/// Booking is orchestrated here: the customer, product and courier are
/// validated and stock is reserved before the order is created.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
        }
    }

    #[instrument(skip(self, request), fields(customer_id = request.customer_id, product_id = request.product_id))]
    pub async fn book_courier(&self, request: BookingRequest) -> Result<Order, OrderError> {
        info!("Processing booking request");

        if request.quantity == 0 {
            return Err(OrderError::ValidationError("Quantity must be at least 1".to_string()));
        }

        // Step 1: Validate customer
        let customer = match self.user_client.get_user(request.customer_id).await {
            Ok(Some(user)) => {
                info!(customer = %user.full_name, "Customer validation successful");
                user
            }
            Ok(None) => {
                error!("Customer not found");
                return Err(OrderError::InvalidUser(request.customer_id.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Customer validation failed");
                return Err(OrderError::InvalidUser(format!("Customer validation failed: {}", e)));
            }
        };

        // Step 2: Validate product
        let product = match self.product_client.get_product(request.product_id).await {
            Ok(Some(product)) => {
                info!(product_name = %product.name, "Product validation successful");
                product
            }
            Ok(None) => {
                error!("Product not found");
                return Err(OrderError::InvalidProduct(request.product_id.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                return Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)));
            }
        };

        // Step 3: Validate courier
        let courier = Courier::find(request.courier_id)
            .ok_or_else(|| OrderError::InvalidCourier(request.courier_id.to_string()))?;
        let custom_courier_name = if courier.is_custom {
            match request.custom_courier_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Some(name.to_string()),
                _ => {
                    return Err(OrderError::InvalidCourier(
                        "Custom courier name is required".to_string(),
                    ))
                }
            }
        } else {
            None
        };

        // Step 4: Reserve stock
        if let Err(e) = self.product_client.reserve_stock(product.id, request.quantity).await {
            error!(error = %e, "Stock reservation failed");
            return Err(OrderError::InsufficientStock(format!("Stock reservation failed: {}", e)));
        }

        info!("Stock reserved successfully");

        // Step 5: Create order in ResourceActor
        let payload = OrderCreate {
            order_date: Utc::now().date_naive(),
            amount: product.price * f64::from(request.quantity),
            quantity: request.quantity,
            customer_id: customer.id,
            customer_name: customer.full_name,
            product_id: product.id,
            product_name: product.name,
            product_image: Some(product.image),
            courier_id: courier.id,
            courier_name: courier.name,
            custom_courier_name,
        };

        match self.inner.create(payload).await {
            Ok(order) => {
                info!(order_id = order.id, amount = order.amount, "Order booked");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed, releasing stock");
                if let Err(release) = self.product_client.release_stock(product.id, request.quantity).await {
                    warn!(error = %release, "Stock release failed");
                }
                Err(OrderError::from(e))
            }
        }
    }

    /// Like `get_order`, but a missing order is an error.
    #[instrument(skip(self))]
    pub async fn require_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get_order(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_customer(&self, customer_id: UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.list_orders().await?;
        Ok(orders.into_iter().filter(|o| o.customer_id == customer_id).collect())
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        debug!(?action, "Sending request");
        let result = self.inner.perform_action(id, action).await.map_err(OrderError::from)?;
        if result.changed {
            info!(order_id = id, from = %result.previous, to = %result.order.status, "Order status changed");
        }
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        let result = self.act(id, OrderAction::Transition(status)).await?;
        if result.changed && status == OrderStatus::Cancelled {
            self.restock(&result.order).await;
        }
        Ok(result.order)
    }

    #[instrument(skip(self))]
    pub async fn confirm_order(&self, id: OrderId) -> Result<Order, OrderError> {
        Ok(self.act(id, OrderAction::Confirm).await?.order)
    }

    #[instrument(skip(self))]
    pub async fn ship_order(&self, id: OrderId) -> Result<Order, OrderError> {
        Ok(self.act(id, OrderAction::Transition(OrderStatus::Shipped)).await?.order)
    }

    #[instrument(skip(self))]
    pub async fn deliver_order(&self, id: OrderId) -> Result<Order, OrderError> {
        Ok(self.act(id, OrderAction::Transition(OrderStatus::Delivered)).await?.order)
    }

    /// Cancels the order and returns its quantity to stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, OrderError> {
        let result = self.act(id, OrderAction::Cancel).await?;
        if result.changed {
            self.restock(&result.order).await;
        }
        Ok(result.order)
    }

    /// Called when a payment completes. Returns whether the order moved.
    #[instrument(skip(self))]
    pub async fn confirm_after_payment(&self, id: OrderId) -> Result<bool, OrderError> {
        Ok(self.act(id, OrderAction::ConfirmAfterPayment).await?.changed)
    }

    async fn restock(&self, order: &Order) {
        match self.product_client.release_stock(order.product_id, order.quantity).await {
            Ok(level) => info!(product_id = order.product_id, level, "Stock released"),
            Err(ProductError::NotFound(_)) => {
                warn!(product_id = order.product_id, "Product gone, stock not released")
            }
            Err(e) => warn!(error = %e, "Stock release failed"),
        }
    }
}

impl_client_methods!(OrderClient, Order, OrderId, OrderError, order);
