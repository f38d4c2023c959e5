use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use crate::domain::{
    OrderId, Payment, PaymentCreate, PaymentDetails, PaymentId, PaymentRequest, PaymentStatus,
    Receipt, UserId,
};
use crate::order_actor::OrderError;
use crate::payment_actor::{validate_details, verify_otp, PaymentError};
use crate::actor_framework::ResourceClient;
use crate::clients::{OrderClient, ProductClient, UserClient};

/// Client for interacting with the Payment actor.
///
/// Recording a completed payment confirms the pending order it pays for.
#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<Payment>,
    order_client: OrderClient,
    user_client: UserClient,
    product_client: ProductClient,
}

fn transaction_id() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("TX{}", &raw[..12])
}

fn lookup_failed(e: impl std::fmt::Display) -> PaymentError {
    PaymentError::ActorCommunicationError(e.to_string())
}

impl PaymentClient {
    pub fn new(
        inner: ResourceClient<Payment>,
        order_client: OrderClient,
        user_client: UserClient,
        product_client: ProductClient,
    ) -> Self {
        Self {
            inner,
            order_client,
            user_client,
            product_client,
        }
    }

    /// Store a payment. A COMPLETED payment confirms its order if the order
    /// is still pending; a payment for an unknown order is kept anyway.
    #[instrument(skip(self, payment), fields(order_id = payment.order_id, status = ?payment.status))]
    pub async fn record_payment(&self, mut payment: PaymentCreate) -> Result<Payment, PaymentError> {
        debug!("Sending request");
        if payment.product_name.is_none() {
            if let Some(order) = self.order_client.get_order(payment.order_id).await? {
                payment.product_name = Some(order.product_name);
            }
        }

        let order_id = payment.order_id;
        let completed = payment.status == PaymentStatus::Completed;
        let recorded = self.inner.create(payment).await.map_err(PaymentError::from)?;
        info!(payment_id = recorded.id, "Payment recorded");

        if completed {
            match self.order_client.confirm_after_payment(order_id).await {
                Ok(true) => info!(order_id, "Order confirmed by payment"),
                Ok(false) => debug!(order_id, "Order already past pending"),
                Err(OrderError::NotFound(_)) => {
                    warn!(order_id, "Payment recorded for an unknown order")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(recorded)
    }

    /// Run a checkout: validate the instrument, check the OTP, then record.
    /// Card and UPI payments complete immediately; cash stays pending.
    #[instrument(skip(self, request, otp), fields(order_id = request.order_id, details = ?request.details))]
    pub async fn process_payment(&self, request: PaymentRequest, otp: Option<&str>) -> Result<Payment, PaymentError> {
        validate_details(&request.details, Utc::now().date_naive())
            .map_err(PaymentError::InvalidDetails)?;

        let (status, transaction_id) = match request.details {
            PaymentDetails::Cash => (PaymentStatus::Pending, None),
            PaymentDetails::Card { .. } | PaymentDetails::Upi { .. } => {
                if !otp.is_some_and(verify_otp) {
                    warn!("OTP rejected");
                    return Err(PaymentError::InvalidOtp);
                }
                (PaymentStatus::Completed, Some(transaction_id()))
            }
        };

        self.record_payment(PaymentCreate {
            order_id: request.order_id,
            mode: request.details.mode(),
            amount: request.amount,
            status,
            transaction_id,
            product_name: None,
        })
        .await
    }

    /// Most recent payment made against the order.
    #[instrument(skip(self))]
    pub async fn payment_for_order(&self, order_id: OrderId) -> Result<Option<Payment>, PaymentError> {
        let payments = self.list_payments().await?;
        Ok(payments
            .into_iter()
            .filter(|p| p.order_id == order_id)
            .max_by_key(|p| (p.date, p.id)))
    }

    /// Payments for orders placed by `customer_id`, newest first.
    #[instrument(skip(self))]
    pub async fn payment_history(&self, customer_id: UserId) -> Result<Vec<Payment>, PaymentError> {
        let orders = self.order_client.list_orders_for_customer(customer_id).await?;
        let mut history: Vec<Payment> = self
            .list_payments()
            .await?
            .into_iter()
            .filter_map(|mut payment| {
                let order = orders.iter().find(|o| o.id == payment.order_id)?;
                payment.product_name.get_or_insert_with(|| order.product_name.clone());
                Some(payment)
            })
            .collect();
        history.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(history)
    }

    /// `None` when the payment, order, customer or product is missing.
    #[instrument(skip(self))]
    pub async fn receipt(&self, order_id: OrderId) -> Result<Option<Receipt>, PaymentError> {
        let Some(payment) = self.payment_for_order(order_id).await? else {
            return Ok(None);
        };
        let Some(order) = self.order_client.get_order(order_id).await? else {
            return Ok(None);
        };
        let customer = self.user_client.get_user(order.customer_id).await.map_err(lookup_failed)?;
        let product = self.product_client.get_product(order.product_id).await.map_err(lookup_failed)?;
        Ok(customer.zip(product).map(|(customer, product)| Receipt {
            payment,
            order,
            customer,
            product,
        }))
    }
}

impl_client_methods!(PaymentClient, Payment, PaymentId, PaymentError, payment);
