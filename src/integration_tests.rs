#[cfg(test)]
mod tests {
    use crate::clients::{OrderClient, UserClient, ProductClient};
    use crate::domain::{BookingRequest, Order, OrderStatus, Password, Product, Role, User};
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get};
    use crate::order_actor::OrderError;
    use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

    fn customer() -> User {
        User {
            id: 2,
            full_name: "Sample Customer".into(),
            login_name: "customer".into(),
            mobile: "9876543211".into(),
            email: "user2025@gmail.com".into(),
            address: "Mumbai".into(),
            role: Role::Customer,
            profile_image: None,
            password: Password::new("customer"),
        }
    }

    fn booking(quantity: u32) -> BookingRequest {
        BookingRequest {
            customer_id: 2,
            product_id: 3,
            quantity,
            courier_id: 1,
            custom_courier_name: None,
        }
    }

    #[tokio::test]
    async fn test_booking_flow() {
        // 1. Setup Mocks
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (product_client_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);

        let user_client = UserClient::new(user_client_inner);
        let product_client = ProductClient::new(product_client_inner);
        let order_client = OrderClient::new(order_client_inner, user_client, product_client);

        // 2. Execute booking in background
        let order_task = tokio::spawn(async move { order_client.book_courier(booking(2)).await });

        // 3. Verify Interactions

        // Expect User Get
        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, 2);
        responder.send(Ok(Some(customer()))).unwrap();

        // Expect Product Get
        let (product_id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        assert_eq!(product_id, 3);
        let product = Product::new(3, "Fragile Glassware", "/fragile-glassware.jpg", 600.0, 20);
        responder.send(Ok(Some(product))).unwrap();

        // Expect Stock Reservation (Action)
        let (product_id, action, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
        assert_eq!(product_id, 3);
        match action {
            ProductAction::ReserveStock(qty) => assert_eq!(qty, 2),
            _ => panic!("Unexpected action: {:?}", action),
        }
        responder.send(Ok(ProductActionResult::ReserveStock(18))).unwrap();

        // Expect Order Create
        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.customer_id, 2);
        assert_eq!(payload.customer_name, "Sample Customer");
        assert_eq!(payload.product_id, 3);
        assert_eq!(payload.quantity, 2);
        assert_eq!(payload.amount, 1200.0);
        assert_eq!(payload.courier_name, "Express Delivery");
        let order = Order {
            id: 201,
            order_date: payload.order_date,
            amount: payload.amount,
            quantity: payload.quantity,
            customer_id: payload.customer_id,
            customer_name: payload.customer_name.clone(),
            product_id: payload.product_id,
            product_name: payload.product_name.clone(),
            product_image: payload.product_image.clone(),
            courier_id: payload.courier_id,
            courier_name: payload.courier_name.clone(),
            custom_courier_name: None,
            status: OrderStatus::Pending,
        };
        responder.send(Ok(order.clone())).unwrap();

        // 4. Verify Result
        let result = order_task.await.unwrap();
        assert_eq!(result, Ok(order));
    }

    #[tokio::test]
    async fn test_booking_stops_when_stock_is_short() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (product_client_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);

        let order_client = OrderClient::new(
            order_client_inner,
            UserClient::new(user_client_inner),
            ProductClient::new(product_client_inner),
        );
        let order_task = tokio::spawn(async move { order_client.book_courier(booking(30)).await });

        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        responder.send(Ok(Some(customer()))).unwrap();
        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        responder
            .send(Ok(Some(Product::new(3, "Fragile Glassware", "/fragile-glassware.jpg", 600.0, 20))))
            .unwrap();
        let (_, _, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
        responder
            .send(Err(crate::actor_framework::FrameworkError::Entity(
                ProductError::InsufficientStock { requested: 30, available: 20 },
            )))
            .unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::InsufficientStock(_))));
        // The order actor was never asked to create anything.
        assert!(order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_create_releases_reserved_stock() {
        let (user_client_inner, mut user_rx) = create_mock_client::<User>(10);
        let (product_client_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (order_client_inner, mut order_rx) = create_mock_client::<Order>(10);

        let order_client = OrderClient::new(
            order_client_inner,
            UserClient::new(user_client_inner),
            ProductClient::new(product_client_inner),
        );
        let order_task = tokio::spawn(async move { order_client.book_courier(booking(2)).await });

        let (_, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        responder.send(Ok(Some(customer()))).unwrap();
        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        responder
            .send(Ok(Some(Product::new(3, "Fragile Glassware", "/fragile-glassware.jpg", 600.0, 20))))
            .unwrap();
        let (_, _, responder) = expect_action(&mut product_rx).await.expect("Expected Product Action");
        responder.send(Ok(ProductActionResult::ReserveStock(18))).unwrap();

        // The order actor goes away without answering.
        let (_, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        drop(responder);

        let (product_id, action, responder) =
            expect_action(&mut product_rx).await.expect("Expected stock release");
        assert_eq!(product_id, 3);
        match action {
            ProductAction::ReleaseStock(qty) => assert_eq!(qty, 2),
            _ => panic!("Unexpected action: {:?}", action),
        }
        responder.send(Ok(ProductActionResult::ReleaseStock(20))).unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    }
}
