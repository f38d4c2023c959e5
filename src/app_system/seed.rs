//! Demo data every fresh system starts with.

use chrono::{Duration, Utc};

use crate::domain::{
    Order, OrderStatus, Password, Payment, PaymentMode, PaymentStatus, Product, Role, User,
};

pub const FIRST_USER_ID: u64 = 3;
pub const FIRST_PRODUCT_ID: u64 = 4;
pub const FIRST_ORDER_ID: u64 = 201;
pub const FIRST_PAYMENT_ID: u64 = 301;

fn user(
    id: u64,
    full_name: &str,
    login_name: &str,
    mobile: &str,
    email: &str,
    address: &str,
    role: Role,
) -> User {
    User {
        id,
        full_name: full_name.into(),
        login_name: login_name.into(),
        mobile: mobile.into(),
        email: email.into(),
        address: address.into(),
        role,
        profile_image: None,
        password: Password::new(login_name),
    }
}

/// `admin/admin` and `customer/customer`.
pub fn users() -> Vec<User> {
    vec![
        user(1, "Admin User", "admin", "9876543210", "admin@pickupkart.in", "PickupKart HQ, Delhi", Role::Admin),
        user(
            2,
            "Sample Customer",
            "customer",
            "9876543211",
            "user2025@gmail.com",
            "123 Customer Street, Mumbai",
            Role::Customer,
        ),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop Courier", "/laptop-courier.jpg", 1200.0, 10),
        Product::new(2, "Documents Express", "/documents-express.jpg", 300.0, 50),
        Product::new(3, "Fragile Glassware", "/fragile-glassware.jpg", 600.0, 20),
    ]
}

pub fn orders() -> Vec<Order> {
    let today = Utc::now().date_naive();
    let order = |id, amount, quantity, product: (u64, &str, &str), courier: (u32, &str), status| Order {
        id,
        order_date: today,
        amount,
        quantity,
        customer_id: 2,
        customer_name: "Sample Customer".into(),
        product_id: product.0,
        product_name: product.1.into(),
        product_image: Some(product.2.into()),
        courier_id: courier.0,
        courier_name: courier.1.into(),
        custom_courier_name: None,
        status,
    };
    vec![
        order(101, 1200.0, 1, (1, "Laptop Courier", "/laptop-courier.jpg"), (1, "ExpressShip"), OrderStatus::Delivered),
        order(102, 600.0, 2, (3, "Fragile Glassware", "/fragile-glassware.jpg"), (2, "SafeDelivery"), OrderStatus::Shipped),
        order(103, 300.0, 1, (2, "Documents Express", "/documents-express.jpg"), (1, "ExpressShip"), OrderStatus::Pending),
    ]
}

/// 204 and 205 point at orders that were never seeded.
pub fn payments() -> Vec<Payment> {
    let now = Utc::now();
    let payment = |id, order_id, mode, amount, days_ago, status, tx: Option<&str>, product: &str| Payment {
        id,
        order_id,
        mode,
        amount,
        date: now - Duration::days(days_ago),
        status,
        transaction_id: tx.map(str::to_string),
        product_name: Some(product.into()),
    };
    vec![
        payment(201, 101, PaymentMode::Upi, 1200.0, 0, PaymentStatus::Completed, Some("UPI12345678"), "Laptop Courier"),
        payment(202, 102, PaymentMode::Card, 600.0, 0, PaymentStatus::Completed, Some("CARD87654321"), "Fragile Glassware"),
        payment(203, 103, PaymentMode::Cash, 300.0, 0, PaymentStatus::Pending, None, "Documents Express"),
        payment(204, 104, PaymentMode::Upi, 450.0, 7, PaymentStatus::Failed, None, "Electronics Package"),
        payment(205, 105, PaymentMode::Card, 750.0, 14, PaymentStatus::Completed, Some("CARD123456789"), "Gift Package"),
    ]
}
