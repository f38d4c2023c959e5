//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to script
//! the actor's side of each exchange.

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client talks to a channel the test owns instead of a running
/// `ResourceActor`, so every reply (success, rejection, missing item) is
/// chosen by the test.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message must be a Create request.
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message must be a Get request.
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be a List request.
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next message must be an Action request.
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductId};
    use crate::product_actor::{ProductCreate, ProductError};
    use crate::actor_framework::FrameworkError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move {
            let product = ProductCreate { name: Some("Test".to_string()), ..Default::default() };
            client.create(product).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name.as_deref(), Some("Test"));
        let product = Product::new(7, "Test", "/placeholder.svg", 0.0, 0);
        responder.send(Ok(product.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(product));
    }

    #[tokio::test]
    async fn scripted_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let task = tokio::spawn(async move { client.get(3).await });

        let (id, responder): (ProductId, _) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, 3);
        responder.send(Err(FrameworkError::<ProductError>::NotFound("3".into()))).unwrap();
        assert_eq!(task.await.unwrap(), Err(FrameworkError::NotFound("3".into())));
    }

    #[tokio::test]
    async fn role_filter_runs_client_side() {
        use crate::clients::UserClient;
        use crate::domain::{Password, Role, User};

        let (inner, mut receiver) = create_mock_client::<User>(10);
        let client = UserClient::new(inner);
        let task = tokio::spawn(async move { client.list_users_by_role(Role::Admin).await });

        let user = |id: u64, role: Role| User {
            id,
            full_name: format!("User {id}"),
            login_name: format!("user{id}"),
            mobile: String::new(),
            email: format!("user{id}@example.com"),
            address: String::new(),
            role,
            profile_image: None,
            password: Password::default(),
        };
        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(vec![user(1, Role::Admin), user(2, Role::Customer)])).unwrap();

        let admins = task.await.unwrap().unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].id, 1);
    }
}
