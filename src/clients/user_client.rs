use tracing::{debug, info, instrument};
use crate::domain::{Role, User, UserCreate, UserId, UserPatch};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserId, UserError, user);

impl UserClient {
    /// Register a new account with the role it asked for.
    #[instrument(skip(self, user), fields(login_name = %user.login_name, role = %user.role))]
    pub async fn register_user(&self, user: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let user = self.inner.create(user).await.map_err(UserError::from)?;
        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Admin-side account creation; the role is always ADMIN.
    #[instrument(skip(self, user), fields(login_name = %user.login_name))]
    pub async fn create_admin(&self, mut user: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        user.role = Role::Admin;
        self.inner.create(user).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, UserError> {
        let users = self.list_users().await?;
        Ok(users.into_iter().filter(|u| u.role == role).collect())
    }

    /// Check a login against the directory. `Ok(None)` means bad credentials.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, login_name: &str, password: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let users = self.list_users().await?;
        Ok(users
            .into_iter()
            .find(|u| u.login_name.eq_ignore_ascii_case(login_name) && u.password.matches(password)))
    }
}
