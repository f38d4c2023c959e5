use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserId, UserPatch};
use super::error::UserError;

impl Entity for User {
    type Id = UserId;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.id
    }

    /// Creates a new User from registration parameters.
    ///
    /// # Errors
    /// Rejects blank login names, blank passwords and e-mail addresses without `@`.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let login_name = params.login_name.trim().to_string();
        if login_name.is_empty() {
            return Err(UserError::ValidationError("Login name required".to_string()));
        }
        if params.password.is_empty() {
            return Err(UserError::ValidationError("Password required".to_string()));
        }
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!("Invalid email: {}", params.email)));
        }
        Ok(Self {
            id,
            full_name: params.full_name,
            login_name,
            mobile: params.mobile,
            email: params.email,
            address: params.address,
            role: params.role,
            profile_image: None,
            password: params.password,
        })
    }

    /// Login names are unique across the directory.
    fn unique_key(&self) -> Option<String> {
        Some(self.login_name.to_ascii_lowercase())
    }

    /// Updates the user's profile information.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(email) = &patch.email {
            if !email.contains('@') {
                return Err(UserError::ValidationError(format!("Invalid email: {}", email)));
            }
        }
        self.apply(patch);
        Ok(())
    }

    /// Users are never deleted.
    fn on_delete(&self) -> Result<(), UserError> {
        Err(UserError::ValidationError("Users cannot be deleted".to_string()))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
