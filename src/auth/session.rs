use tracing::{debug, info, instrument, warn};

use crate::domain::{User, UserCreate, UserPatch};
use crate::notify::Notifier;
use crate::user_actor::UserError;
use super::{AuthApi, AuthError, AuthSource, SessionError, SessionStore, SOURCE_KEY, TOKEN_KEY, USER_KEY};

/// The signed-in user and token, kept in sync with a [`SessionStore`].
///
/// Every operation publishes a notification describing its outcome.
pub struct AuthSession<S: SessionStore> {
    api: AuthApi,
    store: S,
    notifier: Notifier,
    user: Option<User>,
    token: Option<String>,
    source: Option<AuthSource>,
}

impl<S: SessionStore> AuthSession<S> {
    /// Pick up a session left behind by an earlier run. A half-written or
    /// unreadable session is cleared.
    pub fn restore(api: AuthApi, mut store: S, notifier: Notifier) -> Self {
        let restored = match (store.get(USER_KEY), store.get(TOKEN_KEY)) {
            (Some(raw), Some(token)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some((user, token)),
                Err(e) => {
                    warn!(error = %e, "Stored user is unreadable");
                    None
                }
            },
            _ => None,
        };

        let (user, token, source) = match restored {
            Some((user, token)) => {
                // Without a recorded source the user is never matched against the directory.
                let source = store
                    .get(SOURCE_KEY)
                    .and_then(|raw| serde_json::from_str(&raw).ok())
                    .unwrap_or(AuthSource::Backend);
                info!(user_id = user.id, ?source, "Session restored");
                (Some(user), Some(token), Some(source))
            }
            None => {
                for key in [USER_KEY, TOKEN_KEY, SOURCE_KEY] {
                    if let Err(e) = store.remove(key) {
                        warn!(error = %e, key, "Could not clear stale session entry");
                    }
                }
                (None, None, None)
            }
        };

        Self { api, store, notifier, user, token, source }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    #[instrument(skip(self, password))]
    pub async fn login(&mut self, login_name: &str, password: &str) -> Result<User, AuthError> {
        let result = async {
            let outcome = self.api.login(login_name, password).await?;
            info!(source = ?outcome.source, "Credentials accepted");
            self.persist(&outcome.user)?;
            self.store.set(TOKEN_KEY, outcome.token.clone())?;
            let source = serde_json::to_string(&outcome.source)
                .map_err(|e| SessionError::Corrupt(e.to_string()))?;
            self.store.set(SOURCE_KEY, source)?;
            self.token = Some(outcome.token);
            self.user = Some(outcome.user.clone());
            self.source = Some(outcome.source);
            Ok::<_, AuthError>(outcome.user)
        }
        .await;

        match &result {
            Ok(user) => self
                .notifier
                .info("Login Successful", format!("Welcome, {}!", user.full_name)),
            Err(e) => self.notifier.destructive("Login Failed", e.to_string()),
        }
        result
    }

    /// Create the account, then sign in with the same credentials.
    #[instrument(skip(self, user), fields(login_name = %user.login_name))]
    pub async fn register(&mut self, user: UserCreate) -> Result<User, AuthError> {
        let login_name = user.login_name.clone();
        let password = user.password.clone();

        let result = async {
            let created = self.api.register(user).await?;
            self.login(&login_name, password.expose()).await?;
            Ok::<_, AuthError>(created)
        }
        .await;

        match &result {
            Ok(created) => self.notifier.info(
                "Registration Successful",
                format!("Account created for {}!", created.full_name),
            ),
            Err(e) => self.notifier.destructive("Registration Failed", e.to_string()),
        }
        result
    }

    /// Patch the signed-in user. Only users the mock directory signed in are
    /// written back to it; backend users are updated locally.
    #[instrument(skip(self, patch))]
    pub async fn update_profile(&mut self, patch: UserPatch) -> Result<User, AuthError> {
        let result = self.apply_profile(patch).await;
        match &result {
            Ok(_) => self
                .notifier
                .info("Profile Updated", "Your profile has been updated successfully."),
            Err(e) => self.notifier.destructive("Update Failed", e.to_string()),
        }
        result
    }

    async fn apply_profile(&mut self, patch: UserPatch) -> Result<User, AuthError> {
        let mut current = self.user.clone().ok_or(AuthError::NotLoggedIn)?;
        let updated = match self.source {
            Some(AuthSource::Mock) => {
                match self.api.directory().update_user(current.id, patch.clone()).await {
                    Ok(user) => user,
                    Err(UserError::NotFound(_)) => {
                        warn!(user_id = current.id, "User left the directory, updating locally");
                        current.apply(patch);
                        current
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            _ => {
                debug!(user_id = current.id, "Backend user, updating locally");
                current.apply(patch);
                current
            }
        };
        self.persist(&updated)?;
        self.user = Some(updated.clone());
        Ok(updated)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.user = None;
        self.token = None;
        self.source = None;
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(SOURCE_KEY)?;
        info!("Signed out");
        self.notifier.info("Logged Out", "You've been successfully logged out.");
        Ok(())
    }

    fn persist(&mut self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        self.store.set(USER_KEY, raw)
    }
}
