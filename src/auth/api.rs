use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::clients::UserClient;
use crate::domain::{Password, Role, User, UserCreate, UserId};
use super::AuthError;

/// Token handed out by the mock directory.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    login_name: &'a str,
    password: &'a str,
}

/// The backend's JWT payload. Register answers with the same shape, token optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JwtResponse {
    #[serde(default)]
    token: Option<String>,
    id: BackendId,
    full_name: String,
    login_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    mobile: String,
    #[serde(default)]
    address: String,
    role: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendId {
    Number(u64),
    Text(String),
}

impl BackendId {
    /// Non-numeric ids get a stable numeric stand-in: the high half of a
    /// name-based (v5) UUID, which is fixed across builds and platforms.
    fn into_user_id(self) -> UserId {
        match self {
            BackendId::Number(id) => id,
            BackendId::Text(raw) => raw
                .trim()
                .parse()
                .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()).as_u64_pair().0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: Option<String>,
}

impl From<JwtResponse> for User {
    fn from(body: JwtResponse) -> Self {
        User {
            id: body.id.into_user_id(),
            full_name: body.full_name,
            login_name: body.login_name,
            mobile: body.mobile,
            email: body.email,
            address: body.address,
            role: Role::from_backend(&body.role),
            profile_image: None,
            password: Password::default(),
        }
    }
}

/// Where a successful sign-in was answered. Backend users carry ids the
/// in-memory directory does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    Backend,
    Mock,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
    pub source: AuthSource,
}

/// HTTP client for `/auth/login` and `/auth/register`.
///
/// When fallback is enabled, any failure of the remote call (transport,
/// non-2xx, undecodable body) is retried against the in-memory directory.
#[derive(Clone)]
pub struct AuthApi {
    http: reqwest::Client,
    base_url: String,
    mock_fallback: bool,
    directory: UserClient,
}

impl AuthApi {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        mock_fallback: bool,
        directory: UserClient,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| AuthError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            mock_fallback,
            directory,
        })
    }

    /// The in-memory user directory backing the mock path.
    pub fn directory(&self) -> &UserClient {
        &self.directory
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, login_name: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let request = LoginRequest { login_name, password };
        let remote = self
            .post("/auth/login", &request, "Login failed")
            .await
            .and_then(|mut body| match body.token.take() {
                Some(token) => Ok(LoginOutcome { user: body.into(), token, source: AuthSource::Backend }),
                None => Err(AuthError::Decode("login response carried no token".to_string())),
            });
        match remote {
            Ok(outcome) => {
                info!(user_id = outcome.user.id, "Signed in against backend");
                Ok(outcome)
            }
            Err(e) if self.mock_fallback => {
                warn!(error = %e, "Using mock login as fallback");
                self.mock_login(login_name, password).await
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the created account. The caller signs in separately.
    #[instrument(skip(self, user), fields(login_name = %user.login_name, role = %user.role))]
    pub async fn register(&self, user: UserCreate) -> Result<User, AuthError> {
        match self.post("/auth/register", &user, "Registration failed").await {
            Ok(body) => {
                info!("Registered against backend");
                Ok(body.into())
            }
            Err(e) if self.mock_fallback => {
                warn!(error = %e, "Using mock registration as fallback");
                Ok(self.directory.register_user(user).await?)
            }
            Err(e) => Err(e),
        }
    }

    async fn mock_login(&self, login_name: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self
            .directory
            .authenticate(login_name, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        info!(user_id = user.id, "Signed in against mock directory");
        Ok(LoginOutcome { user, token: MOCK_TOKEN.to_string(), source: AuthSource::Mock })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback_message: &str,
    ) -> Result<JwtResponse, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<MessageResponse>()
                .await
                .ok()
                .and_then(|m| m.message)
                .unwrap_or_else(|| fallback_message.to_string());
            return Err(AuthError::Backend { status: status.as_u16(), message });
        }

        resp.json::<JwtResponse>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }
}
