use std::sync::Arc;

use async_trait::async_trait;
use auth::extract_bearer;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::UpdateCredentialsCommand;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::session::ports::IdentityResolver;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::store::RefreshTokenStore;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Stateless credential resolver backed by signed access tokens.
pub struct AccessTokenVerifier {
    authenticator: Arc<Authenticator>,
}

impl AccessTokenVerifier {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl IdentityResolver for AccessTokenVerifier {
    async fn resolve_identity(&self, credential: &str) -> Result<UserId, AuthError> {
        self.authenticator
            .validate_token(credential)
            .map(UserId)
            .map_err(|e| {
                tracing::warn!(reason = %e, "Access token rejected");
                AuthError::Unauthorized
            })
    }
}

/// Domain service implementing the authentication gateway.
///
/// Composes password hashing, access token issuance and the refresh token
/// store into the register / login / refresh / revoke / change-password flows.
pub struct AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RefreshTokenStore<RR>>,
    access_tokens: AccessTokenVerifier,
    authenticator: Arc<Authenticator>,
}

impl<UR, RR> AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh token store
    /// * `authenticator` - Password and access token coordinator
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RefreshTokenStore<RR>>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            access_tokens: AccessTokenVerifier::new(Arc::clone(&authenticator)),
            authenticator,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl<UR, RR> AuthServicePort for AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        let password_hash = self.hash_password(command.password.expose())?;
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.users.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Login attempt for unknown email");
                AuthError::Unauthorized
            })?;

        let ttl = self.authenticator.access_ttl(command.expires_in);
        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0, ttl)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                    AuthError::Unauthorized
                }
                AuthenticationError::PasswordError(err) => AuthError::Hashing(err.to_string()),
                AuthenticationError::TokenError(err) => AuthError::TokenIssuance(err.to_string()),
            })?;

        let refresh_token = self.refresh_tokens.issue(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token: result.access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let credential = extract_bearer(authorization)?;
        let user_id = self.refresh_tokens.resolve_identity(credential).await?;

        self.authenticator
            .generate_token(user_id.0)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))
    }

    async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let credential = extract_bearer(authorization)?;
        self.refresh_tokens.revoke(credential).await
    }

    async fn authenticate_request(
        &self,
        authorization: Option<&str>,
    ) -> Result<UserId, AuthError> {
        let credential = extract_bearer(authorization)?;
        self.access_tokens.resolve_identity(credential).await
    }

    async fn change_password(
        &self,
        authorization: Option<&str>,
        command: UpdateCredentialsCommand,
    ) -> Result<User, AuthError> {
        let user_id = self.authenticate_request(authorization).await?;

        let email = EmailAddress::new(command.email)?;
        let password = Password::new(command.password)?;
        let password_hash = self.hash_password(password.expose())?;

        let user = self
            .users
            .update_credentials(&user_id, &email, &password_hash)
            .await?;
        tracing::info!(user_id = %user.id, "User credentials updated");

        Ok(user)
    }

    async fn reset(&self) -> Result<u64, AuthError> {
        let deleted = self.users.delete_all().await?;
        tracing::warn!(deleted, "All users deleted");

        Ok(deleted)
    }
}
