use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chirpy_service::config::Platform;
use chirpy_service::domain::chirp::errors::ChirpError;
use chirpy_service::domain::chirp::models::Chirp;
use chirpy_service::domain::chirp::models::ChirpId;
use chirpy_service::domain::chirp::ports::ChirpRepository;
use chirpy_service::domain::session::errors::AuthError;
use chirpy_service::domain::session::models::RefreshToken;
use chirpy_service::domain::session::ports::RefreshTokenRepository;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::EmailAddress;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserRepository;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::AuthService;
use chirpy_service::ChirpService;
use chirpy_service::RefreshTokenStore;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Arc<InMemoryDatabase>,
    pub api_client: reqwest::Client,
}

/// In-memory stand-in for the Postgres schema.
///
/// One value backs all three repository ports so that deleting users
/// cascades the way the foreign keys do.
#[derive(Default)]
pub struct InMemoryDatabase {
    users: Mutex<HashMap<UserId, User>>,
    chirps: Mutex<Vec<Chirp>>,
    refresh_tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryDatabase {
    pub fn refresh_token_count(&self) -> usize {
        self.refresh_tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryDatabase {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.id != *id && u.email == *email) {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.email = email.clone();
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let mut users = self.users.lock().unwrap();
        let deleted = users.len() as u64;
        users.clear();
        self.chirps.lock().unwrap().clear();
        self.refresh_tokens.lock().unwrap().clear();
        Ok(deleted)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryDatabase {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, AuthError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        if tokens.contains_key(&token.token) {
            return Err(AuthError::Storage("refresh token value collision".to_string()));
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.refresh_tokens.lock().unwrap().get(token).cloned())
    }

    async fn mark_revoked(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, AuthError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        match tokens.get_mut(token) {
            Some(row) => {
                row.revoked_at.get_or_insert(revoked_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|_, row| row.expires_at > now);
        Ok((before - tokens.len()) as u64)
    }
}

#[async_trait]
impl ChirpRepository for InMemoryDatabase {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        if !self.users.lock().unwrap().contains_key(&chirp.user_id) {
            return Err(ChirpError::DatabaseError(
                "violates foreign key constraint chirps_user_id_fkey".to_string(),
            ));
        }
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps = self.chirps.lock().unwrap().clone();
        chirps.sort_by_key(|c| c.created_at);
        Ok(chirps)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.iter().find(|c| c.id == *id).cloned())
    }

    async fn delete(&self, id: &ChirpId, user_id: &UserId) -> Result<bool, ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| !(c.id == *id && c.user_id == *user_id));
        Ok(chirps.len() < before)
    }
}

impl TestApp {
    /// Spawn the application with a one hour access token lifetime
    pub async fn spawn() -> Self {
        Self::spawn_with(Duration::hours(1), Platform::Production).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with(access_ttl: Duration, platform: Platform) -> Self {
        let db = Arc::new(InMemoryDatabase::default());

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, access_ttl));
        let refresh_tokens = Arc::new(RefreshTokenStore::new(
            Arc::clone(&db),
            Duration::days(60),
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&db),
            refresh_tokens,
            authenticator,
        ));
        let chirp_service = Arc::new(ChirpService::new(Arc::clone(&db)));

        let router = create_router(auth_service, chirp_service, platform);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            db,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response body
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response.json().await.expect("Failed to parse response")
    }

    /// Post a chirp as the owner of `token`
    pub async fn create_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.post("/api/chirps")
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
