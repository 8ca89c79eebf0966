use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &PgRow) -> Result<RefreshToken, AuthError> {
        let column = |e: sqlx::Error| AuthError::Storage(e.to_string());

        Ok(RefreshToken {
            token: row.try_get("token").map_err(column)?,
            user_id: UserId(row.try_get("user_id").map_err(column)?),
            created_at: row.try_get("created_at").map_err(column)?,
            expires_at: row.try_get("expires_at").map_err(column)?,
            revoked_at: row.try_get("revoked_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at, revoked_at)
            VALUES ($1, $2, $3, $3, $4, $5)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("refresh_tokens_pkey")
                {
                    return AuthError::Storage("refresh token value collision".to_string());
                }
            }
            AuthError::Storage(e.to_string())
        })?;

        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, created_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn mark_revoked(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<bool, AuthError> {
        // Keeps the first revocation time
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, $2), updated_at = NOW()
            WHERE token = $1
            "#,
        )
        .bind(token)
        .bind(revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
