use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::user::models::UserId;

pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_chirp(row: &PgRow) -> Result<Chirp, ChirpError> {
        let column = |e: sqlx::Error| ChirpError::DatabaseError(e.to_string());

        Ok(Chirp {
            id: ChirpId(row.try_get("id").map_err(column)?),
            user_id: UserId(row.try_get("user_id").map_err(column)?),
            body: ChirpBody::new(row.try_get("body").map_err(column)?)?,
            created_at: row.try_get("created_at").map_err(column)?,
            updated_at: row.try_get("updated_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        sqlx::query(
            r#"
            INSERT INTO chirps (id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chirp.id.0)
        .bind(chirp.user_id.0)
        .bind(chirp.body.as_str())
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(chirp)
    }

    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM chirps
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_chirp).collect()
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_chirp).transpose()
    }

    async fn delete(&self, id: &ChirpId, user_id: &UserId) -> Result<bool, ChirpError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ChirpError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
