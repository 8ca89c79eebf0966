use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Post a new chirp on behalf of `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_chirp(&self, user_id: UserId, body: ChirpBody) -> Result<Chirp, ChirpError>;

    /// List every chirp, oldest first.
    async fn list_chirps(&self) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve chirp by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError>;

    /// Delete a chirp owned by `user_id`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - Chirp belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_chirp(&self, user_id: UserId, id: ChirpId) -> Result<(), ChirpError>;
}

/// Repository port for chirp persistence operations.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist a new chirp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed, including an unknown author
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// All chirps ordered by `created_at` ascending.
    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Delete a chirp if it is owned by `user_id`.
    ///
    /// # Returns
    /// `true` if a row was deleted
    async fn delete(&self, id: &ChirpId, user_id: &UserId) -> Result<bool, ChirpError>;
}
