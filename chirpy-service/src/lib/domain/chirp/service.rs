use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::models::Chirp;
use super::models::ChirpBody;
use super::models::ChirpId;
use super::ports::ChirpRepository;
use super::ports::ChirpServicePort;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::user::models::UserId;

/// Concrete implementation of ChirpServicePort.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    chirp_repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    /// # Arguments
    /// * `chirp_repository` - Chirp persistence implementation
    pub fn new(chirp_repository: Arc<CR>) -> Self {
        Self { chirp_repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, user_id: UserId, body: ChirpBody) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            user_id,
            body,
            created_at: now,
            updated_at: now,
        };

        let saved_chirp = self.chirp_repository.create(chirp).await?;
        tracing::debug!(chirp_id = %saved_chirp.id, user_id = %user_id, "Chirp created");

        Ok(saved_chirp)
    }

    async fn list_chirps(&self) -> Result<Vec<Chirp>, ChirpError> {
        self.chirp_repository.list_all().await
    }

    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError> {
        self.chirp_repository
            .find_by_id(&id)
            .await?
            .ok_or(ChirpError::NotFound(id))
    }

    async fn delete_chirp(&self, user_id: UserId, id: ChirpId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != user_id {
            tracing::warn!(chirp_id = %id, user_id = %user_id, "Delete of foreign chirp refused");
            return Err(ChirpError::Forbidden(id));
        }

        // Gone between lookup and delete
        if !self.chirp_repository.delete(&id, &user_id).await? {
            return Err(ChirpError::NotFound(id));
        }

        tracing::debug!(chirp_id = %id, user_id = %user_id, "Chirp deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestChirpRepository {}

        #[async_trait]
        impl ChirpRepository for TestChirpRepository {
            async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;
            async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;
            async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;
            async fn delete(&self, id: &ChirpId, user_id: &UserId) -> Result<bool, ChirpError>;
        }
    }

    fn chirp(user_id: UserId, body: &str) -> Chirp {
        let now = Utc::now();
        Chirp {
            id: ChirpId::new(),
            user_id,
            body: ChirpBody::new(body.to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_chirp_success() {
        let mut chirp_repository = MockTestChirpRepository::new();
        let user_id = UserId::new();

        chirp_repository
            .expect_create()
            .withf(move |chirp| chirp.user_id == user_id && chirp.body.as_str() == "hello")
            .times(1)
            .returning(|chirp| Ok(chirp));

        let service = ChirpService::new(Arc::new(chirp_repository));
        let created = service
            .create_chirp(user_id, ChirpBody::new("hello".to_string()).unwrap())
            .await
            .unwrap();

        assert_eq!(created.user_id, user_id);
        assert_eq!(created.body.as_str(), "hello");
    }

    #[tokio::test]
    async fn test_get_chirp_not_found() {
        let mut chirp_repository = MockTestChirpRepository::new();
        let id = ChirpId::new();

        chirp_repository
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(|_| Ok(None));

        let service = ChirpService::new(Arc::new(chirp_repository));
        let result = service.get_chirp(id).await;

        assert!(matches!(result, Err(ChirpError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_list_chirps_passes_through_order() {
        let mut chirp_repository = MockTestChirpRepository::new();
        let user_id = UserId::new();
        let chirps = vec![chirp(user_id, "first"), chirp(user_id, "second")];

        chirp_repository
            .expect_list_all()
            .times(1)
            .returning(move || Ok(chirps.clone()));

        let service = ChirpService::new(Arc::new(chirp_repository));
        let listed = service.list_chirps().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].body.as_str(), "first");
        assert_eq!(listed[1].body.as_str(), "second");
    }

    #[tokio::test]
    async fn test_delete_chirp_by_owner() {
        let mut chirp_repository = MockTestChirpRepository::new();
        let owner = UserId::new();
        let existing = chirp(owner, "mine");
        let id = existing.id;

        chirp_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        chirp_repository
            .expect_delete()
            .withf(move |chirp_id, user_id| *chirp_id == id && *user_id == owner)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = ChirpService::new(Arc::new(chirp_repository));
        assert!(service.delete_chirp(owner, id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_chirp_by_other_user_is_forbidden() {
        let mut chirp_repository = MockTestChirpRepository::new();
        let existing = chirp(UserId::new(), "not yours");
        let id = existing.id;

        chirp_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        chirp_repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(chirp_repository));
        let result = service.delete_chirp(UserId::new(), id).await;

        assert!(matches!(result, Err(ChirpError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_chirp() {
        let mut chirp_repository = MockTestChirpRepository::new();

        chirp_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        chirp_repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(chirp_repository));
        let result = service.delete_chirp(UserId::new(), ChirpId::new()).await;

        assert!(matches!(result, Err(ChirpError::NotFound(_))));
    }
}
