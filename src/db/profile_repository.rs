use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_profile_id_by_clerk_id(
        &self,
        clerk_id: &str,
    ) -> Result<Option<Uuid>, sqlx::Error>;
}
