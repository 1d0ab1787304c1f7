use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::profile_repository::ProfileRepository;

pub struct PostgresProfileRepository {
    pub pool: PgPool,
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_profile_id_by_clerk_id(
        &self,
        clerk_id: &str,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM profiles WHERE clerk_id = $1")
                .bind(clerk_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id,)| id))
    }
}
