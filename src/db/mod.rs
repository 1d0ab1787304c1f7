pub mod mock_db;
pub mod postgres_profile_repository;
pub mod postgres_subscription_repository;
pub mod profile_repository;
pub mod subscription_repository;
