pub mod profile;
pub mod revenuecat;
pub mod subscription;
