pub mod ai;
pub mod news;
pub mod revenuecat;
pub mod social;
pub mod tts;
