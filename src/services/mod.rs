pub mod ai;
pub mod news;
pub mod speech;
