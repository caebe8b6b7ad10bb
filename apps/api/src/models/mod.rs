pub mod resume;
pub mod user_stats;
