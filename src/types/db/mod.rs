// Database entities (sea-orm models)
pub mod moderated_review;
pub mod refresh_token;
pub mod user;
