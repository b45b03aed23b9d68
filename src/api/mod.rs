pub mod account;
pub mod admin;
pub mod auth;
pub mod games;
pub mod health;
pub mod helpers;

pub use account::AccountApi;
pub use admin::AdminApi;
pub use auth::AuthApi;
pub use games::GamesApi;
pub use health::HealthApi;
