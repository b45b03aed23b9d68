pub mod admin;
pub mod auth;
pub mod board;
pub mod review;
