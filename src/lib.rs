pub mod access;
pub mod api;
pub mod app_data;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod services;
pub mod stores;
pub mod types;
