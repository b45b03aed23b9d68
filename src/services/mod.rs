pub mod aggregator;
pub mod crypto;
pub mod token_service;
