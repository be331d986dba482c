pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod rates;
pub mod store;
