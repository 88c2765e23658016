// Export modules for testing
pub mod api;
pub mod auth;
pub mod config;
pub mod storage;
pub mod token;
