//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod extractor_config;
pub mod health;
pub mod notes;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod token_cookie;
pub mod users;

pub use error::ApiResult;
