//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod auth;
pub mod backgrounds;
pub mod brand_kit;
pub mod cache_control;
pub mod canva;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod template_assets;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
