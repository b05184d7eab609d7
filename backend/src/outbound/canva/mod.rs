//! Reqwest adapter for the Canva REST API.

mod dto;
mod http_client;

pub use http_client::{CanvaCredentials, CanvaHttpClient};
