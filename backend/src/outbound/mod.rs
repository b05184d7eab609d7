//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **storage**: uploaded files under the uploads root
//! - **canva**: the Canva REST API over reqwest
//! - **security**: bcrypt password hashing and JWT signing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod canva;
pub mod persistence;
pub mod security;
pub mod storage;
