//! Translation of driven-port failures into API errors.
//!
//! Connection failures become `service_unavailable`; everything else is an
//! internal error whose message is logged and redacted at the HTTP edge.

use crate::domain::Error;
use crate::domain::ports::{
    AssetStoreError, BackgroundPersistenceError, BrandKitPersistenceError, CanvaTokenError,
    PasswordHashError, TemplatePersistenceError, UserPersistenceError,
};

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => {
            Error::conflict(format!("user {field} already in use"))
        }
    }
}

pub(crate) fn map_template_repository_error(error: TemplatePersistenceError) -> Error {
    match error {
        TemplatePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("template repository unavailable: {message}"))
        }
        TemplatePersistenceError::Query { message } => {
            Error::internal(format!("template repository error: {message}"))
        }
        TemplatePersistenceError::DuplicateKey { key } => {
            Error::conflict(format!("Template key {key} already exists"))
        }
        TemplatePersistenceError::Corrupt { message } => {
            Error::internal(format!("stored template is invalid: {message}"))
        }
    }
}

pub(crate) fn map_brand_kit_repository_error(error: BrandKitPersistenceError) -> Error {
    match error {
        BrandKitPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("brand kit repository unavailable: {message}"))
        }
        BrandKitPersistenceError::Query { message } => {
            Error::internal(format!("brand kit repository error: {message}"))
        }
        BrandKitPersistenceError::Corrupt { message } => {
            Error::internal(format!("stored brand kit is invalid: {message}"))
        }
    }
}

pub(crate) fn map_background_repository_error(error: BackgroundPersistenceError) -> Error {
    match error {
        BackgroundPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("background repository unavailable: {message}"))
        }
        BackgroundPersistenceError::Query { message } => {
            Error::internal(format!("background repository error: {message}"))
        }
    }
}

pub(crate) fn map_asset_store_error(error: AssetStoreError) -> Error {
    match error {
        AssetStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("asset store unavailable: {message}"))
        }
        AssetStoreError::Io { message } => Error::internal(format!("asset store error: {message}")),
    }
}

pub(crate) fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_canva_token_error(error: CanvaTokenError) -> Error {
    Error::internal(error.to_string())
}
