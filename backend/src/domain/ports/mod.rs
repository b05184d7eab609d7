//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, stores, outbound clients) are implemented by
//! `outbound` adapters; driving ports are implemented by domain services and
//! called from `inbound` adapters.

mod macros;
pub(crate) use macros::define_port_error;

/// Reason reported by fixture repositories when asked to persist anything.
pub(crate) const NO_DATABASE: &str = "no database configured";

mod accounts;
mod asset_store;
mod background_repository;
mod backgrounds;
mod brand_kit_repository;
mod brand_kits;
mod canva;
mod canva_client;
mod canva_token_provider;
mod connectivity_check;
mod design_files;
mod password_hasher;
mod template_repository;
mod templates;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use accounts::MockAccountService;
pub use accounts::{AccountService, ProfileUpdate, SignInResult, SignupRequest};
#[cfg(test)]
pub use asset_store::MockAssetStore;
pub use asset_store::{AssetStore, AssetStoreError, FixtureAssetStore};
#[cfg(test)]
pub use background_repository::MockBackgroundRepository;
pub use background_repository::{
    BackgroundPersistenceError, BackgroundRepository, FixtureBackgroundRepository,
};
pub use backgrounds::Backgrounds;
#[cfg(test)]
pub use backgrounds::MockBackgrounds;
#[cfg(test)]
pub use brand_kit_repository::MockBrandKitRepository;
pub use brand_kit_repository::{
    BrandKitPersistenceError, BrandKitRepository, FixtureBrandKitRepository,
};
#[cfg(test)]
pub use brand_kits::MockBrandKits;
pub use brand_kits::{BrandKitView, BrandKits};
pub use canva::CanvaService;
#[cfg(test)]
pub use canva::MockCanvaService;
#[cfg(test)]
pub use canva_client::MockCanvaClient;
pub use canva_client::{CanvaClient, CanvaClientError, FixtureCanvaClient};
#[cfg(test)]
pub use canva_token_provider::MockCanvaTokenProvider;
pub use canva_token_provider::{CanvaTokenError, CanvaTokenProvider, FixtureCanvaTokenProvider};
#[cfg(test)]
pub use connectivity_check::MockConnectivityCheck;
pub use connectivity_check::{ConnectivityCheck, FixtureConnectivityCheck};
#[cfg(test)]
pub use design_files::MockDesignFiles;
pub use design_files::{
    AssetInventory, CleanupReport, DesignFiles, DesignVariant, SavedFile, ThumbnailUpload,
    UploadFile, UploadedAsset,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::{
    FixtureTemplateRepository, TemplatePersistenceError, TemplateRepository,
};
#[cfg(test)]
pub use templates::{MockTemplatesCommand, MockTemplatesQuery};
pub use templates::{TemplateSelector, TemplatesCommand, TemplatesQuery};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
