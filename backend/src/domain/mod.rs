//! Domain primitives, aggregates and the services behind the driving ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, plus the use-case services that inbound adapters call through
//! [`ports`]. Invariants and serde contracts live on each type.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: API error payload and stable identifier.
//! - `User`, `Template`, `BrandKit`, `TemplateBackground`: aggregates.
//! - `*Service` types: implementations of the driving ports.

pub mod account_service;
pub mod asset;
pub mod auth;
pub mod background;
pub mod background_service;
pub mod brand_kit;
pub mod brand_kit_service;
pub mod canva;
pub mod canva_service;
pub mod design_file_service;
pub mod error;
pub mod ports;
pub mod template;
pub mod template_service;
pub mod trace_id;
pub mod user;

mod service_support;

pub use self::account_service::AccountsService;
pub use self::asset::{
    AssetFilename, AssetKind, AssetLocation, AssetValidationError, DecodedPayload,
    MAX_FILES_PER_UPLOAD, StoredAsset, UPLOADS_PREFIX, decode_payload, ensure_document_allowed,
    ensure_image,
};
pub use self::auth::{
    BearerError, Credentials, CredentialsValidationError, IssuedToken, SessionClaims,
    bearer_token,
};
pub use self::background::{
    BACKGROUND_TTL_HOURS, BackgroundId, BackgroundValidationError, NewBackground,
    TemplateBackground,
};
pub use self::background_service::BackgroundService;
pub use self::brand_kit::{
    BrandFont, BrandKit, BrandKitPatch, BrandKitValidationError, BrandLogo, ColorSlot,
    CustomElement, CustomElementKind, DEFAULT_ACCENT_COLOR, DEFAULT_PRIMARY_COLOR,
    DEFAULT_SECONDARY_COLOR, HexColor,
};
pub use self::brand_kit_service::BrandKitService;
pub use self::canva::{
    CANVA_SCOPES, CANVA_TEMPLATE_CATEGORY, CANVA_TEMPLATE_LIMIT, CanvaBrandKit, CanvaDesign,
    CanvaExport, CanvaFeature, CanvaTemplate, CanvaTokens, ExportFormat,
};
pub use self::canva_service::CanvaPassThroughService;
pub use self::design_file_service::DesignFileService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::template::defaults::{LayoutError, TemplateDraft};
pub use self::template::{
    CanvasObject, CanvasObjectKind, DEFAULT_BACKGROUND_COLOR, DEFAULT_THUMBNAIL, Dimensions,
    Template, TemplateCategory, TemplateFilter, TemplateId, TemplateKey, TemplatePatch,
    TemplateType, TemplateValidationError,
};
pub use self::template_service::{TemplateCommandService, TemplateQueryService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, PreferencesPatch, Plan, USERNAME_MAX, User, UserId, UserPreferences, UserProfile,
    UserValidationError, username_candidate,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use studio_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
