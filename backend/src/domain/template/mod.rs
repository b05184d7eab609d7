//! Template documents: identifiers, type catalogue and the persisted shape.
//!
//! A template is a named canvas (dimensions, background and an ordered list
//! of [`CanvasObject`]s). Each [`TemplateType`] fixes a category, a display
//! label, default dimensions and a starter layout; see [`defaults`].

pub mod canvas;
pub mod defaults;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub use self::canvas::{CanvasObject, CanvasObjectKind};

use crate::domain::UserId;

/// Public path of the placeholder thumbnail given to new templates.
pub const DEFAULT_THUMBNAIL: &str = "/uploads/default-thumbnail.png";
/// Background colour given to new templates.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

const KEY_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Errors raised while parsing template identifiers and types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateValidationError {
    /// No usable identifier was supplied.
    #[error("Invalid template ID")]
    MissingId,
    /// The identifier is not a UUID.
    #[error("Invalid template ID format")]
    InvalidIdFormat,
    /// The template key was blank.
    #[error("template key must not be empty")]
    EmptyKey,
    /// No template type was supplied.
    #[error("Template type is required")]
    MissingType,
    /// The template type is not in the catalogue.
    #[error("Invalid template type")]
    InvalidType,
    /// The category is not in the catalogue.
    #[error("Invalid template category")]
    InvalidCategory,
    /// Width or height is zero or does not fit the stored column.
    #[error("Dimensions must be between 1 and {max} pixels", max = Dimensions::MAX_SIDE)]
    InvalidDimensions,
}

/// Template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    /// Parse an identifier from a path or query value.
    ///
    /// Clients sometimes send the literal strings `undefined` or `null`;
    /// those are treated as missing.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::{TemplateId, TemplateValidationError};
    ///
    /// assert_eq!(TemplateId::new("null"), Err(TemplateValidationError::MissingId));
    /// assert_eq!(TemplateId::new("abc"), Err(TemplateValidationError::InvalidIdFormat));
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TemplateValidationError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() || raw == "undefined" || raw == "null" {
            return Err(TemplateValidationError::MissingId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| TemplateValidationError::InvalidIdFormat)
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client-visible unique key, independent of the database identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateKey(String);

impl TemplateKey {
    /// Validate a caller-supplied key.
    pub fn new(raw: impl Into<String>) -> Result<Self, TemplateValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TemplateValidationError::EmptyKey);
        }
        Ok(Self(raw))
    }

    /// Generate `template_<epoch ms>_<9 base36 chars>`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use studio_backend::domain::TemplateKey;
    ///
    /// let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    /// let key = TemplateKey::generate(at, &mut rand::thread_rng());
    /// assert!(key.as_ref().starts_with("template_1700000000000_"));
    /// ```
    pub fn generate<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Self {
        let suffix: String = (0..KEY_SUFFIX_LEN)
            .map(|_| {
                let index = rng.gen_range(0..BASE36.len());
                BASE36.get(index).map_or('0', |byte| char::from(*byte))
            })
            .collect();
        Self(format!("template_{}_{suffix}", now.timestamp_millis()))
    }
}

impl AsRef<str> for TemplateKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TemplateKey {
    type Error = TemplateValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateKey> for String {
    fn from(value: TemplateKey) -> Self {
        value.0
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Largest accepted side; sides are stored as signed 32-bit integers.
    pub const MAX_SIDE: u32 = i32::MAX.unsigned_abs();

    /// Construct dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reject zero sides and sides beyond [`Self::MAX_SIDE`].
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::Dimensions;
    ///
    /// assert!(Dimensions::new(1080, 1080).validated().is_ok());
    /// assert!(Dimensions::new(0, 1080).validated().is_err());
    /// ```
    pub fn validated(self) -> Result<Self, TemplateValidationError> {
        let in_range = |side: u32| (1..=Self::MAX_SIDE).contains(&side);
        if in_range(self.width) && in_range(self.height) {
            Ok(self)
        } else {
            Err(TemplateValidationError::InvalidDimensions)
        }
    }

    /// `"<width>x<height>"`, the legacy `canvasSize` string.
    #[must_use]
    pub fn canvas_size(self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Template formats offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateType {
    /// Instagram/Facebook square post.
    SquarePost,
    /// Vertical story.
    Story,
    /// Marketplace listing flyer.
    MarketplaceFlyer,
    /// Property flyer with the full starter layout.
    RealEstateFlyer,
    /// Facebook feed banner.
    FbFeedBanner,
    /// Portrait badge.
    DigitalBadge,
    /// A4 brochure.
    Brochure,
}

impl TemplateType {
    /// Every supported type.
    pub const ALL: [Self; 7] = [
        Self::SquarePost,
        Self::Story,
        Self::MarketplaceFlyer,
        Self::RealEstateFlyer,
        Self::FbFeedBanner,
        Self::DigitalBadge,
        Self::Brochure,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SquarePost => "square-post",
            Self::Story => "story",
            Self::MarketplaceFlyer => "marketplace-flyer",
            Self::RealEstateFlyer => "real-estate-flyer",
            Self::FbFeedBanner => "fb-feed-banner",
            Self::DigitalBadge => "digital-badge",
            Self::Brochure => "brochure",
        }
    }

    /// Parse a request value, distinguishing absent from unknown.
    pub fn parse(raw: Option<&str>) -> Result<Self, TemplateValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Err(TemplateValidationError::MissingType),
            Some(value) => value.parse(),
        }
    }

    /// Category the type is filed under.
    #[must_use]
    pub const fn category(self) -> TemplateCategory {
        match self {
            Self::SquarePost => TemplateCategory::SocialPosts,
            Self::Story => TemplateCategory::Stories,
            Self::MarketplaceFlyer | Self::RealEstateFlyer => TemplateCategory::Flyers,
            Self::FbFeedBanner => TemplateCategory::Banners,
            Self::DigitalBadge => TemplateCategory::Badges,
            Self::Brochure => TemplateCategory::Documents,
        }
    }

    /// Human label used in default names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SquarePost => "IG/FB Square Post",
            Self::Story => "IG/FB/WSP Story",
            Self::MarketplaceFlyer => "Marketplace Flyer",
            Self::RealEstateFlyer => "Real Estate Flyer",
            Self::FbFeedBanner => "FB Feed Banner",
            Self::DigitalBadge => "Digital Badge",
            Self::Brochure => "Brochure",
        }
    }

    /// Canvas size used when the client does not send one.
    #[must_use]
    pub const fn default_dimensions(self) -> Dimensions {
        match self {
            Self::SquarePost => Dimensions::new(1080, 1080),
            Self::Story => Dimensions::new(1080, 1920),
            Self::MarketplaceFlyer | Self::RealEstateFlyer => Dimensions::new(1200, 1500),
            Self::FbFeedBanner => Dimensions::new(1200, 628),
            Self::DigitalBadge => Dimensions::new(1080, 1350),
            Self::Brochure => Dimensions::new(2480, 3508),
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = TemplateValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(TemplateValidationError::InvalidType)
    }
}

/// Gallery categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    /// Square posts.
    SocialPosts,
    /// Stories.
    Stories,
    /// Flyers.
    Flyers,
    /// Banners.
    Banners,
    /// Badges.
    Badges,
    /// Brochures and other documents.
    Documents,
    /// Legacy marketplace flyer category.
    MarketplaceFlyers,
    /// Legacy Facebook banner category.
    FbBanners,
}

impl TemplateCategory {
    const ALL: [Self; 8] = [
        Self::SocialPosts,
        Self::Stories,
        Self::Flyers,
        Self::Banners,
        Self::Badges,
        Self::Documents,
        Self::MarketplaceFlyers,
        Self::FbBanners,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SocialPosts => "social-posts",
            Self::Stories => "stories",
            Self::Flyers => "flyers",
            Self::Banners => "banners",
            Self::Badges => "badges",
            Self::Documents => "documents",
            Self::MarketplaceFlyers => "marketplace-flyers",
            Self::FbBanners => "fb-banners",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = TemplateValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(TemplateValidationError::InvalidCategory)
    }
}

/// Persisted template document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Identifier.
    pub id: TemplateId,
    /// Optional unique client key.
    pub template_key: Option<TemplateKey>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Format.
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    /// Gallery category.
    pub category: TemplateCategory,
    /// Public thumbnail path.
    pub thumbnail: String,
    /// Thumbnail file saved through the design-file endpoints.
    pub thumbnail_filename: Option<String>,
    /// Saved editor document in the designs area.
    pub design_filename: Option<String>,
    /// Exported file location, if any.
    pub file_url: Option<String>,
    /// Canvas size.
    pub dimensions: Dimensions,
    /// Legacy `WxH` canvas size string.
    pub canvas_size: String,
    /// Canvas background colour.
    pub background_color: String,
    /// Canvas background image.
    pub background_image: Option<String>,
    /// Ordered canvas objects, bottom layer first.
    pub objects: Vec<CanvasObject>,
    /// Whether the template belongs to the real-estate gallery.
    pub is_real_estate: bool,
    /// Author, when created by a signed-in user.
    pub created_by: Option<UserId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Fields a client may change on an existing template.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplatePatch {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New format.
    pub template_type: Option<TemplateType>,
    /// New category.
    pub category: Option<TemplateCategory>,
    /// New thumbnail path.
    pub thumbnail: Option<String>,
    /// New thumbnail filename.
    pub thumbnail_filename: Option<String>,
    /// New design file; a non-empty value replaces the previous file.
    pub design_filename: Option<String>,
    /// New export location.
    pub file_url: Option<String>,
    /// New canvas size.
    pub dimensions: Option<Dimensions>,
    /// New `WxH` string.
    pub canvas_size: Option<String>,
    /// New background colour.
    pub background_color: Option<String>,
    /// New background image.
    pub background_image: Option<String>,
    /// Replacement object list.
    pub objects: Option<Vec<CanvasObject>>,
    /// New real-estate flag.
    pub is_real_estate: Option<bool>,
}

impl TemplatePatch {
    /// Whether the patch installs a new, non-empty design file.
    #[must_use]
    pub fn replaces_design(&self) -> bool {
        self.design_filename
            .as_deref()
            .is_some_and(|name| !name.is_empty())
    }

    /// Apply the patch, stamping `updated_at`.
    #[must_use]
    pub fn apply_to(self, mut template: Template, now: DateTime<Utc>) -> Template {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field { template.$field = value; })*
            };
        }
        macro_rules! overlay_optional {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field { template.$field = Some(value); })*
            };
        }
        overlay!(
            name,
            template_type,
            category,
            thumbnail,
            dimensions,
            canvas_size,
            background_color,
            objects,
            is_real_estate,
        );
        overlay_optional!(
            description,
            thumbnail_filename,
            design_filename,
            file_url,
            background_image,
        );
        template.updated_at = now;
        template
    }
}

/// Listing filter; every criterion is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    /// Restrict to one format.
    pub template_type: Option<TemplateType>,
    /// Restrict to one category.
    pub category: Option<TemplateCategory>,
    /// Only real-estate templates.
    pub real_estate_only: bool,
}

impl TemplateFilter {
    /// Whether `template` satisfies the filter.
    #[must_use]
    pub fn matches(&self, template: &Template) -> bool {
        self.template_type
            .is_none_or(|kind| kind == template.template_type)
            && self.category.is_none_or(|category| category == template.category)
            && (!self.real_estate_only || template.is_real_estate)
    }
}
