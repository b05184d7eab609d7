//! Starter content for newly created templates.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::{Value, json};

use super::{
    CanvasObject, CanvasObjectKind, DEFAULT_BACKGROUND_COLOR, DEFAULT_THUMBNAIL, Dimensions,
    Template, TemplateId, TemplateKey, TemplateType,
};
use crate::domain::UserId;

const REAL_ESTATE_LAYOUT: &str = include_str!("../../../fixtures/layouts/real-estate-flyer.json");

/// Identifier of the brand logo object injected at creation.
pub const BRAND_LOGO_OBJECT_ID: &str = "brand-logo";
const BRAND_ACCENT: &str = "#00525b";

/// The bundled layout could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("starter layout for {template_type} is invalid: {message}")]
pub struct LayoutError {
    template_type: TemplateType,
    message: String,
}

/// `"<Label> - <Mon D, YYYY>"`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use studio_backend::domain::TemplateType;
/// use studio_backend::domain::template::defaults::default_name;
///
/// let day = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
/// assert_eq!(default_name(TemplateType::Story, day), "IG/FB/WSP Story - Mar 7, 2024");
/// ```
#[must_use]
pub fn default_name(template_type: TemplateType, on: DateTime<Utc>) -> String {
    format!("{} - {}", template_type.label(), on.format("%b %-d, %Y"))
}

fn text_object(id: &str, text: &str, color: &str, frame: [f64; 4]) -> CanvasObject {
    let [x, y, width, height] = frame;
    let mut object = CanvasObject::new(id, CanvasObjectKind::Text).placed(x, y, width, height);
    object.text = Some(text.to_owned());
    object.font = Some("Arial".to_owned());
    object.color = Some(color.to_owned());
    object
}

fn headline_and_body(
    headline: (&str, &str, [f64; 4]),
    body: (&str, &str, [f64; 4]),
) -> Vec<CanvasObject> {
    vec![
        text_object("1", headline.0, headline.1, headline.2),
        text_object("2", body.0, body.1, body.2),
    ]
}

/// Starter objects for `template_type`.
pub fn default_objects(template_type: TemplateType) -> Result<Vec<CanvasObject>, LayoutError> {
    let objects = match template_type {
        TemplateType::SquarePost => headline_and_body(
            ("Your Post Title", "#1D4ED8", [200.0, 200.0, 400.0, 60.0]),
            ("Add your content here", "#6B7280", [200.0, 300.0, 400.0, 40.0]),
        ),
        TemplateType::Story => headline_and_body(
            ("STORY TITLE", "#E91E63", [50.0, 200.0, 400.0, 60.0]),
            ("Your story content", "#9C27B0", [50.0, 300.0, 400.0, 50.0]),
        ),
        TemplateType::MarketplaceFlyer => headline_and_body(
            ("Your Flyer Headline", "#1D4ED8", [100.0, 100.0, 500.0, 60.0]),
            ("Add your content here", "#6B7280", [100.0, 200.0, 500.0, 40.0]),
        ),
        TemplateType::FbFeedBanner => headline_and_body(
            ("BANNER HEADLINE", "#1976D2", [100.0, 120.0, 600.0, 80.0]),
            ("Subtitle text here", "#388E3C", [100.0, 220.0, 600.0, 50.0]),
        ),
        TemplateType::DigitalBadge => headline_and_body(
            ("BADGE TITLE", "#FF9800", [150.0, 150.0, 400.0, 60.0]),
            ("Badge content here", "#795548", [150.0, 250.0, 400.0, 40.0]),
        ),
        TemplateType::Brochure => headline_and_body(
            ("Document Title", "#424242", [200.0, 150.0, 600.0, 80.0]),
            ("Document content here", "#616161", [200.0, 300.0, 600.0, 50.0]),
        ),
        TemplateType::RealEstateFlyer => {
            serde_json::from_str(REAL_ESTATE_LAYOUT).map_err(|err| LayoutError {
                template_type,
                message: err.to_string(),
            })?
        }
    };
    Ok(objects)
}

/// Image object placing the user's brand logo in the top-left corner.
#[must_use]
pub fn brand_logo_object(src: impl Into<String>) -> CanvasObject {
    let mut logo = CanvasObject::new(BRAND_LOGO_OBJECT_ID, CanvasObjectKind::Image)
        .placed(50.0, 50.0, 100.0, 60.0);
    logo.src = Some(src.into());
    logo.selectable = Some(true);
    logo.border_color = Some(BRAND_ACCENT.to_owned());
    let editor_flags = json!({
        "evented": true,
        "lockMovementX": false,
        "lockMovementY": false,
        "lockRotation": false,
        "lockScalingX": false,
        "lockScalingY": false,
        "cornerStyle": "circle",
        "cornerColor": BRAND_ACCENT,
        "cornerSize": 8,
        "transparentCorners": false,
        "borderScaleFactor": 1
    });
    if let Value::Object(flags) = editor_flags {
        logo.extra = flags;
    }
    logo
}

/// Validated create request.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    /// Format; decides category, defaults and layout.
    pub template_type: TemplateType,
    /// Name; defaults to [`default_name`].
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Canvas size; defaults per type.
    pub dimensions: Option<Dimensions>,
    /// Logo to place on the canvas.
    pub brand_kit_logo: Option<String>,
    /// Caller-chosen key; one is generated otherwise.
    pub template_key: Option<TemplateKey>,
    /// Real-estate gallery flag; defaults to true for real-estate flyers.
    pub is_real_estate: Option<bool>,
    /// Author.
    pub created_by: Option<UserId>,
}

impl TemplateDraft {
    /// Draft with only the type set.
    #[must_use]
    pub const fn new(template_type: TemplateType) -> Self {
        Self {
            template_type,
            name: None,
            description: None,
            dimensions: None,
            brand_kit_logo: None,
            template_key: None,
            is_real_estate: None,
            created_by: None,
        }
    }

    /// Materialise the draft into a full template.
    pub fn into_template<R: Rng + ?Sized>(
        self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Template, LayoutError> {
        let kind = self.template_type;
        let mut objects = default_objects(kind)?;
        if let Some(logo) = self.brand_kit_logo.filter(|logo| !logo.is_empty()) {
            objects.insert(0, brand_logo_object(logo));
        }
        let dimensions = self.dimensions.unwrap_or_else(|| kind.default_dimensions());
        Ok(Template {
            id: TemplateId::random(),
            template_key: Some(
                self.template_key
                    .unwrap_or_else(|| TemplateKey::generate(now, rng)),
            ),
            name: self
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| default_name(kind, now)),
            description: self.description,
            template_type: kind,
            category: kind.category(),
            thumbnail: DEFAULT_THUMBNAIL.to_owned(),
            thumbnail_filename: None,
            design_filename: None,
            file_url: None,
            dimensions,
            canvas_size: dimensions.canvas_size(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_owned(),
            background_image: None,
            objects,
            is_real_estate: self
                .is_real_estate
                .unwrap_or(matches!(kind, TemplateType::RealEstateFlyer)),
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Copy of `source` named `"<name> (Copy)"` with a fresh id and key.
pub fn duplicate<R: Rng + ?Sized>(source: &Template, now: DateTime<Utc>, rng: &mut R) -> Template {
    Template {
        id: TemplateId::random(),
        template_key: Some(TemplateKey::generate(now, rng)),
        name: format!("{} (Copy)", source.name),
        created_at: now,
        updated_at: now,
        ..source.clone()
    }
}
