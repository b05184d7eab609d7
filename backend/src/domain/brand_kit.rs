//! Per-user brand kits: palette, logo, fonts and reusable elements.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// Default primary colour.
pub const DEFAULT_PRIMARY_COLOR: &str = "#00525b";
/// Default secondary colour.
pub const DEFAULT_SECONDARY_COLOR: &str = "#01aac7";
/// Default accent colour.
pub const DEFAULT_ACCENT_COLOR: &str = "#32e0c5";

static HEX_COLOR_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn hex_color_regex() -> Option<&'static Regex> {
    HEX_COLOR_RE
        .get_or_init(|| Regex::new("^#[0-9A-Fa-f]{6}$").ok())
        .as_ref()
}

/// Which palette slot a colour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    /// `primaryColor`.
    Primary,
    /// `secondaryColor`.
    Secondary,
    /// `accentColor`.
    Accent,
}

impl ColorSlot {
    /// JSON field name of the slot.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Primary => "primaryColor",
            Self::Secondary => "secondaryColor",
            Self::Accent => "accentColor",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Accent => "Accent",
        }
    }
}

/// Validation failures for brand kit input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrandKitValidationError {
    /// A palette colour is not `#RRGGBB`.
    #[error("{} color must be a valid hex color", .slot.label())]
    InvalidColor {
        /// Offending slot.
        slot: ColorSlot,
    },
    /// A font entry has a blank name.
    #[error("font name must not be empty")]
    EmptyFontName {
        /// Position in the submitted list.
        index: usize,
    },
    /// A custom element has a blank name.
    #[error("custom element name must not be empty")]
    EmptyElementName {
        /// Position in the submitted list.
        index: usize,
    },
    /// A custom element has no payload.
    #[error("custom element data must not be empty")]
    EmptyElementData {
        /// Position in the submitted list.
        index: usize,
    },
}

/// Colour in `#RRGGBB` form; letter case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Validate a colour for `slot`.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::{ColorSlot, HexColor};
    ///
    /// assert!(HexColor::new("#00525B", ColorSlot::Primary).is_ok());
    /// assert!(HexColor::new("00525b", ColorSlot::Primary).is_err());
    /// ```
    pub fn new(raw: impl Into<String>, slot: ColorSlot) -> Result<Self, BrandKitValidationError> {
        let raw = raw.into();
        let valid = hex_color_regex().is_some_and(|regex| regex.is_match(&raw));
        if valid {
            Ok(Self(raw))
        } else {
            Err(BrandKitValidationError::InvalidColor { slot })
        }
    }

    fn constant(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logo stored inline as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandLogo {
    /// `data:<mime>;base64,...` URL.
    pub data: String,
    /// Original filename.
    #[serde(default)]
    pub filename: Option<String>,
    /// Image mime type.
    #[serde(default)]
    pub mimetype: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Font available to the user's designs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandFont {
    /// Family name.
    pub name: String,
    /// Stylesheet or font file URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether the editor preselects the font.
    #[serde(default)]
    pub is_default: bool,
}

/// Kind of reusable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomElementKind {
    /// Vector shape.
    Shape,
    /// Icon.
    Icon,
    /// Fill pattern.
    Pattern,
}

/// Reusable element such as an icon or pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomElement {
    /// Display name.
    pub name: String,
    /// Element kind.
    #[serde(rename = "type")]
    pub kind: CustomElementKind,
    /// SVG markup or base64 payload.
    pub data: String,
    /// Optional grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A user's saved brand kit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandKit {
    /// Identifier.
    pub id: Uuid,
    /// Owner; one kit per user.
    pub user_id: UserId,
    /// Primary colour.
    pub primary_color: HexColor,
    /// Secondary colour.
    pub secondary_color: HexColor,
    /// Accent colour.
    pub accent_color: HexColor,
    /// Inline logo.
    pub logo: Option<BrandLogo>,
    /// Fonts.
    pub fonts: Vec<BrandFont>,
    /// Reusable elements.
    pub custom_elements: Vec<CustomElement>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl BrandKit {
    /// Fresh kit with the default palette.
    #[must_use]
    pub fn with_defaults(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            primary_color: HexColor::constant(DEFAULT_PRIMARY_COLOR),
            secondary_color: HexColor::constant(DEFAULT_SECONDARY_COLOR),
            accent_color: HexColor::constant(DEFAULT_ACCENT_COLOR),
            logo: None,
            fonts: Vec::new(),
            custom_elements: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` keeps the stored value.
///
/// `logo: Some(None)` clears the logo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandKitPatch {
    /// New primary colour.
    pub primary_color: Option<HexColor>,
    /// New secondary colour.
    pub secondary_color: Option<HexColor>,
    /// New accent colour.
    pub accent_color: Option<HexColor>,
    /// New logo, or `Some(None)` to remove it.
    pub logo: Option<Option<BrandLogo>>,
    /// Replacement font list.
    pub fonts: Option<Vec<BrandFont>>,
    /// Replacement element list.
    pub custom_elements: Option<Vec<CustomElement>>,
}

impl BrandKitPatch {
    /// Check list entries that the type system cannot.
    pub fn validate(&self) -> Result<(), BrandKitValidationError> {
        if let Some(fonts) = &self.fonts {
            if let Some(index) = fonts.iter().position(|font| font.name.trim().is_empty()) {
                return Err(BrandKitValidationError::EmptyFontName { index });
            }
        }
        if let Some(elements) = &self.custom_elements {
            for (index, element) in elements.iter().enumerate() {
                if element.name.trim().is_empty() {
                    return Err(BrandKitValidationError::EmptyElementName { index });
                }
                if element.data.is_empty() {
                    return Err(BrandKitValidationError::EmptyElementData { index });
                }
            }
        }
        Ok(())
    }

    /// Apply the patch, stamping `updated_at`.
    #[must_use]
    pub fn apply_to(self, mut kit: BrandKit, now: DateTime<Utc>) -> BrandKit {
        if let Some(color) = self.primary_color {
            kit.primary_color = color;
        }
        if let Some(color) = self.secondary_color {
            kit.secondary_color = color;
        }
        if let Some(color) = self.accent_color {
            kit.accent_color = color;
        }
        if let Some(logo) = self.logo {
            kit.logo = logo;
        }
        if let Some(fonts) = self.fonts {
            kit.fonts = fonts;
        }
        if let Some(elements) = self.custom_elements {
            kit.custom_elements = elements;
        }
        kit.updated_at = now;
        kit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#00525b")]
    #[case("#ABCDEF")]
    #[case("#aBc123")]
    fn accepts_six_digit_hex(#[case] raw: &str) {
        assert!(HexColor::new(raw, ColorSlot::Accent).is_ok());
    }

    #[rstest]
    #[case("00525b")]
    #[case("#fff")]
    #[case("#00525g")]
    #[case("#00525b ")]
    fn rejects_other_colour_forms(#[case] raw: &str) {
        assert_eq!(
            HexColor::new(raw, ColorSlot::Secondary),
            Err(BrandKitValidationError::InvalidColor {
                slot: ColorSlot::Secondary
            })
        );
    }

    #[rstest]
    fn colour_error_names_the_slot() {
        let err = HexColor::new("red", ColorSlot::Primary).expect_err("invalid colour");
        assert_eq!(err.to_string(), "Primary color must be a valid hex color");
    }

    #[rstest]
    fn defaults_use_house_palette() {
        let kit = BrandKit::with_defaults(UserId::random(), Utc::now());
        assert_eq!(kit.primary_color.as_ref(), "#00525b");
        assert_eq!(kit.secondary_color.as_ref(), "#01aac7");
        assert_eq!(kit.accent_color.as_ref(), "#32e0c5");
        assert!(kit.logo.is_none());
    }

    #[rstest]
    fn patch_can_clear_logo_and_keep_colours() {
        let now = Utc::now();
        let mut kit = BrandKit::with_defaults(UserId::random(), now);
        kit.logo = Some(BrandLogo {
            data: "data:image/png;base64,AA==".to_owned(),
            filename: None,
            mimetype: None,
            size: None,
        });
        let patch = BrandKitPatch {
            logo: Some(None),
            ..BrandKitPatch::default()
        };

        let updated = patch.apply_to(kit, now);

        assert!(updated.logo.is_none());
        assert_eq!(updated.primary_color.as_ref(), DEFAULT_PRIMARY_COLOR);
    }

    #[rstest]
    fn patch_validation_flags_blank_names() {
        let patch = BrandKitPatch {
            fonts: Some(vec![
                BrandFont {
                    name: "Inter".to_owned(),
                    url: None,
                    is_default: true,
                },
                BrandFont {
                    name: " ".to_owned(),
                    url: None,
                    is_default: false,
                },
            ]),
            ..BrandKitPatch::default()
        };
        assert_eq!(
            patch.validate(),
            Err(BrandKitValidationError::EmptyFontName { index: 1 })
        );
    }

    #[rstest]
    fn custom_elements_use_type_field() {
        let element: CustomElement = serde_json::from_value(serde_json::json!({
            "name": "Roof", "type": "icon", "data": "<svg/>"
        }))
        .expect("element");
        assert_eq!(element.kind, CustomElementKind::Icon);
    }
}
