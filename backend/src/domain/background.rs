//! Per-user background images attached to a template while editing.
//!
//! Backgrounds are short-lived: each one expires a day after it is saved and
//! a user keeps at most one per template.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// How long a saved background stays retrievable.
pub const BACKGROUND_TTL_HOURS: i64 = 24;

/// Validation failures for background input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackgroundValidationError {
    /// A required field was blank.
    #[error("Missing required fields: templateId, userId, imageData, imageType")]
    MissingFields,
    /// The background id is not a UUID.
    #[error("Invalid background ID format")]
    InvalidId,
}

/// Background identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BackgroundId(Uuid);

impl BackgroundId {
    /// Parse an identifier from request text.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BackgroundValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| BackgroundValidationError::InvalidId)
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BackgroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored background.
///
/// `template_ref` is either a template id or a template key; the editor uses
/// keys for templates that have not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBackground {
    /// Identifier.
    pub id: BackgroundId,
    /// Template id or key.
    pub template_ref: String,
    /// Owner.
    pub user_id: UserId,
    /// Base64 image payload.
    pub image_data: String,
    /// Image mime type.
    pub image_type: String,
    /// Display filename.
    pub file_name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time after which the background is no longer served.
    pub expires_at: DateTime<Utc>,
}

impl TemplateBackground {
    /// Whether the background has lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Validated request to store a background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBackground {
    template_ref: String,
    user_id: UserId,
    image_data: String,
    image_type: String,
    file_name: Option<String>,
}

impl NewBackground {
    /// Validate raw fields. The user id is parsed separately so callers can
    /// report its format error distinctly.
    pub fn new(
        template_ref: &str,
        user_id: UserId,
        image_data: &str,
        image_type: &str,
        file_name: Option<&str>,
    ) -> Result<Self, BackgroundValidationError> {
        let template_ref = template_ref.trim();
        let image_type = image_type.trim();
        if template_ref.is_empty() || image_data.is_empty() || image_type.is_empty() {
            return Err(BackgroundValidationError::MissingFields);
        }
        Ok(Self {
            template_ref: template_ref.to_owned(),
            user_id,
            image_data: image_data.to_owned(),
            image_type: image_type.to_owned(),
            file_name: file_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
        })
    }

    /// Template id or key.
    #[must_use]
    pub fn template_ref(&self) -> &str {
        &self.template_ref
    }

    /// Owner.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Stamp the background with an id and its expiry.
    #[must_use]
    pub fn into_background(self, now: DateTime<Utc>) -> TemplateBackground {
        let file_name = self.file_name.unwrap_or_else(|| {
            format!(
                "background_{}_{}",
                self.template_ref,
                now.timestamp_millis()
            )
        });
        TemplateBackground {
            id: BackgroundId::random(),
            template_ref: self.template_ref,
            user_id: self.user_id,
            image_data: self.image_data,
            image_type: self.image_type,
            file_name,
            created_at: now,
            expires_at: now + Duration::hours(BACKGROUND_TTL_HOURS),
        }
    }
}
