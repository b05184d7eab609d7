//! User accounts, subscription plans and profile data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Longest username the account store accepts.
pub const USERNAME_MAX: usize = 30;

/// Validation errors for user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier is not a UUID.
    #[error("Invalid user ID format")]
    InvalidId,
    /// The email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The plan name is not one of the known tiers.
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from request text.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::UserId;
    ///
    /// assert!(UserId::new("not-a-uuid").is_err());
    /// assert!(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address used as the sign-in identifier.
///
/// Only surrounding whitespace is removed; the address is otherwise stored
/// and compared exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Text before the first `@`, or the whole address when there is none.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(self.0.as_str())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Produce the `attempt`-th username candidate for an email.
///
/// Attempt 0 is the bare local part; later attempts append the attempt
/// number. The base is shortened so every candidate fits [`USERNAME_MAX`].
///
/// # Examples
/// ```
/// use studio_backend::domain::{Email, username_candidate};
///
/// let email = Email::new("ana@example.com").unwrap();
/// assert_eq!(username_candidate(&email, 0), "ana");
/// assert_eq!(username_candidate(&email, 2), "ana2");
/// ```
#[must_use]
pub fn username_candidate(email: &Email, attempt: u32) -> String {
    let suffix = if attempt == 0 {
        String::new()
    } else {
        attempt.to_string()
    };
    let budget = USERNAME_MAX.saturating_sub(suffix.len());
    let base: String = email.local_part().chars().take(budget).collect();
    format!("{base}{suffix}")
}

/// Subscription tier controlling access to Canva features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Plan {
    /// No Canva access.
    #[default]
    Free,
    /// Canva designs, templates and brand kits.
    Premium,
    /// Everything in Premium plus PDF export.
    #[serde(rename = "Ultra-Premium")]
    UltraPremium,
}

impl Plan {
    /// Wire name of the plan.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Premium => "Premium",
            Self::UltraPremium => "Ultra-Premium",
        }
    }

    /// Whether the plan may use any Canva integration.
    #[must_use]
    pub const fn includes_canva(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Whether the plan may export designs as PDF.
    #[must_use]
    pub const fn includes_pdf_export(self) -> bool {
        matches!(self, Self::UltraPremium)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Free" => Ok(Self::Free),
            "Premium" => Ok(Self::Premium),
            "Ultra-Premium" => Ok(Self::UltraPremium),
            other => Err(UserValidationError::UnknownPlan(other.to_owned())),
        }
    }
}

/// Free-text profile fields; each defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Employer or agency.
    pub company: String,
    /// Job title.
    pub position: String,
    /// City or region.
    pub location: String,
    /// Short biography.
    pub bio: String,
}

impl UserProfile {
    /// Trim every field, matching how the account store normalises input.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            company: self.company.trim().to_owned(),
            position: self.position.trim().to_owned(),
            location: self.location.trim().to_owned(),
            bio: self.bio.trim().to_owned(),
        }
    }
}

/// Notification and locale preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// Product notifications.
    pub notifications: bool,
    /// Marketing email opt-in.
    pub marketing: bool,
    /// UI language code.
    pub language: String,
    /// IANA timezone name.
    pub timezone: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            notifications: true,
            marketing: false,
            language: "es".to_owned(),
            timezone: "Europe/Madrid".to_owned(),
        }
    }
}

/// Partial preferences as sent by clients; absent fields keep the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    /// Product notifications.
    pub notifications: Option<bool>,
    /// Marketing email opt-in.
    pub marketing: Option<bool>,
    /// UI language code.
    pub language: Option<String>,
    /// IANA timezone name.
    pub timezone: Option<String>,
}

impl PreferencesPatch {
    /// Overlay the patch on `base`.
    #[must_use]
    pub fn apply_to(self, base: UserPreferences) -> UserPreferences {
        UserPreferences {
            notifications: self.notifications.unwrap_or(base.notifications),
            marketing: self.marketing.unwrap_or(base.marketing),
            language: self.language.unwrap_or(base.language),
            timezone: self.timezone.unwrap_or(base.timezone),
        }
    }
}

/// Persisted account.
///
/// The password hash never leaves the domain; HTTP payloads are built from
/// the individual accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identifier.
    pub id: UserId,
    /// Unique handle derived from the email at signup.
    pub username: String,
    /// Unique sign-in email.
    pub email: Email,
    /// Password hash produced by a `PasswordHasher`.
    pub password_hash: String,
    /// Subscription tier.
    pub plan: Plan,
    /// Profile text fields.
    pub profile: UserProfile,
    /// Notification and locale preferences.
    pub preferences: UserPreferences,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
