//! Uploaded files: storage areas, safe filenames and payload decoding.
//!
//! Files live in one of four areas under the uploads root and are addressed
//! by a bare filename. Anything that could escape the area (separators,
//! `..`, leading dots) is rejected before a path is ever built.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

/// Public URL prefix under which stored files are served.
pub const UPLOADS_PREFIX: &str = "/uploads";
/// Most files accepted by one multi-file upload.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

const ALLOWED_DOCUMENT_EXTENSIONS: [&str; 8] =
    ["pdf", "doc", "docx", "xls", "xlsx", "txt", "zip", "rar"];
const RANDOM_SUFFIX_MAX: u32 = 1_000_000_000;

/// Validation failures for file input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetValidationError {
    /// The filename is empty or could escape its storage area.
    #[error("Invalid filename")]
    InvalidFilename,
    /// The payload is not valid base64 or data-URL text.
    #[error("Upload data is not valid base64")]
    InvalidEncoding,
    /// The document extension is not on the allow-list.
    #[error("File type not allowed")]
    DisallowedFileType,
    /// An image endpoint received a non-image.
    #[error("Only image files are allowed")]
    NotAnImage,
}

/// Storage area under the uploads root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// General documents.
    Files,
    /// Uploaded images.
    Images,
    /// Saved editor documents.
    Designs,
    /// Rendered template thumbnails.
    Thumbnails,
}

impl AssetKind {
    /// Areas listed by the file inventory.
    pub const LISTED: [Self; 3] = [Self::Files, Self::Images, Self::Designs];

    /// Directory name below the uploads root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Images => "images",
            Self::Designs => "designs",
            Self::Thumbnails => "thumbnails",
        }
    }

    /// Area named by a `type` query value; anything unknown means files.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("images") => Self::Images,
            Some("designs") => Self::Designs,
            Some("thumbnails") => Self::Thumbnails,
            _ => Self::Files,
        }
    }

    fn from_dir_name(raw: &str) -> Option<Self> {
        [Self::Files, Self::Images, Self::Designs, Self::Thumbnails]
            .into_iter()
            .find(|kind| kind.dir_name() == raw)
    }
}

/// A filename that cannot address anything outside its area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AssetFilename(String);

impl AssetFilename {
    /// Validate a bare filename.
    ///
    /// # Examples
    /// ```
    /// use studio_backend::domain::AssetFilename;
    ///
    /// assert!(AssetFilename::new("design-1.json").is_ok());
    /// assert!(AssetFilename::new("../secrets").is_err());
    /// assert!(AssetFilename::new(".env").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, AssetValidationError> {
        let raw = raw.into();
        let forbidden = raw.is_empty()
            || raw.starts_with('.')
            || raw.contains(['/', '\\', '\0'])
            || raw.contains("..");
        if forbidden {
            return Err(AssetValidationError::InvalidFilename);
        }
        Ok(Self(raw))
    }

    /// Lower-cased extension without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Name without the extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(stem, _)| stem)
    }
}

impl AsRef<str> for AssetFilename {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file in a specific area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetLocation {
    /// Area.
    pub kind: AssetKind,
    /// Name within the area.
    pub filename: AssetFilename,
}

impl AssetLocation {
    /// Construct a location.
    #[must_use]
    pub const fn new(kind: AssetKind, filename: AssetFilename) -> Self {
        Self { kind, filename }
    }

    /// `/uploads/<area>/<filename>`.
    #[must_use]
    pub fn public_path(&self) -> String {
        format!("{UPLOADS_PREFIX}/{}/{}", self.kind.dir_name(), self.filename)
    }

    /// Parse a public path produced by [`Self::public_path`].
    ///
    /// Returns `None` for anything else, including the default thumbnail.
    #[must_use]
    pub fn from_public_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(UPLOADS_PREFIX)?.strip_prefix('/')?;
        let (dir, name) = rest.split_once('/')?;
        let kind = AssetKind::from_dir_name(dir)?;
        AssetFilename::new(name)
            .ok()
            .map(|filename| Self::new(kind, filename))
    }
}

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredAsset {
    /// Filename within its area.
    #[schema(value_type = String)]
    pub filename: AssetFilename,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, when the filesystem reports one.
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified: Option<DateTime<Utc>>,
    /// Public path.
    pub path: String,
}

/// Bytes decoded from a base64 or data-URL payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// Mime type declared by a data URL.
    pub mime: Option<String>,
}

/// Decode `data:<mime>;base64,<data>` or bare base64.
///
/// # Examples
/// ```
/// use studio_backend::domain::decode_payload;
///
/// let decoded = decode_payload("data:image/png;base64,aGk=").unwrap();
/// assert_eq!(decoded.bytes, b"hi");
/// assert_eq!(decoded.mime.as_deref(), Some("image/png"));
/// ```
pub fn decode_payload(raw: &str) -> Result<DecodedPayload, AssetValidationError> {
    let (mime, data) = match raw.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or(AssetValidationError::InvalidEncoding)?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or(AssetValidationError::InvalidEncoding)?;
            (Some(mime.to_owned()).filter(|m| !m.is_empty()), data)
        }
        None => (None, raw),
    };
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|_| AssetValidationError::InvalidEncoding)?;
    Ok(DecodedPayload { bytes, mime })
}

/// Whether a document upload named `filename` is allowed.
pub fn ensure_document_allowed(filename: &AssetFilename) -> Result<(), AssetValidationError> {
    let allowed = filename
        .extension()
        .is_some_and(|ext| ALLOWED_DOCUMENT_EXTENSIONS.contains(&ext.as_str()));
    if allowed {
        Ok(())
    } else {
        Err(AssetValidationError::DisallowedFileType)
    }
}

/// Whether `content_type` names an image.
pub fn ensure_image(content_type: Option<&str>) -> Result<mime::Mime, AssetValidationError> {
    content_type
        .and_then(|raw| raw.parse::<mime::Mime>().ok())
        .filter(|parsed| parsed.type_() == mime::IMAGE)
        .ok_or(AssetValidationError::NotAnImage)
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..RANDOM_SUFFIX_MAX)
}

/// Filename generators for stored uploads.
pub mod names {
    use super::{AssetFilename, AssetValidationError, DateTime, Rng, Utc, random_suffix};

    fn build(name: String) -> Result<AssetFilename, AssetValidationError> {
        AssetFilename::new(name)
    }

    /// `<prefix>-<ms>-<random>.json` for saved designs.
    pub fn design<R: Rng + ?Sized>(
        prefix: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<AssetFilename, AssetValidationError> {
        build(format!(
            "{prefix}-{}-{}.json",
            now.timestamp_millis(),
            random_suffix(rng)
        ))
    }

    /// `thumbnail-<template>-<ms>.png` for editor-rendered thumbnails.
    pub fn editor_thumbnail(
        template_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<AssetFilename, AssetValidationError> {
        build(format!(
            "thumbnail-{template_ref}-{}.png",
            now.timestamp_millis()
        ))
    }

    /// `thumb-<ms>-<random>.png` for uploaded template thumbnails.
    pub fn template_thumbnail<R: Rng + ?Sized>(
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<AssetFilename, AssetValidationError> {
        build(format!(
            "thumb-{}-{}.png",
            now.timestamp_millis(),
            random_suffix(rng)
        ))
    }

    /// `<stem>-<ms>.<ext>`, keeping the uploaded name recognisable.
    pub fn document(
        original: &AssetFilename,
        now: DateTime<Utc>,
    ) -> Result<AssetFilename, AssetValidationError> {
        let millis = now.timestamp_millis();
        match original.extension() {
            Some(ext) => build(format!("{}-{millis}.{ext}", original.stem())),
            None => build(format!("{}-{millis}", original.stem())),
        }
    }

    /// `img-<ms>-<random><.ext>` for uploaded images.
    pub fn image<R: Rng + ?Sized>(
        original: Option<&AssetFilename>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<AssetFilename, AssetValidationError> {
        let ext = original
            .and_then(AssetFilename::extension)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        build(format!(
            "img-{}-{}{ext}",
            now.timestamp_millis(),
            random_suffix(rng)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("../etc/passwd")]
    #[case("a/b.json")]
    #[case("a\\b.json")]
    #[case(".hidden")]
    #[case("x..y")]
    fn rejects_unsafe_filenames(#[case] raw: &str) {
        assert_eq!(
            AssetFilename::new(raw),
            Err(AssetValidationError::InvalidFilename)
        );
    }

    #[rstest]
    fn splits_stem_and_extension() {
        let name = AssetFilename::new("Report.Final.PDF").expect("valid");
        assert_eq!(name.stem(), "Report.Final");
        assert_eq!(name.extension().as_deref(), Some("pdf"));
    }

    #[rstest]
    #[case("/uploads/thumbnails/thumb-1-2.png", Some(AssetKind::Thumbnails))]
    #[case("/uploads/designs/design-1.json", Some(AssetKind::Designs))]
    #[case("/uploads/default-thumbnail.png", None)]
    #[case("/uploads/thumbnails/../x", None)]
    #[case("/static/x.png", None)]
    fn parses_public_paths(#[case] path: &str, #[case] kind: Option<AssetKind>) {
        let parsed = AssetLocation::from_public_path(path);
        assert_eq!(parsed.as_ref().map(|loc| loc.kind), kind);
        if let Some(location) = parsed {
            assert_eq!(location.public_path(), path);
        }
    }

    #[rstest]
    #[case(Some("images"), AssetKind::Images)]
    #[case(Some("designs"), AssetKind::Designs)]
    #[case(Some("files"), AssetKind::Files)]
    #[case(Some("other"), AssetKind::Files)]
    #[case(None, AssetKind::Files)]
    fn query_selects_area(#[case] raw: Option<&str>, #[case] expected: AssetKind) {
        assert_eq!(AssetKind::from_query(raw), expected);
    }

    #[rstest]
    fn decodes_bare_base64() {
        let decoded = decode_payload("aGVsbG8=").expect("valid base64");
        assert_eq!(decoded.bytes, b"hello");
        assert!(decoded.mime.is_none());
    }

    #[rstest]
    #[case("data:image/png,aGk=")]
    #[case("data:image/png;base64")]
    #[case("not base64!")]
    fn rejects_malformed_payloads(#[case] raw: &str) {
        assert_eq!(
            decode_payload(raw),
            Err(AssetValidationError::InvalidEncoding)
        );
    }

    #[rstest]
    #[case("contract.pdf", true)]
    #[case("sheet.XLSX", true)]
    #[case("archive.rar", true)]
    #[case("script.sh", false)]
    #[case("README", false)]
    fn document_allow_list(#[case] raw: &str, #[case] allowed: bool) {
        let name = AssetFilename::new(raw).expect("valid");
        assert_eq!(ensure_document_allowed(&name).is_ok(), allowed);
    }

    #[rstest]
    #[case(Some("image/jpeg"), true)]
    #[case(Some("image/svg+xml"), true)]
    #[case(Some("application/pdf"), false)]
    #[case(None, false)]
    fn image_check(#[case] content_type: Option<&str>, #[case] ok: bool) {
        assert_eq!(ensure_image(content_type).is_ok(), ok);
    }

    #[rstest]
    fn generated_names_follow_conventions() {
        let now = Utc
            .timestamp_millis_opt(1_700_000_000_123)
            .single()
            .expect("valid timestamp");
        let mut rng = SmallRng::seed_from_u64(1);

        let design = names::design("design-large", now, &mut rng).expect("name");
        assert!(design.as_ref().starts_with("design-large-1700000000123-"));
        assert_eq!(design.extension().as_deref(), Some("json"));

        let editor = names::editor_thumbnail("template_1_abc", now).expect("name");
        assert_eq!(editor.as_ref(), "thumbnail-template_1_abc-1700000000123.png");

        let original = AssetFilename::new("plan.docx").expect("valid");
        let document = names::document(&original, now).expect("name");
        assert_eq!(document.as_ref(), "plan-1700000000123.docx");

        let image = names::image(Some(&AssetFilename::new("a.JPG").expect("valid")), now, &mut rng)
            .expect("name");
        assert!(image.as_ref().starts_with("img-1700000000123-"));
        assert!(image.as_ref().ends_with(".jpg"));
    }

    #[rstest]
    fn editor_thumbnail_rejects_path_like_refs() {
        let now = Utc::now();
        assert!(names::editor_thumbnail("../../x", now).is_err());
    }
}
