//! Design documents, thumbnails and general uploads under `/api/templates`.
//!
//! Uploads arrive as JSON carrying base64 or `data:` URL payloads.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{DesignVariant, SavedFile, ThumbnailUpload, UploadFile, UploadedAsset};
use crate::domain::{AssetKind, AssetLocation, Error, TemplateId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_one_hour_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, decode_field, missing_field_error, parse_filename, parse_optional_filename,
};

const FILENAME: FieldName = FieldName::new("filename");

/// `?filename=` of `GET /api/templates/design`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DesignQuery {
    /// Stored design filename.
    pub filename: Option<String>,
}

/// `?type=` of `DELETE /api/templates/file/{filename}`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileAreaQuery {
    /// `images`, `designs` or `files` (the default).
    #[serde(rename = "type")]
    pub area: Option<String>,
}

/// Body of the design save routes.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveDesignBody {
    /// Editor document.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub design_data: Value,
    /// Name to store under; generated when absent.
    pub filename: Option<String>,
}

/// Body of `POST /api/templates/save-thumbnail`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveThumbnailBody {
    pub template_id: Option<String>,
    pub template_key: Option<String>,
    /// Base64 PNG or data URL.
    pub thumbnail_data: Option<String>,
}

/// One uploaded file.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    /// Name on the client.
    pub filename: Option<String>,
    /// Declared mime type; a `data:` URL's type is used when absent.
    pub content_type: Option<String>,
    /// Base64 or `data:` URL content.
    pub data: Option<String>,
}

/// Body of `POST /api/templates/upload-multiple`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UploadManyBody {
    #[serde(default)]
    pub files: Vec<UploadBody>,
}

/// Stored upload as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileResponse {
    pub filename: String,
    pub original_name: Option<String>,
    pub size: u64,
    pub mimetype: String,
    #[schema(example = "/uploads/files/Listing-1736411400000.pdf")]
    pub path: String,
}

impl From<UploadedAsset> for UploadedFileResponse {
    fn from(asset: UploadedAsset) -> Self {
        Self {
            filename: asset.filename.to_string(),
            original_name: asset.original_name,
            size: asset.size,
            mimetype: asset.mimetype,
            path: asset.path,
        }
    }
}

impl UploadBody {
    fn into_upload(self) -> Result<UploadFile, Error> {
        let decoded = match self.data.as_deref().filter(|data| !data.is_empty()) {
            Some(raw) => Some(decode_field(raw, FieldName::new("data"))?),
            None => None,
        };
        let (bytes, data_mime) = decoded
            .map(|payload| (payload.bytes, payload.mime))
            .unwrap_or_default();
        Ok(UploadFile {
            original_name: parse_optional_filename(self.filename.as_deref(), FILENAME)?,
            content_type: self
                .content_type
                .filter(|value| !value.trim().is_empty())
                .or(data_mime),
            bytes,
        })
    }
}

fn uploaded(asset: UploadedAsset, message: &str) -> HttpResponse {
    let body = UploadedFileResponse::from(asset);
    HttpResponse::Ok().json(json!({
        "success": true,
        "filename": body.filename,
        "originalName": body.original_name,
        "size": body.size,
        "mimetype": body.mimetype,
        "path": body.path,
        "message": message,
    }))
}

/// Inventory of stored files.
#[utoipa::path(
    get,
    path = "/api/templates/files",
    responses(
        (status = 200, description = "Files grouped by area", body = Object),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "listFiles",
    security([])
)]
#[get("/files")]
pub async fn list_files(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let inventory = state.design_files.list_files().await?;
    let total = inventory.total();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "files": {
            "files": inventory.files,
            "images": inventory.images,
            "designs": inventory.designs,
        },
        "total": total,
    })))
}

async fn design_response(state: &HttpState, raw: Option<&str>) -> ApiResult<HttpResponse> {
    let raw = raw
        .filter(|value| !value.is_empty())
        .ok_or_else(|| missing_field_error(FILENAME, "Design filename is required"))?;
    let filename = parse_filename(raw, FILENAME)?;
    let design = state.design_files.read_design(&filename).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "designData": design })))
}

/// Read a saved design by `?filename=`.
#[utoipa::path(
    get,
    path = "/api/templates/design",
    params(DesignQuery),
    responses(
        (status = 200, description = "Design document"),
        (status = 400, description = "Design filename is required", body = ErrorSchema),
        (status = 404, description = "Design file not found", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "getDesignByQuery",
    security([])
)]
#[get("/design")]
pub async fn get_design_by_query(
    state: web::Data<HttpState>,
    query: web::Query<DesignQuery>,
) -> ApiResult<HttpResponse> {
    design_response(&state, query.filename.as_deref()).await
}

/// Read a saved design.
#[utoipa::path(
    get,
    path = "/api/templates/design/{filename}",
    params(("filename" = String, Path, description = "Design filename")),
    responses(
        (status = 200, description = "Design document"),
        (status = 400, description = "Invalid filename", body = ErrorSchema),
        (status = 404, description = "Design file not found", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "getDesign",
    security([])
)]
#[get("/design/{filename}")]
pub async fn get_design(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    design_response(&state, Some(path.as_str())).await
}

async fn save(
    state: &HttpState,
    body: SaveDesignBody,
    variant: DesignVariant,
) -> ApiResult<SavedFile> {
    let filename = parse_optional_filename(body.filename.as_deref(), FILENAME)?;
    state
        .design_files
        .save_design(body.design_data, filename, variant)
        .await
}

/// Save a design document.
#[utoipa::path(
    post,
    path = "/api/templates/save-design",
    request_body = SaveDesignBody,
    responses(
        (status = 200, description = "Design saved"),
        (status = 400, description = "No design data provided (file or JSON)", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "saveDesign",
    security([])
)]
#[post("/save-design")]
pub async fn save_design(
    state: web::Data<HttpState>,
    payload: web::Json<SaveDesignBody>,
) -> ApiResult<HttpResponse> {
    let saved = save(&state, payload.into_inner(), DesignVariant::Standard).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "filename": saved.filename,
        "message": "Design data saved successfully",
    })))
}

/// Save a large design document.
#[utoipa::path(
    post,
    path = "/api/templates/save-design-large",
    request_body = SaveDesignBody,
    responses(
        (status = 200, description = "Design saved"),
        (status = 400, description = "No design data provided", body = ErrorSchema),
        (status = 413, description = "Request body too large", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "saveDesignLarge",
    security([])
)]
#[post("/save-design-large")]
pub async fn save_design_large(
    state: web::Data<HttpState>,
    payload: web::Json<SaveDesignBody>,
) -> ApiResult<HttpResponse> {
    let saved = save(&state, payload.into_inner(), DesignVariant::Large).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "filename": saved.filename,
        "size": saved.size,
        "message": "Design data saved successfully",
    })))
}

/// Store a thumbnail rendered by the editor.
#[utoipa::path(
    post,
    path = "/api/templates/save-thumbnail",
    request_body = SaveThumbnailBody,
    responses(
        (status = 200, description = "Thumbnail saved"),
        (status = 400, description = "No thumbnail data provided", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "saveThumbnail",
    security([])
)]
#[post("/save-thumbnail")]
pub async fn save_thumbnail(
    state: web::Data<HttpState>,
    payload: web::Json<SaveThumbnailBody>,
) -> ApiResult<HttpResponse> {
    const FIELD: FieldName = FieldName::new("thumbnailData");
    let body = payload.into_inner();
    let raw = body
        .thumbnail_data
        .filter(|data| !data.trim().is_empty())
        .ok_or_else(|| missing_field_error(FIELD, "No thumbnail data provided"))?;
    let png = decode_field(&raw, FIELD)?.bytes;
    let id = body.template_id.filter(|value| !value.trim().is_empty());
    let template_id = id.as_deref().and_then(|raw| TemplateId::new(raw).ok());
    let template_ref = id
        .or(body.template_key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "unsaved".to_owned());
    let filename = state
        .design_files
        .save_thumbnail(ThumbnailUpload {
            template_ref,
            template_id,
            png,
        })
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "filename": filename,
        "message": "Thumbnail saved successfully",
    })))
}

/// Serve a stored thumbnail.
#[utoipa::path(
    get,
    path = "/api/templates/thumbnail/{filename}",
    params(("filename" = String, Path, description = "Thumbnail filename")),
    responses(
        (status = 200, description = "PNG image", content_type = "image/png"),
        (status = 400, description = "Invalid filename", body = ErrorSchema),
        (status = 404, description = "Thumbnail not found", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "getThumbnail",
    security([])
)]
#[get("/thumbnail/{filename}")]
pub async fn get_thumbnail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let filename = parse_filename(&path, FILENAME)?;
    let png = state.design_files.read_thumbnail(&filename).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::png())
        .insert_header(public_one_hour_header())
        .body(png))
}

/// Upload a document.
#[utoipa::path(
    post,
    path = "/api/templates/upload-file",
    request_body = UploadBody,
    responses(
        (status = 200, description = "File uploaded"),
        (status = 400, description = "No file uploaded or type not allowed", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "uploadFile",
    security([])
)]
#[post("/upload-file")]
pub async fn upload_file(
    state: web::Data<HttpState>,
    payload: web::Json<UploadBody>,
) -> ApiResult<HttpResponse> {
    let file = payload.into_inner().into_upload()?;
    let asset = state.design_files.upload_document(file).await?;
    Ok(uploaded(asset, "File uploaded successfully"))
}

/// Upload an image.
#[utoipa::path(
    post,
    path = "/api/templates/upload-image",
    request_body = UploadBody,
    responses(
        (status = 200, description = "Image uploaded"),
        (status = 400, description = "No image uploaded or not an image", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "uploadImage",
    security([])
)]
#[post("/upload-image")]
pub async fn upload_image(
    state: web::Data<HttpState>,
    payload: web::Json<UploadBody>,
) -> ApiResult<HttpResponse> {
    let file = payload.into_inner().into_upload()?;
    let asset = state.design_files.upload_image(file).await?;
    Ok(uploaded(asset, "Image uploaded successfully"))
}

/// Upload up to ten documents at once.
#[utoipa::path(
    post,
    path = "/api/templates/upload-multiple",
    request_body = UploadManyBody,
    responses(
        (status = 200, description = "Files uploaded"),
        (status = 400, description = "No files uploaded or too many files", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "uploadMultiple",
    security([])
)]
#[post("/upload-multiple")]
pub async fn upload_multiple(
    state: web::Data<HttpState>,
    payload: web::Json<UploadManyBody>,
) -> ApiResult<HttpResponse> {
    let files = payload
        .into_inner()
        .files
        .into_iter()
        .map(UploadBody::into_upload)
        .collect::<Result<Vec<_>, _>>()?;
    let stored: Vec<UploadedFileResponse> = state
        .design_files
        .upload_documents(files)
        .await?
        .into_iter()
        .map(UploadedFileResponse::from)
        .collect();
    let count = stored.len();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "files": stored,
        "count": count,
        "message": format!("{count} files uploaded successfully"),
    })))
}

/// Remove design files that no template references.
#[utoipa::path(
    post,
    path = "/api/templates/cleanup-orphaned-files",
    responses((status = 200, description = "Cleanup finished")),
    tags = ["files"],
    operation_id = "cleanupOrphanedFiles",
    security([])
)]
#[post("/cleanup-orphaned-files")]
pub async fn cleanup_orphaned_files(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let report = state.design_files.cleanup_orphaned_designs().await?;
    let total = report.removed.len();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Cleanup completed successfully",
        "orphanedFilesRemoved": report.removed,
        "totalFilesCleaned": total,
    })))
}

/// Delete one stored file.
#[utoipa::path(
    delete,
    path = "/api/templates/file/{filename}",
    params(("filename" = String, Path, description = "Stored filename"), FileAreaQuery),
    responses(
        (status = 200, description = "File deleted"),
        (status = 400, description = "Invalid filename", body = ErrorSchema),
        (status = 404, description = "File not found", body = ErrorSchema)
    ),
    tags = ["files"],
    operation_id = "deleteFile",
    security([])
)]
#[delete("/file/{filename}")]
pub async fn delete_file(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<FileAreaQuery>,
) -> ApiResult<HttpResponse> {
    let filename = parse_filename(&path, FILENAME)?;
    let location = AssetLocation::new(AssetKind::from_query(query.area.as_deref()), filename);
    state.design_files.delete_file(&location).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "File deleted successfully",
        "deletedFile": location.filename,
    })))
}

#[cfg(test)]
#[path = "template_assets_tests.rs"]
mod tests;
