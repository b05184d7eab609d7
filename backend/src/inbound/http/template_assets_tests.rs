//! Tests for the design-file and upload handlers.

use super::*;
use crate::domain::ports::{AssetInventory, CleanupReport};
use crate::domain::{AssetFilename, StoredAsset};
use crate::inbound::http::test_utils::{TestPorts, test_app};
use actix_web::http::StatusCode;
use actix_web::http::header::CACHE_CONTROL;
use actix_web::test;
use rstest::rstest;

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/templates")
            .service(list_files)
            .service(get_design_by_query)
            .service(get_design)
            .service(save_design)
            .service(save_design_large)
            .service(save_thumbnail)
            .service(get_thumbnail)
            .service(upload_file)
            .service(upload_image)
            .service(upload_multiple)
            .service(cleanup_orphaned_files)
            .service(delete_file),
    );
}

fn name(raw: &str) -> AssetFilename {
    AssetFilename::new(raw).expect("valid filename")
}

fn asset(kind: AssetKind, raw: &str) -> StoredAsset {
    StoredAsset {
        filename: name(raw),
        size: 3,
        created: None,
        modified: None,
        path: AssetLocation::new(kind, name(raw)).public_path(),
    }
}

#[rstest]
#[actix_web::test]
async fn files_are_grouped_with_a_total() {
    let mut ports = TestPorts::default();
    ports.design_files.expect_list_files().return_once(|| {
        Ok(AssetInventory {
            files: vec![asset(AssetKind::Files, "a.pdf")],
            images: vec![],
            designs: vec![
                asset(AssetKind::Designs, "d1.json"),
                asset(AssetKind::Designs, "d2.json"),
            ],
        })
    });
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/templates/files").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["files"]["designs"][1]["path"], "/uploads/designs/d2.json");
}

#[rstest]
#[case("/api/templates/design", "Design filename is required")]
#[case("/api/templates/design?filename=..%2Fsecret", "Invalid filename")]
#[case("/api/templates/design/.hidden", "Invalid filename")]
#[actix_web::test]
async fn design_reads_validate_the_name(#[case] uri: &str, #[case] message: &str) {
    let mut ports = TestPorts::default();
    ports.design_files.expect_read_design().never();
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], message);
}

#[rstest]
#[actix_web::test]
async fn design_reads_return_the_document() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_read_design()
        .withf(|filename: &AssetFilename| filename.as_ref() == "d1.json")
        .return_once(|_| Ok(json!({"objects": []})));
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::get()
        .uri("/api/templates/design/d1.json")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["designData"], json!({"objects": []}));
}

#[rstest]
#[actix_web::test]
async fn missing_design_data_reaches_the_service_as_null() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_save_design()
        .withf(|design: &Value, filename: &Option<AssetFilename>, variant: &DesignVariant| {
            design.is_null() && filename.is_none() && *variant == DesignVariant::Standard
        })
        .return_once(|_, _, _| {
            Err(Error::invalid_request("No design data provided (file or JSON)"))
        });
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/save-design")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn large_designs_report_their_size() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_save_design()
        .withf(|_, filename: &Option<AssetFilename>, variant: &DesignVariant| {
            filename.as_ref().is_some_and(|f| f.to_string() == "mine.json")
                && *variant == DesignVariant::Large
        })
        .return_once(|_, _, _| {
            Ok(SavedFile {
                filename: name("mine.json"),
                size: 42,
            })
        });
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/save-design-large")
        .set_json(json!({"designData": {"a": 1}, "filename": "mine.json"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["size"], 42);
    assert_eq!(body["message"], "Design data saved successfully");
}

#[rstest]
#[actix_web::test]
async fn thumbnails_link_only_parseable_ids() {
    let id = TemplateId::random();
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_save_thumbnail()
        .withf(move |upload: &ThumbnailUpload| {
            upload.template_id == Some(id)
                && upload.template_ref == id.to_string()
                && upload.png.as_slice() == b"hi"
        })
        .return_once(|_| Ok(name("thumbnail-x-1.png")));
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/save-thumbnail")
        .set_json(json!({"templateId": id.to_string(), "thumbnailData": "data:image/png;base64,aGk="}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["filename"], "thumbnail-x-1.png");
}

#[rstest]
#[actix_web::test]
async fn thumbnails_by_key_are_not_linked() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_save_thumbnail()
        .withf(|upload: &ThumbnailUpload| {
            upload.template_id.is_none() && upload.template_ref == "promo"
        })
        .return_once(|_| Ok(name("thumbnail-promo-1.png")));
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/save-thumbnail")
        .set_json(json!({"templateKey": "promo", "thumbnailData": "aGk="}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn thumbnails_require_data() {
    let mut ports = TestPorts::default();
    ports.design_files.expect_save_thumbnail().never();
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/save-thumbnail")
        .set_json(json!({"templateKey": "promo"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "No thumbnail data provided");
}

#[rstest]
#[actix_web::test]
async fn stored_thumbnails_are_served_as_cacheable_png() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_read_thumbnail()
        .return_once(|_| Ok(vec![0x89, b'P', b'N', b'G']));
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::get()
        .uri("/api/templates/thumbnail/thumb.png")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
        Some("public, max-age=3600")
    );
    assert_eq!(
        res.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
}

#[rstest]
#[actix_web::test]
async fn document_uploads_use_the_data_url_type() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_upload_document()
        .withf(|file: &UploadFile| {
            file.content_type.as_deref() == Some("application/pdf")
                && file.original_name.as_ref().is_some_and(|f| f.to_string() == "Listing.pdf")
        })
        .return_once(|file| {
            Ok(UploadedAsset {
                filename: name("Listing-1.pdf"),
                original_name: Some("Listing.pdf".to_owned()),
                size: file.bytes.len() as u64,
                mimetype: "application/pdf".to_owned(),
                path: "/uploads/files/Listing-1.pdf".to_owned(),
            })
        });
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/upload-file")
        .set_json(json!({"filename": "Listing.pdf", "data": "data:application/pdf;base64,aGk="}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["originalName"], "Listing.pdf");
    assert_eq!(body["size"], 2);
    assert_eq!(body["message"], "File uploaded successfully");
}

#[rstest]
#[actix_web::test]
async fn uploads_reject_traversal_names() {
    let mut ports = TestPorts::default();
    ports.design_files.expect_upload_image().never();
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/upload-image")
        .set_json(json!({"filename": "../x.png", "data": "aGk="}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn multiple_uploads_report_the_count() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_upload_documents()
        .withf(|files: &Vec<UploadFile>| files.len() == 2)
        .return_once(|files| {
            Ok(files
                .into_iter()
                .enumerate()
                .map(|(i, _)| UploadedAsset {
                    filename: name(&format!("f{i}.txt")),
                    original_name: None,
                    size: 2,
                    mimetype: "text/plain".to_owned(),
                    path: format!("/uploads/files/f{i}.txt"),
                })
                .collect())
        });
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/upload-multiple")
        .set_json(json!({"files": [
            {"filename": "a.txt", "data": "aGk="},
            {"filename": "b.txt", "data": "aGk="}
        ]}))
        .to_request();
    let res = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["message"], "2 files uploaded successfully");
}

#[rstest]
#[actix_web::test]
async fn cleanup_reports_removed_files() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_cleanup_orphaned_designs()
        .return_once(|| {
            Ok(CleanupReport {
                removed: vec!["old.json".to_owned()],
            })
        });
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/cleanup-orphaned-files")
        .to_request();
    let res = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["totalFilesCleaned"], 1);
    assert_eq!(body["orphanedFilesRemoved"], json!(["old.json"]));
}

#[rstest]
#[case("", AssetKind::Files)]
#[case("?type=images", AssetKind::Images)]
#[case("?type=designs", AssetKind::Designs)]
#[actix_web::test]
async fn deletes_target_the_requested_area(#[case] query: &str, #[case] kind: AssetKind) {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_delete_file()
        .withf(move |location: &AssetLocation| {
            location.kind == kind && location.filename.as_ref() == "x.bin"
        })
        .return_once(|_| Ok(()));
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/templates/file/x.bin{query}"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["deletedFile"], "x.bin");
}

#[rstest]
#[actix_web::test]
async fn deleting_a_missing_file_is_not_found() {
    let mut ports = TestPorts::default();
    ports
        .design_files
        .expect_delete_file()
        .return_once(|_| Err(Error::not_found("File not found")));
    let app = test::init_service(test_app(ports).configure(routes)).await;

    let req = test::TestRequest::delete()
        .uri("/api/templates/file/gone.pdf")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
