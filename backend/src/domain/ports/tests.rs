//! Behaviour of the fixture adapters and port error helpers.

use super::*;
use crate::domain::{AssetFilename, AssetKind, AssetLocation, TemplateFilter, TemplateId, UserId};
use rstest::rstest;

#[rstest]
#[case(CanvaClientError::transport("down"), "transport")]
#[case(CanvaClientError::timeout("slow"), "timeout")]
#[case(CanvaClientError::rate_limited("429"), "rate_limited")]
#[case(CanvaClientError::invalid_request("bad"), "invalid_request")]
#[case(CanvaClientError::upstream(502_u16, "bad gateway"), "upstream")]
#[case(CanvaClientError::decode("eof"), "decode")]
fn canva_errors_report_their_class(#[case] error: CanvaClientError, #[case] class: &str) {
    assert_eq!(error.class(), class);
}

#[rstest]
fn port_errors_render_messages() {
    assert_eq!(
        UserPersistenceError::duplicate("email").to_string(),
        "user email already exists"
    );
    assert_eq!(
        TemplatePersistenceError::duplicate_key("template_1_a").to_string(),
        "template key template_1_a already exists"
    );
    assert_eq!(TokenError::expired().to_string(), "token expired");
}

#[rstest]
fn fixture_hasher_round_trips() {
    let hasher = FixturePasswordHasher;
    let hash = hasher.hash("pw").expect("hash");
    assert!(hasher.verify("pw", &hash).expect("verify"));
    assert!(!hasher.verify("other", &hash).expect("verify"));
    assert!(hasher.verify("pw", "$2b$10$abc").is_err());
}

#[tokio::test]
async fn fixture_repositories_are_empty() {
    let user_id = UserId::random();
    assert!(
        FixtureUserRepository
            .find_by_id(&user_id)
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        FixtureBrandKitRepository
            .find_by_user(&user_id)
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        FixtureTemplateRepository
            .list(&TemplateFilter::default())
            .await
            .expect("list")
            .is_empty()
    );
    assert!(!FixtureConnectivityCheck.is_connected().await);
}

#[tokio::test]
async fn fixture_repositories_refuse_writes() {
    let user_id = UserId::random();
    assert_eq!(
        FixtureBackgroundRepository
            .delete_for("tpl", &user_id)
            .await
            .expect_err("no database"),
        BackgroundPersistenceError::connection(NO_DATABASE)
    );
    assert_eq!(
        FixtureBrandKitRepository
            .delete_by_user(&user_id)
            .await
            .expect_err("no database"),
        BrandKitPersistenceError::connection(NO_DATABASE)
    );
    assert_eq!(
        FixtureTemplateRepository
            .delete(&TemplateId::random())
            .await
            .expect_err("no database"),
        TemplatePersistenceError::connection(NO_DATABASE)
    );
}

#[tokio::test]
async fn fixture_asset_store_reports_written_size() {
    let location = AssetLocation::new(
        AssetKind::Designs,
        AssetFilename::new("design-1.json").expect("valid name"),
    );
    let written = FixtureAssetStore
        .write(&location, b"{}")
        .await
        .expect("write");
    assert_eq!(written, 2);
    assert!(FixtureAssetStore.read(&location).await.expect("read").is_none());
}

#[tokio::test]
async fn fixture_canva_client_is_unconfigured() {
    let err = FixtureCanvaClient
        .list_templates("token")
        .await
        .expect_err("fixture client fails");
    assert_eq!(err.class(), "transport");
}
