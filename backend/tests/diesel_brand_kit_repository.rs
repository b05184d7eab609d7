//! Integration tests for `DieselBrandKitRepository` against embedded PostgreSQL.

use rstest::{fixture, rstest};
use studio_backend::domain::ports::{BrandKitRepository, UserRepository};
use studio_backend::domain::{BrandKit, ColorSlot, HexColor};
use studio_backend::outbound::persistence::{DieselBrandKitRepository, DieselUserRepository};

mod support;

use support::{DatabaseContext, fixed_now, handle_cluster_setup_failure, sample_user};

#[fixture]
fn db() -> Option<DatabaseContext> {
    match support::provision_database() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn upsert_keeps_one_kit_per_user(db: Option<DatabaseContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: upsert_keeps_one_kit_per_user skipped");
        return;
    };
    let users = DieselUserRepository::new(db.pool.clone());
    let repo = DieselBrandKitRepository::new(db.pool.clone());
    let owner = sample_user("agent@example.com");

    db.runtime.block_on(async {
        users.create(&owner).await.expect("create user");
        assert!(repo.find_by_user(&owner.id).await.expect("find").is_none());

        let kit = BrandKit::with_defaults(owner.id, fixed_now());
        repo.upsert(&kit).await.expect("insert");
        assert_eq!(
            repo.find_by_user(&owner.id).await.expect("find"),
            Some(kit.clone())
        );

        let mut changed = BrandKit::with_defaults(owner.id, fixed_now());
        changed.primary_color = HexColor::new("#112233", ColorSlot::Primary).expect("colour");
        changed.updated_at = fixed_now() + chrono::Duration::hours(1);
        repo.upsert(&changed).await.expect("update");

        let stored = repo
            .find_by_user(&owner.id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.id, kit.id);
        assert_eq!(stored.created_at, kit.created_at);
        assert_eq!(stored.primary_color, changed.primary_color);
        assert_eq!(stored.updated_at, changed.updated_at);
    });
}

#[rstest]
fn delete_reports_whether_a_kit_existed(db: Option<DatabaseContext>) {
    let Some(db) = db else {
        eprintln!("SKIP-TEST-CLUSTER: delete_reports_whether_a_kit_existed skipped");
        return;
    };
    let users = DieselUserRepository::new(db.pool.clone());
    let repo = DieselBrandKitRepository::new(db.pool.clone());
    let owner = sample_user("agent@example.com");

    db.runtime.block_on(async {
        users.create(&owner).await.expect("create user");
        repo.upsert(&BrandKit::with_defaults(owner.id, fixed_now()))
            .await
            .expect("insert");

        assert!(repo.delete_by_user(&owner.id).await.expect("delete"));
        assert!(!repo.delete_by_user(&owner.id).await.expect("second delete"));
        assert!(repo.find_by_user(&owner.id).await.expect("find").is_none());
    });
}
