//! Integration tests for the MongoDB-backed user repository.
//!
//! These tests run against a real MongoDB replica set using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use keystone_core::{ExternalIdentity, Instrumentation, Plan, User, INVALID_USER_UPDATE, MISSING_PLAN_ID};
use keystone_repository::{
    DatabaseConnectionInterface, MongoUserDao, Projection, UserDao, UserRepository, UserRepositoryImpl,
};
use std::sync::Arc;

fn create_test_user(id: &str, external_id: &str) -> User {
    let mut external = ExternalIdentity::new(external_id);
    external.email = Some(format!("{}@example.com", id));
    User::new(id, external).with_plan_id("basic")
}

fn repository(db: &TestDatabase) -> UserRepositoryImpl<User> {
    let connection = db.connection();
    let dao: Arc<dyn UserDao<User>> = Arc::new(MongoUserDao::<User>::new(connection.as_ref(), db.collections()));
    UserRepositoryImpl::new(dao)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_then_fetch_with_plan() {
    let db = TestDatabase::new().await;
    db.seed_plan(&Plan::new("basic", "Basic")).await;
    let repo = repository(&db);
    let instrumentation = Instrumentation::new();

    let response = repo
        .update_from_external(&instrumentation, "u-1", create_test_user("u-1", "ext-1"))
        .await
        .expect("Update failed");
    assert!(response.is_success());

    let fetched = repo
        .fetch(&instrumentation, "u-1", false)
        .await
        .expect("Fetch failed")
        .into_results()
        .expect("User not found");
    assert_eq!(fetched.external.id, "ext-1");
    assert_eq!(fetched.plan.map(|p| p.name), Some("Basic".to_string()));
    assert!(fetched.updated_timestamp.is_some());

    let by_external = repo
        .fetch_by_external_id(&instrumentation, "ext-1", true)
        .await
        .expect("Fetch failed");
    assert_eq!(by_external.results().map(|u| u.id.as_str()), Some("u-1"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_fetch_not_found() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);

    let response = repo
        .fetch(&Instrumentation::new(), "missing", true)
        .await
        .expect("Fetch failed");

    assert!(response.is_failure());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_replace_existing_user() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);
    let instrumentation = Instrumentation::new();

    repo.update_from_external(&instrumentation, "u-2", create_test_user("u-2", "ext-2"))
        .await
        .expect("Insert failed");

    let mut update = create_test_user("u-2", "ext-2");
    update.roles = vec!["editor".to_string()];
    let response = repo
        .update_from_external(&instrumentation, "u-2", update)
        .await
        .expect("Replace failed");
    assert!(response.is_success());

    let stored = repo
        .fetch(&instrumentation, "u-2", true)
        .await
        .expect("Fetch failed")
        .into_results()
        .expect("User not found");
    assert_eq!(stored.roles, vec!["editor".to_string()]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_plan_is_not_persisted_on_user() {
    let db = TestDatabase::new().await;
    let repo = repository(&db);

    let mut user = create_test_user("u-3", "ext-3");
    user.plan = Some(Plan::new("basic", "Basic"));
    repo.update_from_external(&Instrumentation::new(), "u-3", user)
        .await
        .expect("Update failed");

    let raw = db
        .connection()
        .database()
        .collection::<mongodb::bson::Document>(&db.collections().users)
        .find_one(mongodb::bson::doc! { "id": "u-3" })
        .await
        .expect("Raw read failed")
        .expect("Document missing");
    assert!(!raw.contains_key("plan"));
    assert_eq!(raw.get_str("planId").ok(), Some("basic"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_restricted_projection_reports_missing_plan_id() {
    let db = TestDatabase::new().await;
    db.seed_plan(&Plan::new("basic", "Basic")).await;
    let repo = repository(&db);
    repo.update_from_external(&Instrumentation::new(), "u-4", create_test_user("u-4", "ext-4"))
        .await
        .expect("Update failed");

    let restricted = repository(&db).with_projection(Projection::RESTRICTED);
    let response = restricted
        .fetch(&Instrumentation::new(), "u-4", false)
        .await
        .expect("Fetch failed");

    assert_eq!(response.message(), Some(MISSING_PLAN_ID));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_insert_is_soft_failure() {
    let db = TestDatabase::new().await;
    db.connection()
        .database()
        .collection::<User>(&db.collections().users)
        .create_index(
            mongodb::IndexModel::builder()
                .keys(mongodb::bson::doc! { "external.id": 1 })
                .options(mongodb::options::IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await
        .expect("Index creation failed");
    let repo = repository(&db);

    repo.update_from_external(&Instrumentation::new(), "u-5", create_test_user("u-5", "ext-shared"))
        .await
        .expect("Insert failed");

    let response = repo
        .update_from_external(&Instrumentation::new(), "u-6", create_test_user("u-6", "ext-shared"))
        .await
        .expect("Update returned hard error");

    assert_eq!(response.message(), Some(INVALID_USER_UPDATE));
    let missing = repo
        .fetch(&Instrumentation::new(), "u-6", true)
        .await
        .expect("Fetch failed");
    assert!(missing.is_failure());
}
