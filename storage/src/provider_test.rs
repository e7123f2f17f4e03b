//! Unit tests for DocumentStorageProvider.
//!
//! The driver is a mockall mock so each test pins the exact driver outcome
//! (documents, no match, or a driver error) and checks the envelope built from it.

use serde_json::{json, Value};

use crate::driver::{DeleteResult, MockDocumentDriver};
use crate::error::StorageError;
use crate::models::{Collection, Document, Template, User};
use crate::provider::{DocumentStorageProvider, StorageProvider};
use crate::query::Clause;
use crate::response::StorageResponse;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn test_get_users_returns_matches_in_driver_order() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find()
        .withf(|collection, filter| {
            *collection == Collection::Users
                && filter.get("team") == Some(&Clause::ContainsAll(vec!["a".to_string()]))
        })
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                doc(json!({"id": "u2", "team": ["a"]})),
                doc(json!({"id": "u1", "team": ["b", "a"]})),
            ])
        });
    let provider = DocumentStorageProvider::new(driver);

    let response = provider
        .get_users(&User {
            team: strings(&["a"]),
            ..User::default()
        })
        .await;

    let users = response.result().expect("expected users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id.as_deref(), Some("u2"));
    assert_eq!(users[1].id.as_deref(), Some("u1"));
}

#[tokio::test]
async fn test_get_users_empty_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver.expect_find().returning(|_, _| Ok(Vec::new()));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider.get_users(&User::default()).await;

    assert_eq!(
        response,
        StorageResponse::Failure("No users found matching given criteria".to_string())
    );
}

#[tokio::test]
async fn test_get_templates_empty_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find()
        .withf(|collection, _| *collection == Collection::Templates)
        .returning(|_, _| Ok(Vec::new()));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider.get_templates(&Template::default()).await;

    assert_eq!(
        response.error_message(),
        Some("No templates found matching given criteria")
    );
}

#[tokio::test]
async fn test_get_driver_error_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find()
        .times(1)
        .returning(|_, _| Err(StorageError::Database("connection refused".to_string())));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider.get_templates(&Template::default()).await;

    assert_eq!(
        response,
        StorageResponse::Failure("Database error: connection refused".to_string())
    );
}

#[tokio::test]
async fn test_get_undecodable_document_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find()
        .returning(|_, _| Ok(vec![doc(json!({"id": "u1", "team": "oops"}))]));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider.get_users(&User::default()).await;

    assert!(!response.is_success());
    assert!(response
        .error_message()
        .unwrap()
        .starts_with("Serialization error"));
}

#[tokio::test]
async fn test_update_passes_update_through_unmodified() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find_one_and_update()
        .withf(|collection, filter, update| {
            *collection == Collection::Users
                && filter.get("org") == Some(&Clause::ContainsAll(vec!["o1".to_string()]))
                && Value::Object(update.clone()) == json!({"team": ["x", "y"]})
        })
        .times(1)
        .returning(|_, _, _| Ok(Some(doc(json!({"id": "u1"})))));
    let provider = DocumentStorageProvider::new(driver);

    let query = User {
        org: strings(&["o1"]),
        ..User::default()
    };
    let update = User {
        team: strings(&["x", "y"]),
        ..User::default()
    };
    let response = provider.update_user(&query, &update).await;

    assert_eq!(response, StorageResponse::Success(None));
}

#[tokio::test]
async fn test_update_no_match_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find_one_and_update()
        .returning(|_, _, _| Ok(None));
    let provider = DocumentStorageProvider::new(driver);

    let users = provider
        .update_user(&User::default(), &User::default())
        .await;
    assert_eq!(
        users.error_message(),
        Some("No users found matching given criteria.")
    );
}

#[tokio::test]
async fn test_update_template_driver_error_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_find_one_and_update()
        .returning(|_, _, _| Err(StorageError::NotConnected));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider
        .update_template(&Template::default(), &Template::default())
        .await;

    assert_eq!(
        response.error_message(),
        Some("Not connected to the document store")
    );
}

#[tokio::test]
async fn test_insert_returns_one() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_create()
        .withf(|collection, document| {
            *collection == Collection::Templates
                && Value::Object(document.clone()) == json!({"id": "t1", "tags": ["news"]})
        })
        .times(1)
        .returning(|_, document| Ok(document));
    let provider = DocumentStorageProvider::new(driver);

    let template = Template {
        id: Some("t1".to_string()),
        tags: strings(&["news"]),
        ..Template::default()
    };
    let response = provider.insert_template(&template).await;

    assert_eq!(response, StorageResponse::Success(Some(1)));
}

#[tokio::test]
async fn test_insert_duplicate_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_create()
        .returning(|_, _| Err(StorageError::AlreadyExists("id: u1".to_string())));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider
        .insert_user(&User {
            id: Some("u1".to_string()),
            ..User::default()
        })
        .await;

    assert_eq!(response.error_message(), Some("Already exists: id: u1"));
}

#[tokio::test]
async fn test_remove_uses_contains_all_filter() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_delete_one()
        .withf(|collection, filter| {
            *collection == Collection::Templates
                && filter.get("tags") == Some(&Clause::ContainsAll(vec!["a".to_string()]))
        })
        .times(1)
        .returning(|_, _| Ok(DeleteResult { deleted_count: 1 }));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider
        .remove_template(&Template {
            tags: strings(&["a"]),
            ..Template::default()
        })
        .await;

    assert!(response.is_success());
}

#[tokio::test]
async fn test_remove_zero_deleted_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_delete_one()
        .returning(|_, _| Ok(DeleteResult { deleted_count: 0 }));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider.remove_user(&User::default()).await;

    assert_eq!(
        response.error_message(),
        Some("No users found matching given criteria")
    );
}

#[tokio::test]
async fn test_remove_driver_error_is_failure() {
    let mut driver = MockDocumentDriver::new();
    driver
        .expect_delete_one()
        .times(1)
        .returning(|_, _| Err(StorageError::Database("timeout".to_string())));
    let provider = DocumentStorageProvider::new(driver);

    let response = provider.remove_template(&Template::default()).await;

    assert_eq!(response.error_message(), Some("Database error: timeout"));
}

#[tokio::test]
async fn test_connect_and_close_delegate() {
    let mut driver = MockDocumentDriver::new();
    driver.expect_connect().times(1).returning(|| Ok(()));
    driver
        .expect_close()
        .times(1)
        .returning(|| Err(StorageError::Database("already closed".to_string())));
    let provider = DocumentStorageProvider::new(driver);

    assert_eq!(provider.connect().await, StorageResponse::Success(Some(true)));
    assert_eq!(
        provider.close().await,
        StorageResponse::Failure("Database error: already closed".to_string())
    );
}
