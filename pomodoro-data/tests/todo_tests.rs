/// Integration tests for todos
///
/// Run with: cargo test --test todo_tests -- --ignored

mod common;

use chrono::{Duration, Utc};
use common::{create_todo, create_user_with_list, setup};
use pomodoro_data::models::todo::{NewTodo, Todo, TodoStub};
use pomodoro_data::DataError;

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_and_fetch() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;

    let id = create_todo(&pool, list_id, "read chapter 3").await;
    let todo = Todo::find_by_id(&pool, id).await.expect("Failed to fetch todo");

    assert_eq!(todo.id, id);
    assert_eq!(todo.name, "read chapter 3");
    assert_eq!(todo.list, list_id);
    assert!(!todo.is_complete());
    assert!(todo.depends_on_this.is_empty());
    assert!(todo.this_depends_on.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_keeps_given_timestamps() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;

    let created_at = Utc::now() - Duration::days(2);
    let completed_at = Utc::now() - Duration::days(1);
    let id = Todo::create(
        &pool,
        NewTodo {
            name: "imported".to_string(),
            created_at,
            modified_at: completed_at,
            completed_at: Some(completed_at),
            list: list_id,
        },
    )
    .await
    .expect("Failed to create todo");

    let todo = Todo::find_by_id(&pool, id).await.expect("Failed to fetch todo");
    assert_eq!(todo.created_at.timestamp(), created_at.timestamp());
    assert_eq!(
        todo.completed_at.map(|t| t.timestamp()),
        Some(completed_at.timestamp())
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_fetch_stub() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let id = create_todo(&pool, list_id, "stub me").await;

    let stub = TodoStub::find_by_id(&pool, id).await.expect("Failed to fetch stub");
    assert_eq!(stub.id, id);
    assert_eq!(stub.name, "stub me");
    assert_eq!(stub.list, list_id);
    assert!(stub.completed_at.is_none());

    let missing = TodoStub::find_by_id(&pool, i64::MAX).await;
    assert!(matches!(missing, Err(DataError::TodoNotFound { .. })));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_missing_todo_is_not_found() {
    let pool = setup().await;

    let err = Todo::find_by_id(&pool, i64::MAX).await.expect_err("Should be missing");
    assert!(err.is_not_found());

    let err = Todo::rename(&pool, i64::MAX, "x").await.expect_err("Should be missing");
    assert!(matches!(err, DataError::TodoNotFound { .. }));

    let err = Todo::mark_complete(&pool, i64::MAX).await.expect_err("Should be missing");
    assert!(matches!(err, DataError::TodoNotFound { .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_rename_updates_name_and_modified() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let id = create_todo(&pool, list_id, "old name").await;
    let before = Todo::find_by_id(&pool, id).await.expect("Failed to fetch todo");

    let renamed = Todo::rename(&pool, id, "new name").await.expect("Failed to rename");

    assert_eq!(renamed.name, "new name");
    assert!(renamed.modified_at >= before.modified_at);
    assert_eq!(renamed.created_at, before.created_at);
    assert!(!renamed.is_complete());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mark_complete() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let id = create_todo(&pool, list_id, "finish me").await;

    let done = Todo::mark_complete(&pool, id).await.expect("Failed to complete");

    assert_eq!(done.name, "finish me");
    assert!(done.is_complete());
    assert_eq!(done.completed_at, Some(done.modified_at));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let id = create_todo(&pool, list_id, "delete me").await;

    assert!(Todo::delete(&pool, id).await.expect("Failed to delete"));
    assert!(!Todo::delete(&pool, id).await.expect("Second delete should not fail"));

    let result = Todo::find_by_id(&pool, id).await;
    assert!(matches!(result, Err(DataError::TodoNotFound { .. })));
}
