/// Integration tests for dependency edges
///
/// Run with: cargo test --test dependency_tests -- --ignored

mod common;

use common::{create_todo, create_user_with_list, setup};
use pomodoro_data::models::dependency::Dependency;
use pomodoro_data::models::todo::Todo;
use pomodoro_data::DataError;

#[tokio::test]
#[ignore = "requires database"]
async fn test_add_and_remove_edge() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let a = create_todo(&pool, list_id, "a").await;
    let b = create_todo(&pool, list_id, "b").await;

    assert!(!Dependency::exists(&pool, a, b).await.expect("Failed to check edge"));

    // a depends on b
    let (dependent, depends_on) = Dependency::add(&pool, a, b).await.expect("Failed to add edge");
    assert_eq!(dependent.id, a);
    assert_eq!(depends_on.id, b);

    assert!(Dependency::exists(&pool, a, b).await.expect("Failed to check edge"));
    assert!(!Dependency::exists(&pool, b, a).await.expect("Failed to check edge"));

    let todo_a = Todo::find_by_id(&pool, a).await.expect("Failed to fetch a");
    let todo_b = Todo::find_by_id(&pool, b).await.expect("Failed to fetch b");
    assert_eq!(todo_a.this_depends_on.len(), 1);
    assert_eq!(todo_a.this_depends_on[0].id, b);
    assert_eq!(todo_a.this_depends_on[0].name, "b");
    assert!(todo_a.depends_on_this.is_empty());
    assert_eq!(todo_b.depends_on_this.len(), 1);
    assert_eq!(todo_b.depends_on_this[0].id, a);
    assert!(todo_b.this_depends_on.is_empty());
    assert_eq!(dependent, todo_a);

    assert!(Dependency::remove(&pool, a, b).await.expect("Failed to remove edge"));
    assert!(!Dependency::remove(&pool, a, b).await.expect("Second remove should not fail"));

    let todo_a = Todo::find_by_id(&pool, a).await.expect("Failed to fetch a");
    let todo_b = Todo::find_by_id(&pool, b).await.expect("Failed to fetch b");
    assert!(todo_a.this_depends_on.is_empty());
    assert!(todo_b.depends_on_this.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_edges_resolve_both_directions() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let hub = create_todo(&pool, list_id, "hub").await;
    let up1 = create_todo(&pool, list_id, "up1").await;
    let up2 = create_todo(&pool, list_id, "up2").await;
    let down = create_todo(&pool, list_id, "down").await;

    Dependency::add(&pool, hub, up1).await.expect("Failed to add edge");
    Dependency::add(&pool, hub, up2).await.expect("Failed to add edge");
    Dependency::add(&pool, down, hub).await.expect("Failed to add edge");
    Todo::mark_complete(&pool, up2).await.expect("Failed to complete");

    let todo = Todo::find_by_id(&pool, hub).await.expect("Failed to fetch hub");
    let ids: Vec<i64> = todo.this_depends_on.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![up1, up2]);
    assert!(todo.this_depends_on[1].is_complete());
    assert_eq!(todo.depends_on_this.len(), 1);
    assert_eq!(todo.depends_on_this[0].id, down);
    assert!(todo.depends_on_this.iter().all(|s| s.list == list_id));

    let edges = Dependency::for_todo(&pool, hub).await.expect("Failed to list edges");
    assert_eq!(edges.len(), 3);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_edge_is_driver_error() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let a = create_todo(&pool, list_id, "a").await;
    let b = create_todo(&pool, list_id, "b").await;

    Dependency::add(&pool, a, b).await.expect("Failed to add edge");
    let err = Dependency::add(&pool, a, b).await.expect_err("Duplicate should fail");
    assert!(matches!(err, DataError::Database(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_same_list() {
    let pool = setup().await;
    let (_, list_one) = create_user_with_list(&pool).await;
    let (_, list_two) = create_user_with_list(&pool).await;
    let a = create_todo(&pool, list_one, "a").await;
    let b = create_todo(&pool, list_one, "b").await;
    let c = create_todo(&pool, list_two, "c").await;

    assert!(Dependency::same_list(&pool, a, b).await.expect("Failed to compare"));
    assert!(!Dependency::same_list(&pool, a, c).await.expect("Failed to compare"));

    let missing = Dependency::same_list(&pool, a, i64::MAX).await;
    assert!(matches!(missing, Err(DataError::TodoNotFound { id }) if id == i64::MAX));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_cross_list_edge_is_not_rejected() {
    let pool = setup().await;
    let (_, list_one) = create_user_with_list(&pool).await;
    let (_, list_two) = create_user_with_list(&pool).await;
    let a = create_todo(&pool, list_one, "a").await;
    let c = create_todo(&pool, list_two, "c").await;

    let (dependent, _) = Dependency::add(&pool, a, c).await.expect("Failed to add edge");
    assert_eq!(dependent.this_depends_on[0].list, list_two);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_todo_leaves_edges() {
    let pool = setup().await;
    let (_, list_id) = create_user_with_list(&pool).await;
    let a = create_todo(&pool, list_id, "a").await;
    let b = create_todo(&pool, list_id, "b").await;
    Dependency::add(&pool, a, b).await.expect("Failed to add edge");

    assert!(Todo::delete(&pool, b).await.expect("Failed to delete"));

    assert!(Dependency::exists(&pool, a, b).await.expect("Failed to check edge"));
    let todo_a = Todo::find_by_id(&pool, a).await.expect("Failed to fetch a");
    assert!(todo_a.this_depends_on.is_empty());

    assert!(Dependency::remove(&pool, a, b).await.expect("Failed to clean up edge"));
}
