//! Integration tests for keeping a project's task list in step with its
//! store: round-trips, local reordering, edit sessions, and failure recovery.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::similar_names,
    clippy::redundant_clone
)]

use std::sync::Arc;

use tasklist::store::memory::{InMemoryTaskStore, StoreRequest};
use tasklist::store::{RemoteTaskStore, StoreError};
use tasklist::tasks::{
    EditMode, HoverOutcome, ListView, ProjectTasks, RowBounds, SubmitOutcome, SyncError,
};
use tasklist_proto::task::{ProjectId, TaskId};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn project() -> ProjectId {
    ProjectId::new("groceries")
}

/// Engine over a store seeded with `names`, already refreshed, with the
/// refresh request forgotten.
async fn loaded(names: &[&str]) -> ProjectTasks<InMemoryTaskStore> {
    let mut tasks = ProjectTasks::new(project(), InMemoryTaskStore::with_tasks(&project(), names));
    tasks.refresh().await.expect("refresh");
    tasks.store().clear_requests();
    tasks
}

fn names<S: RemoteTaskStore>(tasks: &ProjectTasks<S>) -> Vec<String> {
    tasks
        .list()
        .tasks()
        .unwrap_or_default()
        .iter()
        .map(|t| t.name.clone())
        .collect()
}

fn id_of<S: RemoteTaskStore>(tasks: &ProjectTasks<S>, name: &str) -> TaskId {
    tasks
        .list()
        .tasks()
        .unwrap()
        .iter()
        .find(|t| t.name == name)
        .map(|t| t.id.clone())
        .expect("task present")
}

/// Drags the row at `from` down to `to`, crossing each row's midpoint.
fn drag_down<S: RemoteTaskStore>(tasks: &mut ProjectTasks<S>, from: usize, to: usize) {
    tasks.begin_drag(from).unwrap();
    for i in from + 1..=to {
        #[allow(clippy::cast_precision_loss)]
        let top = i as f32 * 10.0;
        let outcome = tasks
            .drag_hover(i, top + 8.0, RowBounds::new(top, top + 10.0))
            .unwrap();
        assert_eq!(outcome, HoverOutcome::Moved { from: i - 1, to: i });
    }
    tasks.end_drag();
}

// ---------------------------------------------------------------------------
// Local reorder vs. canonical list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drag_reorders_then_refresh_restores_canonical_order() {
    let mut tasks = loaded(&["A", "B", "C"]).await;

    drag_down(&mut tasks, 0, 2);
    assert_eq!(names(&tasks), ["B", "C", "A"]);
    assert!(tasks.store().requests().is_empty(), "drag is never persisted");

    tasks.refresh().await.unwrap();
    assert_eq!(names(&tasks), ["A", "B", "C"]);
}

#[tokio::test]
async fn any_round_trip_discards_local_order() {
    let mut tasks = loaded(&["A", "B", "C"]).await;
    drag_down(&mut tasks, 0, 1);
    assert_eq!(names(&tasks), ["B", "A", "C"]);

    let c = id_of(&tasks, "C");
    tasks.toggle_task(&c).await.unwrap();

    assert_eq!(names(&tasks), ["A", "B", "C"]);
    assert!(tasks.list().get(&c).unwrap().status);
}

#[tokio::test]
async fn reload_mid_drag_cancels_gesture() {
    let mut tasks = loaded(&["A", "B"]).await;
    tasks.begin_drag(0).unwrap();

    let a = id_of(&tasks, "A");
    tasks.delete(&a).await.unwrap();

    let outcome = tasks
        .drag_hover(0, 8.0, RowBounds::new(0.0, 10.0))
        .unwrap();
    assert_eq!(outcome, HoverOutcome::Cancelled);
    assert!(tasks.drag().gesture().is_none());
}

// ---------------------------------------------------------------------------
// Create and edit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_appends_with_next_priority() {
    let mut tasks = loaded(&["A", "B"]).await;
    tasks.type_name("X");
    assert_eq!(tasks.submit().await.unwrap(), SubmitOutcome::Created);

    assert_eq!(
        tasks.store().requests(),
        vec![StoreRequest::Create {
            project: project(),
            name: "X".to_string(),
            priority: 3,
        }]
    );
    assert_eq!(names(&tasks), ["A", "B", "X"]);
    assert_eq!(tasks.session().draft_name(), "");
}

#[tokio::test]
async fn whitespace_submit_sends_nothing() {
    let mut tasks = loaded(&["A"]).await;
    tasks.type_name("   ");
    assert_eq!(tasks.submit().await.unwrap(), SubmitOutcome::Skipped);
    assert!(tasks.store().requests().is_empty());
}

#[tokio::test]
async fn draft_length_limit() {
    let mut tasks = loaded(&[]).await;
    assert!(tasks.type_name(&"a".repeat(19)));
    assert!(!tasks.type_name(&"a".repeat(20)));
    assert_eq!(tasks.session().draft_name().len(), 19);
}

#[tokio::test]
async fn edit_flow_renames_and_returns_to_create() {
    let mut tasks = loaded(&["A", "B"]).await;
    let b = id_of(&tasks, "B");

    tasks.begin_edit(&b).unwrap();
    assert_eq!(tasks.session().mode(), &EditMode::Edit(b.clone()));
    assert_eq!(tasks.session().draft_name(), "B");

    tasks.type_name("Bread");
    assert_eq!(tasks.submit().await.unwrap(), SubmitOutcome::Updated);

    assert_eq!(names(&tasks), ["A", "Bread"]);
    assert_eq!(tasks.session().mode(), &EditMode::Create);
}

#[tokio::test]
async fn clearing_the_draft_abandons_edit() {
    let mut tasks = loaded(&["A", "B"]).await;
    let b = id_of(&tasks, "B");
    tasks.begin_edit(&b).unwrap();

    tasks.type_name("");
    assert_eq!(tasks.session().mode(), &EditMode::Create);
    assert_eq!(tasks.session().draft_name(), "");
}

// ---------------------------------------------------------------------------
// Toggle and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_sends_status_before_toggle() {
    let mut tasks = loaded(&["A"]).await;
    let a = id_of(&tasks, "A");

    tasks.toggle_task(&a).await.unwrap();
    tasks.toggle_task(&a).await.unwrap();

    assert_eq!(
        tasks.store().requests(),
        vec![
            StoreRequest::Toggle {
                project: project(),
                id: a.clone(),
                status: false,
            },
            StoreRequest::Toggle {
                project: project(),
                id: a.clone(),
                status: true,
            },
        ]
    );
    assert!(!tasks.list().get(&a).unwrap().status);
}

#[tokio::test]
async fn delete_waits_for_store() {
    let mut tasks = loaded(&["A", "B"]).await;
    let a = id_of(&tasks, "A");
    tasks.store().fail_next(StoreError::Unreachable("offline".to_string()));

    let err = tasks.delete(&a).await.unwrap_err();
    assert!(matches!(err, SyncError::Store(StoreError::Unreachable(_))));
    assert_eq!(names(&tasks), ["A", "B"], "no optimistic removal");

    tasks.delete(&a).await.unwrap();
    assert_eq!(names(&tasks), ["B"]);
}

// ---------------------------------------------------------------------------
// Failures and shared stores
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_create_keeps_draft_and_list() {
    let mut tasks = loaded(&["A"]).await;
    tasks.type_name("B");
    tasks.store().fail_next(StoreError::Rejected {
        status: 500,
        message: "boom".to_string(),
    });

    assert!(tasks.submit().await.is_err());
    assert_eq!(names(&tasks), ["A"]);
    assert!(!tasks.list().is_loading());
    assert_eq!(tasks.session().draft_name(), "B");

    assert_eq!(tasks.submit().await.unwrap(), SubmitOutcome::Created);
    assert_eq!(names(&tasks), ["A", "B"]);
}

#[tokio::test]
async fn unreachable_store_on_first_load_stays_loading() {
    let store = InMemoryTaskStore::new();
    store.fail_next(StoreError::Unreachable("offline".to_string()));
    let mut tasks = ProjectTasks::new(project(), store);

    assert!(tasks.refresh().await.is_err());
    assert_eq!(tasks.list().view(), ListView::Loading);

    tasks.type_name("X");
    assert_eq!(tasks.submit().await, Err(SyncError::NotLoaded));
}

#[tokio::test]
async fn canonical_list_reflects_other_writers() {
    let store = Arc::new(InMemoryTaskStore::with_tasks(&project(), &["A"]));
    let mut alice = ProjectTasks::new(project(), Arc::clone(&store));
    let mut bob = ProjectTasks::new(project(), Arc::clone(&store));
    alice.refresh().await.unwrap();
    bob.refresh().await.unwrap();

    alice.type_name("B");
    alice.submit().await.unwrap();
    assert_eq!(names(&bob), ["A"]);

    let a = id_of(&bob, "A");
    bob.toggle_task(&a).await.unwrap();
    assert_eq!(names(&bob), ["A", "B"]);
}

#[tokio::test]
async fn projects_do_not_share_tasks() {
    let store = Arc::new(InMemoryTaskStore::with_tasks(&project(), &["A"]));
    let mut other = ProjectTasks::new(ProjectId::new("hardware"), Arc::clone(&store));
    other.refresh().await.unwrap();
    assert_eq!(other.list().view(), ListView::Empty);

    other.type_name("Nails");
    other.submit().await.unwrap();
    assert_eq!(store.snapshot(&project()).len(), 1);
}
