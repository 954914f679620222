//! Integration tests for the HTTP store client against an in-process
//! `tasklist-server`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;

use tasklist::store::http::HttpTaskStore;
use tasklist::store::{RemoteTaskStore, StoreError};
use tasklist::tasks::{ProjectTasks, SubmitOutcome};
use tasklist_proto::task::{ProjectId, Task, TaskId};
use url::Url;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn start() -> (HttpTaskStore, tokio::task::JoinHandle<()>) {
    let (addr, handle) = tasklist_server::server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start task server");
    (HttpTaskStore::new(base_url(addr)), handle)
}

fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn project() -> ProjectId {
    ProjectId::new("home")
}

fn names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Store operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_project_lists_empty() {
    let (store, _server) = start().await;
    assert!(store.list_tasks(&project()).await.unwrap().is_empty());
}

#[tokio::test]
async fn every_operation_returns_canonical_list() {
    let (store, _server) = start().await;

    store.create_task(&project(), "Dishes", 1).await.unwrap();
    store.create_task(&project(), "Laundry", 3).await.unwrap();
    let tasks = store.create_task(&project(), "Vacuum", 2).await.unwrap();
    assert_eq!(names(&tasks), ["Dishes", "Vacuum", "Laundry"]);

    let vacuum = tasks[1].id.clone();
    let tasks = store.update_task(&project(), &vacuum, "Mop").await.unwrap();
    assert_eq!(names(&tasks), ["Dishes", "Mop", "Laundry"]);

    let tasks = store.toggle_status(&project(), &vacuum, false).await.unwrap();
    assert!(tasks[1].status);

    let tasks = store.delete_task(&project(), &vacuum).await.unwrap();
    assert_eq!(names(&tasks), ["Dishes", "Laundry"]);

    assert_eq!(store.list_tasks(&project()).await.unwrap(), tasks);
}

#[tokio::test]
async fn invalid_name_is_rejected_with_400() {
    let (store, _server) = start().await;
    let err = store
        .create_task(&project(), "this name is far too long", 1)
        .await
        .unwrap_err();

    match err {
        StoreError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert!(!message.is_empty());
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_task_is_rejected_with_404() {
    let (store, _server) = start().await;
    store.create_task(&project(), "Dishes", 1).await.unwrap();

    let err = store
        .delete_task(&project(), &TaskId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 404, .. }));
}

#[tokio::test]
async fn reserved_characters_in_ids_reach_their_own_project() {
    let (store, _server) = start().await;
    store.create_task(&project(), "Dishes", 1).await.unwrap();

    for raw in ["team/alpha", "home?x", "home#b", "50% off", "a/../home"] {
        let odd = ProjectId::new(raw);
        let created = store.create_task(&odd, "Milk", 1).await.unwrap();
        assert_eq!(names(&created), ["Milk"], "create in {raw:?}");

        let listed = store.list_tasks(&odd).await.unwrap();
        assert_eq!(listed, created, "list of {raw:?}");

        let remaining = store.delete_task(&odd, &listed[0].id).await.unwrap();
        assert!(remaining.is_empty(), "delete in {raw:?}");
    }

    let home = store.list_tasks(&project()).await.unwrap();
    assert_eq!(names(&home), ["Dishes"]);
}

#[tokio::test]
async fn reserved_characters_in_task_ids_are_escaped() {
    let (store, _server) = start().await;
    store.create_task(&project(), "Dishes", 1).await.unwrap();

    let err = store
        .delete_task(&project(), &TaskId::new("x/../../tasks/home"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 404, .. }));
    assert_eq!(store.list_tasks(&project()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpTaskStore::new(base_url(addr));
    let err = store.list_tasks(&project()).await.unwrap_err();
    assert!(matches!(err, StoreError::Unreachable(_)));
}

// ---------------------------------------------------------------------------
// Engine over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn engine_round_trips_over_http() {
    let (store, _server) = start().await;
    let mut tasks = ProjectTasks::new(project(), store);
    tasks.refresh().await.unwrap();

    tasks.type_name("Dishes");
    assert_eq!(tasks.submit().await.unwrap(), SubmitOutcome::Created);
    tasks.type_name("Laundry");
    tasks.submit().await.unwrap();

    let dishes = tasks.list().at(0).unwrap().id.clone();
    tasks.toggle_task(&dishes).await.unwrap();
    assert!(tasks.list().at(0).unwrap().status);

    tasks.begin_edit(&dishes).unwrap();
    tasks.type_name("Plates");
    assert_eq!(tasks.submit().await.unwrap(), SubmitOutcome::Updated);

    let shown: Vec<&str> = tasks
        .list()
        .tasks()
        .unwrap()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(shown, ["Plates", "Laundry"]);
}

#[tokio::test]
async fn failed_rename_over_http_keeps_edit_mode() {
    let (store, _server) = start().await;
    let mut tasks = ProjectTasks::new(project(), store);
    tasks.refresh().await.unwrap();
    tasks.type_name("Dishes");
    tasks.submit().await.unwrap();

    let dishes = tasks.list().at(0).unwrap().id.clone();
    tasks.begin_edit(&dishes).unwrap();
    tasks
        .store()
        .delete_task(&project(), &dishes)
        .await
        .unwrap();

    tasks.type_name("Plates");
    assert!(tasks.submit().await.is_err());
    assert!(tasks.session().is_editing());
    assert_eq!(tasks.session().draft_name(), "Plates");
}
