use std::time::Duration;

use reqwest::StatusCode;
use tokio::net::TcpListener;

use visitor_api::routes;
use visitor_api::state::AppStateInner;
use visitor_client::cache::{MessagesKey, QueryStatus, VisitorCountKey};
use visitor_client::form::{FILL_ALL_FIELDS, FormState, MessageForm, SUBMIT_FAILED, SubmitOutcome};
use visitor_client::list::{self, ListView};
use visitor_client::{ApiClient, ClientError, VisitorBook};
use visitor_db::Database;
use visitor_types::api::{CreateMessageRequest, VisitorCount};

async fn spawn_server() -> String {
    let state = AppStateInner::new(Database::open_in_memory().unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, routes::router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

/// An address that refuses connections.
async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn book(base_url: &str) -> VisitorBook {
    VisitorBook::new(ApiClient::new(base_url, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn counter_scenario_through_client() {
    let book = book(&spawn_server().await);

    assert_eq!(book.fetch_visitor_count().await.unwrap(), VisitorCount { count: 0 });
    assert_eq!(book.increment_visitor_count().await.unwrap(), VisitorCount { count: 1 });
    assert_eq!(book.cache().get::<VisitorCountKey>(), Some(VisitorCount { count: 1 }));
    assert_eq!(book.fetch_visitor_count().await.unwrap(), VisitorCount { count: 1 });
}

#[tokio::test]
async fn concurrent_client_increments() {
    let book = book(&spawn_server().await);

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let book = book.clone();
        tasks.spawn(async move { book.increment_visitor_count().await.unwrap() });
    }
    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }

    assert_eq!(book.fetch_visitor_count().await.unwrap().count, 20);
}

#[tokio::test]
async fn created_message_is_prepended_without_refetch() {
    let url = spawn_server().await;
    let book = book(&url);

    book.create_message(&CreateMessageRequest::new("Alice", "first")).await.unwrap();
    book.fetch_messages().await.unwrap();

    let created = book
        .create_message(&CreateMessageRequest::new("Bob", "second"))
        .await
        .unwrap();

    let cached = book.cache().get::<MessagesKey>().unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0], created);
    assert_eq!(cached[1].name, "Alice");

    // The store agrees once a fresh query lands
    let fresh = book.fetch_messages().await.unwrap();
    assert_eq!(fresh, cached);
}

#[tokio::test]
async fn create_returns_exact_fields() {
    let book = book(&spawn_server().await);

    let created = book
        .create_message(&CreateMessageRequest::new("Alice", "Hi"))
        .await
        .unwrap();

    assert_eq!(created.name, "Alice");
    assert_eq!(created.content, "Hi");
    assert!(created.id > 0);
}

#[tokio::test]
async fn validation_errors_surface_status_and_message() {
    let book = book(&spawn_server().await);

    for (name, content) in [("", "x"), ("x", ""), ("", "")] {
        let err = book
            .create_message(&CreateMessageRequest::new(name, content))
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Name and content are required");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    // Failed mutations leave the cache alone
    assert_eq!(book.cache().get::<MessagesKey>(), None);
}

#[tokio::test]
async fn list_view_tracks_queries() {
    let book = book(&spawn_server().await);
    assert_eq!(list::view(book.cache()), ListView::Loading);

    book.fetch_messages().await.unwrap();
    assert_eq!(list::view(book.cache()), ListView::Empty);

    let created = book
        .create_message(&CreateMessageRequest::new("Carol", "hey"))
        .await
        .unwrap();
    assert_eq!(list::view(book.cache()), ListView::Messages(vec![created]));
}

#[tokio::test]
async fn transport_failure_becomes_error_state() {
    let book = book(&dead_address().await);

    let err = book.fetch_messages().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(matches!(book.cache().status::<MessagesKey>(), QueryStatus::Error(_)));
    assert_eq!(list::view(book.cache()), ListView::Error);
}

#[tokio::test]
async fn form_submission_updates_both_entries() {
    let book = book(&spawn_server().await);
    book.fetch_visitor_count().await.unwrap();
    book.fetch_messages().await.unwrap();

    let mut form = MessageForm::new();
    form.name = "Alice".into();
    form.content = "Hi there".into();

    let outcome = form.submit(&book).await;

    let SubmitOutcome::Submitted(message) = outcome else {
        panic!("expected Submitted, got {outcome:?}");
    };
    assert_eq!(message.content, "Hi there");
    assert!(form.name.is_empty());
    assert!(form.content.is_empty());
    assert_eq!(form.state(), FormState::Idle);
    assert_eq!(book.cache().get::<VisitorCountKey>(), Some(VisitorCount { count: 1 }));
    assert_eq!(book.cache().get::<MessagesKey>().unwrap()[0], message);
}

#[tokio::test]
async fn invalid_form_makes_no_calls() {
    let book = book(&spawn_server().await);

    let mut form = MessageForm::new();
    form.content = "no name".into();

    let outcome = form.submit(&book).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(ref n) if n.0 == FILL_ALL_FIELDS));
    assert_eq!(book.fetch_visitor_count().await.unwrap().count, 0);
    assert!(book.fetch_messages().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_post_keeps_fields_and_the_increment() {
    let book = book(&spawn_server().await);

    // Passes the form's checks but the server rejects the name length
    let mut form = MessageForm::new();
    form.name = "n".repeat(101);
    form.content = "too long a name".into();

    let outcome = form.submit(&book).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref n) if n.0 == SUBMIT_FAILED));
    assert_eq!(form.name.len(), 101);
    assert_eq!(form.content, "too long a name");
    assert_eq!(book.fetch_visitor_count().await.unwrap().count, 1);
    assert!(book.fetch_messages().await.unwrap().is_empty());
}
