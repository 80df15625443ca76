mod common;

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;

use blogdeck::auth::{AuthEvent, IdentityProvider};
use blogdeck::config::SecureString;
use blogdeck::model::{CreateBlogInput, CreateCommentInput, CreatePostInput, User};
use blogdeck::shutdown::ShutdownCoordinator;
use blogdeck::ui::app::UiCommand;
use blogdeck::ui::events::AppEvent;
use blogdeck::ui::worker::{fetch_blogs, subscribe_auth_events, Worker};
use common::{blog, comment, post, FakeApi, FakeIdentity, GOOD_PASSWORD};

fn worker(api: Arc<FakeApi>, identity: Arc<FakeIdentity>) -> (Worker, Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    (Worker::new(api, identity, tx), rx)
}

/// Poll the UI channel without blocking the runtime.
async fn next_event(rx: &Receiver<AppEvent>) -> Option<AppEvent> {
    for _ in 0..200 {
        if let Ok(event) = rx.try_recv() {
            return Some(event);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    None
}

#[tokio::test]
async fn fetch_emits_numbered_snapshot() {
    let api = Arc::new(FakeApi::with_blogs(vec![blog("b1", "Travel", vec![])]));
    let (worker, rx) = worker(api, Arc::new(FakeIdentity::signed_out()));

    worker.dispatch(UiCommand::FetchBlogs).await.unwrap();
    worker.dispatch(UiCommand::FetchBlogs).await.unwrap();

    match rx.try_recv().unwrap() {
        AppEvent::BlogsLoaded { seq, blogs } => {
            assert_eq!(seq, 1);
            assert_eq!(blogs[0].name, "Travel");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(matches!(rx.try_recv().unwrap(), AppEvent::BlogsLoaded { seq: 2, .. }));
}

#[tokio::test]
async fn successful_mutation_refetches() {
    let api = Arc::new(FakeApi::with_blogs(vec![blog(
        "b1",
        "Travel",
        vec![post("p1", "Lisbon", vec![comment("c1", "Lovely")])],
    )]));
    let (worker, rx) = worker(Arc::clone(&api), Arc::new(FakeIdentity::signed_out()));

    worker
        .dispatch(UiCommand::CreateBlog(CreateBlogInput {
            name: "Food".to_string(),
        }))
        .await
        .unwrap();
    worker
        .dispatch(UiCommand::CreatePost(CreatePostInput {
            title: "Porto".to_string(),
            blog_posts_id: "b1".to_string(),
        }))
        .await
        .unwrap();
    worker
        .dispatch(UiCommand::CreateComment(CreateCommentInput {
            content: "Agreed".to_string(),
            post_comments_id: "p1".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(api.list_calls(), 3);
    assert_eq!(*api.mutations.lock(), vec!["NewBlog", "NewPost", "NewComment"]);

    let mut last = None;
    while let Ok(AppEvent::BlogsLoaded { seq, blogs }) = rx.try_recv() {
        last = Some((seq, blogs));
    }
    let (seq, blogs) = last.unwrap();
    assert_eq!(seq, 3);
    assert_eq!(blogs.len(), 2);
    assert_eq!(blogs[0].posts().count(), 2);
    let lisbon = blogs[0].posts().next().unwrap();
    assert_eq!(lisbon.comments().count(), 2);
}

#[tokio::test]
async fn failed_mutation_does_not_refetch() {
    let api = Arc::new(FakeApi::default());
    *api.fail_mutations.lock() = true;
    let (worker, rx) = worker(Arc::clone(&api), Arc::new(FakeIdentity::signed_out()));

    worker
        .dispatch(UiCommand::CreateBlog(CreateBlogInput {
            name: "Food".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(api.list_calls(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failed_read_emits_nothing() {
    let api = Arc::new(FakeApi::default());
    *api.fail_reads.lock() = true;
    let (worker, rx) = worker(Arc::clone(&api), Arc::new(FakeIdentity::signed_out()));

    worker.dispatch(UiCommand::FetchBlogs).await.unwrap();

    assert_eq!(api.list_calls(), 1);
    assert!(rx.try_recv().is_err());
    assert!(fetch_blogs(api.as_ref()).await.is_none());
}

#[tokio::test]
async fn resolve_user_reports_generation() {
    let (worker, rx) = worker(
        Arc::new(FakeApi::default()),
        Arc::new(FakeIdentity::signed_in("alice")),
    );

    worker
        .dispatch(UiCommand::ResolveUser { generation: 7 })
        .await
        .unwrap();

    match rx.try_recv().unwrap() {
        AppEvent::UserResolved { generation, user } => {
            assert_eq!(generation, 7);
            assert_eq!(user, Some(User::new("alice")));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn resolve_user_for_guest_is_none() {
    let (worker, rx) = worker(
        Arc::new(FakeApi::default()),
        Arc::new(FakeIdentity::signed_out()),
    );

    worker
        .dispatch(UiCommand::ResolveUser { generation: 0 })
        .await
        .unwrap();

    assert!(matches!(
        rx.try_recv().unwrap(),
        AppEvent::UserResolved { user: None, .. }
    ));
}

#[tokio::test]
async fn unreachable_provider_reports_lookup_failure() {
    let identity = FakeIdentity::signed_in("alice");
    *identity.fail_lookups.lock() = true;
    let (worker, rx) = worker(Arc::new(FakeApi::default()), Arc::new(identity));

    worker
        .dispatch(UiCommand::ResolveUser { generation: 3 })
        .await
        .unwrap();

    assert!(matches!(
        rx.try_recv().unwrap(),
        AppEvent::UserLookupFailed { generation: 3 }
    ));
}

#[tokio::test]
async fn bad_password_reports_login_failure() {
    let (worker, rx) = worker(
        Arc::new(FakeApi::default()),
        Arc::new(FakeIdentity::signed_out()),
    );

    worker
        .dispatch(UiCommand::SignIn {
            username: "alice".to_string(),
            password: SecureString::new("wrong"),
        })
        .await
        .unwrap();

    match rx.try_recv().unwrap() {
        AppEvent::LoginFailed(message) => assert!(message.contains("Incorrect username")),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn auth_events_reach_the_ui_through_subscription() {
    let identity = Arc::new(FakeIdentity::signed_out());
    let (worker, rx) = worker(Arc::new(FakeApi::default()), Arc::clone(&identity));
    let (tx, auth_rx) = mpsc::channel();
    let subscription =
        subscribe_auth_events(&tokio::runtime::Handle::current(), identity.subscribe(), tx);

    worker
        .dispatch(UiCommand::SignIn {
            username: "alice".to_string(),
            password: SecureString::new(GOOD_PASSWORD),
        })
        .await
        .unwrap();
    worker.dispatch(UiCommand::SignOut).await.unwrap();

    assert!(matches!(
        next_event(&auth_rx).await,
        Some(AppEvent::Auth(AuthEvent::SignedIn))
    ));
    assert!(matches!(
        next_event(&auth_rx).await,
        Some(AppEvent::Auth(AuthEvent::SignedOut))
    ));
    assert!(rx.try_recv().is_err());
    assert!(subscription.is_active());
}

#[tokio::test]
async fn dropped_subscription_stops_forwarding() {
    let identity = Arc::new(FakeIdentity::signed_out());
    let (tx, rx) = mpsc::channel();
    let subscription =
        subscribe_auth_events(&tokio::runtime::Handle::current(), identity.subscribe(), tx);

    drop(subscription);
    tokio::time::sleep(Duration::from_millis(20)).await;
    identity.publish(AuthEvent::SignedIn);

    assert!(next_event(&rx).await.is_none());
}

#[tokio::test]
async fn run_serves_commands_until_shutdown() {
    let api = Arc::new(FakeApi::default());
    let (worker, rx) = worker(Arc::clone(&api), Arc::new(FakeIdentity::signed_out()));
    let (command_tx, command_rx) = tokio::sync::mpsc::channel(8);
    let shutdown = ShutdownCoordinator::new();
    let task = tokio::spawn(worker.run(command_rx, shutdown.handle()));

    command_tx.send(UiCommand::FetchBlogs).await.unwrap();
    assert!(matches!(
        next_event(&rx).await,
        Some(AppEvent::BlogsLoaded { seq: 1, .. })
    ));

    shutdown.signal();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("worker did not stop")
        .unwrap();
}
