//! App event loop: login redirect, expired sessions and the auth guard.

mod common;

use common::{MockBackend, PASSWORD, PROTECTED_ID, USERNAME};
use shared::LoginRequest;
use signal_client::app::screens::{AnalysisListScreen, SharedAnalysisScreen};
use signal_client::app::{App, AppEvent, Route};
use signal_client::core::ApiService;
use std::time::Duration;

/// Pump events until `done` holds or about two seconds pass.
async fn pump_until(app: &mut App, done: impl Fn(&App) -> bool) {
    for _ in 0..100 {
        app.process_events();
        if done(app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not reached, route = {}", app.current_route());
}

/// Log in through the app and wait for the result to be applied.
async fn log_in(app: &mut App) {
    app.handle_login_click(USERNAME.into(), PASSWORD.into());
    pump_until(app, |app| app.status.as_deref() == Some("Login successful")).await;
}

async fn started_app(backend: &MockBackend) -> App {
    let mut app = App::new(backend.config()).expect("App should build in test");
    app.start().await.expect("Session restore should finish in test");
    app.process_events();
    app
}

#[tokio::test]
async fn test_guard_then_login_returns_to_requested_route() {
    // Arrange
    let backend = MockBackend::start().await;
    let mut app = started_app(&backend).await;
    assert!(!app.session.is_authenticated());

    // Act
    let shown = app.navigate(Route::Analyses).clone();
    log_in(&mut app).await;

    // Assert
    assert_eq!(shown, Route::Login);
    assert_eq!(app.current_route(), &Route::Analyses);
    assert_eq!(app.status.as_deref(), Some("Login successful"));
    assert!(app.login_error.is_none());
}

#[tokio::test]
async fn test_failed_login_sets_error_and_stays_on_login() {
    // Arrange
    let backend = MockBackend::start().await;
    let mut app = started_app(&backend).await;
    app.navigate(Route::Login);

    // Act
    app.handle_login_click(USERNAME.into(), "wrong".into());
    pump_until(&mut app, |app| app.login_error.is_some()).await;

    // Assert
    assert_eq!(app.login_error.as_deref(), Some("Invalid credentials"));
    assert_eq!(app.current_route(), &Route::Login);
    assert!(!app.session.is_authenticated());
}

#[tokio::test]
async fn test_blank_login_never_reaches_backend() {
    // Arrange
    let backend = MockBackend::start().await;
    let mut app = started_app(&backend).await;
    let before = backend.requests().len();

    // Act
    app.handle_login_click("  ".into(), String::new());

    // Assert
    assert_eq!(app.login_error.as_deref(), Some("Username and password required"));
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn test_expired_session_redirects_to_login() {
    // Arrange
    let backend = MockBackend::start().await;
    let mut app = started_app(&backend).await;
    log_in(&mut app).await;
    app.navigate(Route::AnalysisDetail(1));
    backend.expire_sessions();

    // Act
    let mut list = AnalysisListScreen::default();
    let loaded = list.load(app.api().as_ref()).await;
    app.process_events();

    // Assert
    assert!(!loaded);
    assert_eq!(app.current_route(), &Route::Login);
    assert_eq!(app.router.return_to(), Some(&Route::AnalysisDetail(1)));
    assert!(!app.session.is_authenticated());

    // Act: log in again and land back where we were
    app.status = None;
    log_in(&mut app).await;

    // Assert
    assert!(app.session.is_authenticated());
    assert_eq!(app.current_route(), &Route::AnalysisDetail(1));
}

#[tokio::test]
async fn test_wrong_share_password_does_not_redirect() {
    // Arrange
    let backend = MockBackend::start().await;
    let mut app = started_app(&backend).await;
    let route = Route::Shared(PROTECTED_ID);
    app.navigate(route.clone());
    let mut shared = SharedAnalysisScreen::new(PROTECTED_ID);
    shared.load(app.api().as_ref()).await;

    // Act
    shared.password = "guess".into();
    let unlocked = shared.submit_password(app.api().as_ref()).await;
    let handled = app.process_events();

    // Assert
    assert!(!unlocked);
    assert_eq!(handled, 0);
    assert_eq!(app.current_route(), &route);
}

#[tokio::test]
async fn test_logout_goes_home() {
    // Arrange
    let backend = MockBackend::start().await;
    let mut app = started_app(&backend).await;
    log_in(&mut app).await;
    app.navigate(Route::Profile);
    backend.set_logout_fails(true);

    // Act
    app.handle_logout_click();
    pump_until(&mut app, |app| app.current_route() == &Route::Home).await;

    // Assert
    assert!(!app.session.is_authenticated());
    // Protected routes are guarded again
    assert_eq!(app.navigate(Route::Profile), &Route::Login);
}

#[tokio::test]
async fn test_unauthorized_event_only_for_session_endpoints() {
    // Arrange
    let backend = MockBackend::start().await;
    let (client, events) = backend.client_with_events();

    // Act: wrong credentials are a form error, not an expired session
    let login = client
        .login(&LoginRequest {
            username: USERNAME.into(),
            password: "wrong".into(),
        })
        .await;
    let list = client.list_analyses().await;

    // Assert
    assert!(login.is_err());
    assert!(list.is_err());
    assert_eq!(
        events.try_recv().expect("One event should be queued"),
        AppEvent::Unauthorized {
            path: "/analyses/".into()
        }
    );
    assert!(events.try_recv().is_err());
}
