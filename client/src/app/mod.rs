//! # Application Orchestrator
//!
//! The [`App`] struct coordinates the session, the router and background tasks.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front end (owns App)                                       │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App                                                 │   │
//! │  │  - process_events()  drains async results            │   │
//! │  │  - handle_*_click()  spawns user actions             │   │
//! │  │  - navigate()        router + auth guard             │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │ Arc<Session>                                │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  Session: cached user behind a short-lived RwLock     │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │  Tokio tasks: login, logout, session restore                │
//! │  ApiClient: emits AppEvent::Unauthorized on expired session │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Screens ([`screens`]) are plain state models; the front end creates them when
//! the router lands on their route and drives them with `app.api()`.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use signal_client::app::App;
//! use signal_client::app::router::Route;
//!
//! # async fn run() -> signal_client::core::Result<()> {
//! let mut app = App::from_env()?;
//! app.start();
//!
//! app.navigate(Route::Analyses);
//! app.handle_login_click("alice".into(), "s3cret-pass".into());
//!
//! // Once per frame / loop iteration
//! app.process_events();
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod router;
pub mod screens;
pub mod session;

pub use events::AppEvent;
pub use router::{Route, Router};
pub use session::{Registration, Session, SessionState};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::debug::spawn_tracked;
use crate::services::api::ApiClient;
use async_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Session, router and the async event channel.
pub struct App {
    pub session: Arc<Session>,
    pub router: Router,
    /// Last loading or status line
    pub status: Option<String>,
    /// Error of the last login attempt, if it failed
    pub login_error: Option<String>,
    /// Async task results, polled by [`App::process_events`]
    pub event_rx: Receiver<AppEvent>,
    event_tx: Sender<AppEvent>,
}

impl App {
    /// Build an app talking to the backend described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let (event_tx, event_rx) = unbounded();
        let client = ApiClient::new(config)?.with_events(event_tx.clone());
        Ok(Self::with_service(Arc::new(client), event_tx, event_rx))
    }

    /// Build from environment variables (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Build around any service. `event_tx` should be the sender the service
    /// reports unauthorized responses on.
    pub fn with_service(
        api: Arc<dyn ApiService>,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
    ) -> Self {
        tracing::info!("App initialized, event channel created");
        Self {
            session: Session::new(api),
            router: Router::new(),
            status: None,
            login_error: None,
            event_rx,
            event_tx,
        }
    }

    pub fn api(&self) -> Arc<dyn ApiService> {
        self.session.api()
    }

    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Restore the server session in the background.
    ///
    /// Reports [`AppEvent::SessionRestored`] when done.
    pub fn start(&self) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        spawn_tracked("session_restore", async move {
            let authenticated = session.initialize().await;
            let _ = tx.send(AppEvent::SessionRestored { authenticated }).await;
        })
    }

    pub fn current_route(&self) -> &Route {
        self.router.current()
    }

    /// Navigate with the auth guard applied.
    pub fn navigate(&mut self, route: Route) -> &Route {
        let authenticated = self.session.is_authenticated();
        self.router.navigate(route, authenticated)
    }

    pub fn navigate_path(&mut self, path: &str) -> &Route {
        let authenticated = self.session.is_authenticated();
        self.router.navigate_path(path, authenticated)
    }

    /// Start a login. The outcome arrives as [`AppEvent::LoginResult`].
    pub fn handle_login_click(&mut self, username: String, password: String) {
        if username.trim().is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return;
        }
        self.login_error = None;

        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        spawn_tracked("login", async move {
            let _ = tx.send(AppEvent::Loading("Logging in...".to_string())).await;
            let result = session
                .login(&username, &password)
                .await
                .map_err(|e| e.user_message(screens::auth::LOGIN_FAILED));
            let _ = tx.send(AppEvent::LoginResult(result)).await;
        });
    }

    /// Start a logout. The cached user is cleared even if the request fails.
    pub fn handle_logout_click(&self) {
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        spawn_tracked("logout", async move {
            if let Err(e) = session.logout().await {
                tracing::warn!(error = %e, "Logout error");
            }
            let _ = tx.send(AppEvent::LogoutComplete).await;
        });
    }

    /// Apply every pending async result. Never blocks.
    ///
    /// Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        if processed > 0 {
            tracing::debug!(processed, route = %self.router.current(), "Processed events");
        }
        processed
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Unauthorized { path } => {
                tracing::warn!(%path, "Session expired, redirecting to login");
                self.session.clear();
                self.router.redirect_to_login();
            }
            AppEvent::SessionRestored { authenticated } => {
                self.status = None;
                if !authenticated && self.router.current().requires_auth() {
                    self.router.redirect_to_login();
                }
            }
            AppEvent::LoginResult(Ok(message)) => {
                tracing::info!("Login successful");
                self.status = Some(message);
                self.login_error = None;
                self.router.redirect_after_login();
            }
            AppEvent::LoginResult(Err(error)) => {
                tracing::warn!(%error, "Login failed");
                self.status = None;
                self.login_error = Some(error);
            }
            AppEvent::LogoutComplete => {
                self.status = None;
                self.router.navigate(Route::Home, false);
            }
            AppEvent::Loading(message) => {
                self.status = Some(message);
            }
        }
    }
}
