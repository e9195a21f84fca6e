//! # Client-Side Routing
//!
//! URL-to-screen mapping and the auth guard.
//!
//! ```rust
//! use signal_client::app::router::Route;
//!
//! assert_eq!(Route::parse("/analysis/42/share/options"), Some(Route::ShareOptions(42)));
//! assert_eq!(Route::ShareOptions(42).path(), "/analysis/42/share/options");
//! assert!(Route::Analyses.requires_auth());
//! assert!(!Route::Shared(42).requires_auth());
//! ```

use std::fmt;

/// Every screen the client can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Upload,
    SignalGenerator,
    GeneratorResults,
    Login,
    Signup,
    Profile,
    EditProfile,
    ChangePassword,
    Analyses,
    AnalysisDetail(i64),
    ShareOptions(i64),
    /// Standalone prompt, see [`SharePasswordScreen`](crate::app::screens::SharePasswordScreen)
    SharePassword(i64),
    Shared(i64),
    ForgotPassword,
    PasswordResetConfirm { uid: String, token: String },
    EmailVerificationSent,
    VerifyEmail { uid: String, token: String },
}

impl Route {
    /// Parse a client path. Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["upload"] => Route::Upload,
            ["signal-generator"] => Route::SignalGenerator,
            ["generator-results"] => Route::GeneratorResults,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["profile"] => Route::Profile,
            ["edit-profile"] => Route::EditProfile,
            ["change-password"] => Route::ChangePassword,
            ["analyses"] => Route::Analyses,
            ["analysis", id] => Route::AnalysisDetail(id.parse().ok()?),
            ["analysis", id, "share", "options"] => Route::ShareOptions(id.parse().ok()?),
            ["analysis", id, "share", "password"] => Route::SharePassword(id.parse().ok()?),
            ["share", id] => Route::Shared(id.parse().ok()?),
            ["forgot-password"] => Route::ForgotPassword,
            ["password-reset-confirm", uid, token] => Route::PasswordResetConfirm {
                uid: uid.to_string(),
                token: token.to_string(),
            },
            ["email-verification-sent"] => Route::EmailVerificationSent,
            ["verify-email", uid, token] => Route::VerifyEmail {
                uid: uid.to_string(),
                token: token.to_string(),
            },
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::SignalGenerator => "/signal-generator".to_string(),
            Route::GeneratorResults => "/generator-results".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::EditProfile => "/edit-profile".to_string(),
            Route::ChangePassword => "/change-password".to_string(),
            Route::Analyses => "/analyses".to_string(),
            Route::AnalysisDetail(id) => format!("/analysis/{id}"),
            Route::ShareOptions(id) => format!("/analysis/{id}/share/options"),
            Route::SharePassword(id) => format!("/analysis/{id}/share/password"),
            Route::Shared(id) => format!("/share/{id}"),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::PasswordResetConfirm { uid, token } => {
                format!("/password-reset-confirm/{uid}/{token}")
            }
            Route::EmailVerificationSent => "/email-verification-sent".to_string(),
            Route::VerifyEmail { uid, token } => format!("/verify-email/{uid}/{token}"),
        }
    }

    /// Screens that only make sense for a logged-in user.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Profile
                | Route::EditProfile
                | Route::ChangePassword
                | Route::Analyses
                | Route::AnalysisDetail(_)
                | Route::ShareOptions(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current location plus the page to return to after login.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    return_to: Option<Route>,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Route::Home,
            return_to: None,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Route remembered by the last guard redirect.
    pub fn return_to(&self) -> Option<&Route> {
        self.return_to.as_ref()
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Navigate, redirecting protected routes to `Login` when logged out.
    ///
    /// Returns the route actually shown.
    pub fn navigate(&mut self, route: Route, authenticated: bool) -> &Route {
        if route.requires_auth() && !authenticated {
            tracing::info!(target_route = %route, "Auth required, redirecting to login");
            self.return_to = Some(route);
            self.go(Route::Login);
        } else {
            self.go(route);
        }
        &self.current
    }

    /// Navigate to a raw path; unknown paths land on `Home`.
    pub fn navigate_path(&mut self, path: &str, authenticated: bool) -> &Route {
        let route = Route::parse(path).unwrap_or_else(|| {
            tracing::debug!(path, "Unknown path, showing home");
            Route::Home
        });
        self.navigate(route, authenticated)
    }

    /// Session expired: show the login screen and remember where we were.
    pub fn redirect_to_login(&mut self) {
        if self.current != Route::Login {
            self.return_to = Some(self.current.clone());
            self.go(Route::Login);
        }
    }

    /// After a successful login, go back to the remembered route or home.
    pub fn redirect_after_login(&mut self) -> &Route {
        let target = self.return_to.take().unwrap_or(Route::Home);
        self.go(target);
        &self.current
    }

    pub fn back(&mut self) -> &Route {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        }
        &self.current
    }

    fn go(&mut self, route: Route) {
        if route != self.current {
            let previous = std::mem::replace(&mut self.current, route);
            self.history.push(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_round_trips_through_its_path() {
        let routes = [
            Route::Home,
            Route::GeneratorResults,
            Route::AnalysisDetail(7),
            Route::SharePassword(7),
            Route::PasswordResetConfirm { uid: "MQ".into(), token: "c4x-abc".into() },
            Route::VerifyEmail { uid: "Mg".into(), token: "t0k".into() },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_bad_ids() {
        assert_eq!(Route::parse("/analysis/abc"), None);
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/analyses/?page=2"), Some(Route::Analyses));
    }

    #[test]
    fn test_guard_redirects_and_returns() {
        let mut router = Router::new();
        assert_eq!(router.navigate(Route::Analyses, false), &Route::Login);
        assert_eq!(router.return_to(), Some(&Route::Analyses));

        assert_eq!(router.redirect_after_login(), &Route::Analyses);
        assert!(router.return_to().is_none());
    }

    #[test]
    fn test_public_routes_pass_guard() {
        let mut router = Router::new();
        assert_eq!(router.navigate(Route::Shared(3), false), &Route::Shared(3));
        assert_eq!(router.navigate(Route::Upload, false), &Route::Upload);
        assert_eq!(router.back(), &Route::Shared(3));
    }

    #[test]
    fn test_redirect_to_login_remembers_current() {
        let mut router = Router::new();
        router.navigate(Route::AnalysisDetail(5), true);
        router.redirect_to_login();
        assert_eq!(router.current(), &Route::Login);
        assert_eq!(router.return_to(), Some(&Route::AnalysisDetail(5)));

        // Already on login: nothing changes
        router.redirect_to_login();
        assert_eq!(router.return_to(), Some(&Route::AnalysisDetail(5)));
    }
}
