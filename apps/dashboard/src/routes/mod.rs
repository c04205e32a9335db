//! Route table, guard and client-side navigation.
pub mod guard;
pub mod history;

use std::fmt;

use tracing::{debug, info, warn};

use crate::session::SessionState;

pub use guard::GuardState;
pub use history::History;

/// Upper bound on chained redirects in one navigation.
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    DashboardIndex,
    Overview,
    Profile,
    Applications,
    AddJob,
    NotFound,
}

const ROUTES: &[(&str, Route)] = &[
    ("/", Route::Home),
    ("/login", Route::Login),
    ("/dashboard", Route::DashboardIndex),
    ("/dashboard/overview", Route::Overview),
    ("/dashboard/profile", Route::Profile),
    ("/dashboard/applications", Route::Applications),
    ("/dashboard/add-job", Route::AddJob),
];

impl Route {
    /// Resolves a location to a route. Query, fragment and trailing slashes are ignored.
    pub fn resolve(location: &str) -> Route {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        ROUTES
            .iter()
            .find(|(pattern, _)| *pattern == path)
            .map(|(_, route)| *route)
            .unwrap_or(Route::NotFound)
    }

    pub fn path(self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| *route == self)
            .map(|(pattern, _)| *pattern)
            .unwrap_or("*")
    }

    /// Everything nested under `/dashboard` requires an authenticated session.
    pub fn is_guarded(self) -> bool {
        matches!(
            self,
            Route::DashboardIndex
                | Route::Overview
                | Route::Profile
                | Route::Applications
                | Route::AddJob
        )
    }

    /// Index routes that immediately replace themselves with another route.
    pub fn redirect(self) -> Option<Route> {
        match self {
            Route::DashboardIndex => Some(Route::Overview),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "JobAgent",
            Route::Login => "Sign in",
            Route::DashboardIndex | Route::Overview => "Overview",
            Route::Profile => "Candidate Profile",
            Route::Applications => "Job Applications",
            Route::AddJob => "Add Job",
            Route::NotFound => "Not found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the shell should show after a navigation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    /// Guarded route while the session is still resolving: render nothing.
    Blank(Route),
    NotFound(String),
}

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    history: History,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current(&self) -> &str {
        self.history.current()
    }

    /// Pushes `location` and follows guard and index redirects until something renders.
    pub fn navigate(&mut self, location: &str, session: &SessionState) -> Navigation {
        debug!("Navigating to {location}");
        self.history.push(location);
        self.settle(session)
    }

    pub fn back(&mut self, session: &SessionState) -> Option<Navigation> {
        self.history.back()?;
        Some(self.settle(session))
    }

    /// Re-runs the guard for the current entry, e.g. once the session has resolved.
    pub fn reevaluate(&mut self, session: &SessionState) -> Navigation {
        self.settle(session)
    }

    fn settle(&mut self, session: &SessionState) -> Navigation {
        for _ in 0..MAX_REDIRECTS {
            let location = self.history.current().to_string();
            let route = Route::resolve(&location);
            if route == Route::NotFound {
                return Navigation::NotFound(location);
            }

            if route.is_guarded() {
                match GuardState::evaluate(session) {
                    GuardState::Loading => return Navigation::Blank(route),
                    GuardState::Unauthenticated => {
                        info!("Unauthenticated visit to {location}, redirecting to login");
                        self.history.replace(Route::Login.path());
                        continue;
                    }
                    GuardState::Authenticated => {}
                }
            }

            match route.redirect() {
                Some(target) => self.history.replace(target.path()),
                None => return Navigation::Render(route),
            }
        }

        let location = self.history.current().to_string();
        warn!("Redirect limit reached at {location}");
        Navigation::NotFound(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::candidate;

    fn signed_in() -> SessionState {
        SessionState::authenticated(candidate())
    }

    fn signed_out() -> SessionState {
        SessionState::anonymous(Some("Could not validate credentials".to_string()))
    }

    #[test]
    fn test_resolve_ignores_trailing_slash_and_query() {
        assert_eq!(Route::resolve("/dashboard/profile/"), Route::Profile);
        assert_eq!(Route::resolve("/dashboard/add-job?tab=manual"), Route::AddJob);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/nope"), Route::NotFound);
    }

    #[test]
    fn test_only_dashboard_routes_are_guarded() {
        assert!(!Route::Home.is_guarded());
        assert!(!Route::Login.is_guarded());
        assert!(Route::Overview.is_guarded());
        assert!(Route::AddJob.is_guarded());
    }

    #[test]
    fn test_dashboard_index_redirects_with_replace() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate("/dashboard", &signed_in());

        assert_eq!(outcome, Navigation::Render(Route::Overview));
        assert_eq!(nav.history().entries(), ["/", "/dashboard/overview"]);
    }

    #[test]
    fn test_unauthenticated_visit_redirects_to_login() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate("/dashboard/profile", &signed_out());

        assert_eq!(outcome, Navigation::Render(Route::Login));
        assert_eq!(nav.current(), "/login");

        // The guarded path was replaced, so back skips it.
        assert_eq!(nav.back(&signed_out()), Some(Navigation::Render(Route::Home)));
        assert_eq!(nav.current(), "/");
    }

    #[test]
    fn test_loading_session_renders_nothing() {
        let mut nav = Navigator::new();
        let outcome = nav.navigate("/dashboard/applications", &SessionState::loading());

        assert_eq!(outcome, Navigation::Blank(Route::Applications));
        assert_eq!(nav.current(), "/dashboard/applications");

        let resolved = nav.reevaluate(&signed_in());
        assert_eq!(resolved, Navigation::Render(Route::Applications));
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let mut nav = Navigator::new();
        assert_eq!(
            nav.navigate("/settings", &signed_in()),
            Navigation::NotFound("/settings".to_string())
        );
    }
}
