//! Route guard.
//!
//! Navigation is re-evaluated against the session on every call; nothing is
//! cached between evaluations.

use std::fmt;
use std::str::FromStr;

use crate::session::{SessionStore, TokenStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Tests,
    Textbooks,
    Notes,
}

impl Route {
    /// Sidebar navigation order.
    pub const MENU: [Self; 4] = [Self::Dashboard, Self::Tests, Self::Textbooks, Self::Notes];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Tests => "/tests",
            Self::Textbooks => "/textbooks",
            Self::Notes => "/notes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Tests => "Tests",
            Self::Textbooks => "Textbooks",
            Self::Notes => "Notes",
        }
    }

    /// Every route except the login screen requires a session.
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Matches a path; `/` is the dashboard index. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Dashboard),
            "/login" => Some(Self::Login),
            "/dashboard" => Some(Self::Dashboard),
            "/tests" => Some(Self::Tests),
            "/textbooks" => Some(Self::Textbooks),
            "/notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| format!("Unknown route: {s}"))
    }
}

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    pub const fn route(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Evaluates a single navigation step.
    ///
    /// Unknown paths go to the dashboard. Protected routes without a session go
    /// to login with no return path kept. Login with a session goes to the
    /// dashboard.
    pub fn evaluate(path: &str, authenticated: bool) -> Navigation {
        let Some(route) = Route::from_path(path) else {
            return Navigation::Redirect(Route::Dashboard);
        };

        match (route, authenticated) {
            (route, false) if route.is_protected() => Navigation::Redirect(Route::Login),
            (Route::Login, true) => Navigation::Redirect(Route::Dashboard),
            (route, _) => Navigation::Render(route),
        }
    }

    /// Evaluates a navigation against the session's current state.
    pub fn check<S: TokenStore>(path: &str, session: &SessionStore<S>) -> Navigation {
        Self::evaluate(path, session.is_authenticated())
    }

    /// Follows redirects until a route renders.
    pub fn resolve(path: &str, authenticated: bool) -> Route {
        let mut navigation = Self::evaluate(path, authenticated);
        // Redirect targets are known routes, so this settles within two hops.
        for _ in 0..3 {
            match navigation {
                Navigation::Render(route) => return route,
                Navigation::Redirect(route) => {
                    navigation = Self::evaluate(route.path(), authenticated);
                }
            }
        }
        navigation.route()
    }
}
