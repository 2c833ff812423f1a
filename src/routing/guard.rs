//! Route guard

use std::fmt;

use tracing::debug;

use super::Route;
use crate::domain::Role;

/// What the guard knows about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Hydration has not finished.
    Loading,
    Unauthenticated,
    Authenticated(Role),
}

/// Why a route was not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Still hydrating; show a spinner and ask again.
    Pending,
    /// Navigate here instead.
    Redirect(Route),
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::Pending => f.write_str("loading"),
            Refusal::Redirect(route) => write!(f, "redirect to {route}"),
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    /// One membership check per navigation.
    ///
    /// Public routes are always admitted. Everything else needs an
    /// authenticated role from the route's allow-list, otherwise the answer
    /// is a redirect to login.
    pub fn admit(state: &GuardState, route: Route) -> Result<(), Refusal> {
        let Some(allowed) = route.allowed_roles() else {
            return Ok(());
        };
        match state {
            GuardState::Loading => Err(Refusal::Pending),
            GuardState::Authenticated(role) if allowed.contains(role) => Ok(()),
            GuardState::Authenticated(role) => {
                debug!(%route, %role, "role not allowed on route");
                Err(Refusal::Redirect(Route::Login))
            }
            GuardState::Unauthenticated => Err(Refusal::Redirect(Route::Login)),
        }
    }

    /// Resolve a path to the route that should actually be shown.
    ///
    /// `None` while loading. An authenticated user hitting `/login` is sent
    /// to their landing route.
    pub fn resolve(state: &GuardState, path: &str) -> Option<Route> {
        let route = Route::from_path(path);
        match (route, state) {
            (_, GuardState::Loading) if !route.is_public() => None,
            (Route::Login, GuardState::Authenticated(role)) => Some(Route::landing(*role)),
            _ => match Self::admit(state, route) {
                Ok(()) => Some(route),
                Err(Refusal::Redirect(to)) => Some(to),
                Err(Refusal::Pending) => None,
            },
        }
    }
}
