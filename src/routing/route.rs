//! Route table

use std::fmt;

use crate::domain::Role;

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    ResidentDashboard,
    ResidentVisitors,
    ResidentComplaints,
    ResidentBookings,
    AdminDashboard,
    AdminFacilities,
    AdminComplaints,
    AdminBookings,
    AdminVisitors,
    AdminUsers,
    SecurityDashboard,
    SecurityVisitors,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Login,
        Route::ResidentDashboard,
        Route::ResidentVisitors,
        Route::ResidentComplaints,
        Route::ResidentBookings,
        Route::AdminDashboard,
        Route::AdminFacilities,
        Route::AdminComplaints,
        Route::AdminBookings,
        Route::AdminVisitors,
        Route::AdminUsers,
        Route::SecurityDashboard,
        Route::SecurityVisitors,
        Route::NotFound,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::ResidentDashboard => "/resident/dashboard",
            Route::ResidentVisitors => "/resident/visitors",
            Route::ResidentComplaints => "/resident/complaints",
            Route::ResidentBookings => "/resident/bookings",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminFacilities => "/admin/facilities",
            Route::AdminComplaints => "/admin/complaints",
            Route::AdminBookings => "/admin/bookings",
            Route::AdminVisitors => "/admin/visitors",
            Route::AdminUsers => "/admin/users",
            Route::SecurityDashboard => "/security/dashboard",
            Route::SecurityVisitors => "/security/visitors",
            Route::NotFound => "/404",
        }
    }

    /// Resolve a path. `/` and the empty path go to login; anything
    /// unrecognised is `NotFound`. Trailing slashes and query strings are
    /// ignored.
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Route::Login;
        }
        Route::ALL
            .into_iter()
            .filter(|r| *r != Route::NotFound)
            .find(|r| r.path() == trimmed)
            .unwrap_or(Route::NotFound)
    }

    /// Roles admitted to this route. `None` means the route is public.
    pub fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Route::Login | Route::NotFound => None,
            Route::ResidentDashboard
            | Route::ResidentVisitors
            | Route::ResidentComplaints
            | Route::ResidentBookings => Some(&[Role::Resident]),
            Route::AdminDashboard
            | Route::AdminFacilities
            | Route::AdminComplaints
            | Route::AdminBookings
            | Route::AdminVisitors
            | Route::AdminUsers => Some(&[Role::Admin]),
            Route::SecurityDashboard | Route::SecurityVisitors => Some(&[Role::Security]),
        }
    }

    pub fn is_public(self) -> bool {
        self.allowed_roles().is_none()
    }

    /// Where a role lands after login.
    pub fn landing(role: Role) -> Route {
        match role {
            Role::Resident => Route::ResidentDashboard,
            Role::Admin => Route::AdminDashboard,
            Role::Security => Route::SecurityDashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
