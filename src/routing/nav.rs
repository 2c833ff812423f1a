//! Navigation shell

use crate::domain::{Identity, Role};
use crate::session::SessionStore;
use crate::shared::ClientResult;

use super::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Go(Route),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
}

impl NavLink {
    const fn go(label: &'static str, route: Route) -> Self {
        Self {
            label,
            target: NavTarget::Go(route),
        }
    }
}

const LOGOUT: NavLink = NavLink {
    label: "Logout",
    target: NavTarget::Logout,
};

const RESIDENT_LINKS: &[NavLink] = &[
    NavLink::go("Dashboard", Route::ResidentDashboard),
    NavLink::go("Visitors", Route::ResidentVisitors),
    NavLink::go("Complaints", Route::ResidentComplaints),
    NavLink::go("Bookings", Route::ResidentBookings),
];

const ADMIN_LINKS: &[NavLink] = &[
    NavLink::go("Admin Panel", Route::AdminDashboard),
    NavLink::go("Facilities", Route::AdminFacilities),
    NavLink::go("Complaints", Route::AdminComplaints),
    NavLink::go("Bookings", Route::AdminBookings),
    NavLink::go("Visitors", Route::AdminVisitors),
    NavLink::go("Users", Route::AdminUsers),
];

const SECURITY_LINKS: &[NavLink] = &[
    NavLink::go("Security Log", Route::SecurityDashboard),
    NavLink::go("Visitors", Route::SecurityVisitors),
];

pub struct NavigationShell;

impl NavigationShell {
    /// Links for the current identity; a lone Login link when signed out.
    pub fn links(identity: Option<&Identity>) -> Vec<NavLink> {
        let Some(identity) = identity else {
            return vec![NavLink::go("Login", Route::Login)];
        };
        let role_links = match identity.role {
            Role::Resident => RESIDENT_LINKS,
            Role::Admin => ADMIN_LINKS,
            Role::Security => SECURITY_LINKS,
        };
        role_links.iter().copied().chain([LOGOUT]).collect()
    }

    /// Log out and return where to go next.
    pub async fn logout(session: &mut SessionStore) -> ClientResult<Route> {
        session.logout().await?;
        Ok(Route::Login)
    }
}
