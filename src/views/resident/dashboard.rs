//! Resident landing page

use crate::routing::{Refusal, Route, RouteGuard};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCard {
    pub title: &'static str,
    pub blurb: &'static str,
    pub route: Route,
}

const CARDS: [MenuCard; 3] = [
    MenuCard {
        title: "Visitor Management",
        blurb: "Approve or deny guest entries.",
        route: Route::ResidentVisitors,
    },
    MenuCard {
        title: "Complaint Tracking",
        blurb: "Report and track issues like maintenance.",
        route: Route::ResidentComplaints,
    },
    MenuCard {
        title: "Facility Booking",
        blurb: "Book amenities like the gym or clubhouse.",
        route: Route::ResidentBookings,
    },
];

/// Static menu; nothing to fetch.
pub struct ResidentDashboard {
    greeting: String,
}

impl ResidentDashboard {
    pub fn mount(session: &SessionStore) -> Result<Self, Refusal> {
        RouteGuard::admit(&session.state(), Route::ResidentDashboard)?;
        let name = session
            .identity()
            .map(|i| i.display_name().to_string())
            .unwrap_or_default();
        Ok(Self {
            greeting: format!("Welcome, {name}"),
        })
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn cards(&self) -> &'static [MenuCard] {
        &CARDS
    }
}
