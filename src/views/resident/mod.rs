//! Resident area

mod bookings;
mod complaints;
mod dashboard;
mod visitors;

pub use bookings::ResidentBookingsView;
pub use complaints::ResidentComplaintsView;
pub use dashboard::{MenuCard, ResidentDashboard};
pub use visitors::ResidentVisitorsView;
