//! Admin area

mod bookings;
mod complaints;
mod dashboard;
mod facilities;
mod users;
mod visitors;

pub use bookings::AdminBookingsView;
pub use complaints::AdminComplaintsView;
pub use dashboard::{AdminDashboard, SocietyStats};
pub use facilities::{FacilitiesView, FacilityDraft};
pub use users::UsersView;
pub use visitors::AdminVisitorsView;
