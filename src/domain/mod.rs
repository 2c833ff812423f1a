//! Domain layer: entities shared by the API client and the views
//!
//! Everything here is a transient copy of server state.

pub mod booking;
pub mod complaint;
pub mod facility;
pub mod identity;
pub mod role;
pub mod timestamp;
pub mod visitor;

pub use booking::Booking;
pub use complaint::{Complaint, ComplaintCategory, ComplaintStatus};
pub use facility::Facility;
pub use identity::Identity;
pub use role::Role;
pub use visitor::{Decision, GateStatus, Visitor, VisitorStatus};
