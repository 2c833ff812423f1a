//! Security area

mod visitors;

pub use visitors::{GateSummary, SecurityVisitorsView};
