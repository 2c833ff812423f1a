//! Routes, the guard in front of them, and the navigation shell

mod guard;
mod nav;
mod route;

pub use guard::{GuardState, Refusal, RouteGuard};
pub use nav::{NavLink, NavTarget, NavigationShell};
pub use route::Route;
