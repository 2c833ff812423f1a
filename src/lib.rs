//! # eSociety client
//!
//! Client side of the residential-society management system: residents file
//! complaints, book facilities and answer visitor requests; admins manage
//! facilities, complaints, bookings and visitors; security staff log arrivals
//! at the gate.
//!
//! ## Architecture
//!
//! - **domain**: entities as the server reports them
//! - **api**: the `SocietyApi` trait and its `reqwest` implementation
//! - **infrastructure**: where the session is persisted
//! - **session**: authenticator and session store
//! - **routing**: route table, route guard, navigation shell
//! - **views**: headless view models, one per role and collection
//!
//! A front end hydrates a [`SessionStore`], asks the [`RouteGuard`] whether a
//! route may be shown, mounts the matching view and calls `refresh` on it.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod routing;
pub mod session;
pub mod shared;
pub mod telemetry;
pub mod views;

pub use api::{HttpApi, SocietyApi};
pub use config::{default_config_path, default_session_path, AppConfig};
pub use domain::{Identity, Role};
pub use infrastructure::{FileSessionStorage, InMemorySessionStorage, SessionStorage};
pub use routing::{GuardState, NavigationShell, Refusal, Route, RouteGuard};
pub use session::SessionStore;
pub use shared::{ClientError, ClientResult};
pub use views::{Notice, Outcome, ResourceView};
