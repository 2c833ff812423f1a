//! Headless resource views
//!
//! A view is mounted through the route guard, fetches its collection on
//! `refresh`, and exposes one method per user action. Actions never return
//! errors: they report an [`Outcome`] and leave a dismissible [`Notice`] on
//! the view, which stays usable afterwards. Every successful write is
//! followed by a full re-fetch.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::api::SocietyApi;
use crate::routing::{Refusal, Route, RouteGuard};
use crate::session::SessionStore;
use crate::shared::ClientError;

pub mod admin;
pub mod login;
pub mod resident;
pub mod security;

/// Message shown above a view until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
    /// The action went through but the view could not be brought up to date.
    Warning(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Error(text) | Notice::Success(text) | Notice::Warning(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Result of one view action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Rejected locally; no request was made.
    Invalid(String),
    /// The server or the transport failed.
    Failed(String),
    /// The server rejected the bearer token. The caller should invalidate
    /// the session and go to login.
    SessionExpired(String),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

/// Notice slot shared by every view.
#[derive(Debug, Default)]
pub struct Feedback {
    notice: Option<Notice>,
}

impl Feedback {
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }

    pub(crate) fn clear(&mut self) {
        self.notice = None;
    }

    pub(crate) fn reject(&mut self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.notice = Some(Notice::Error(message.clone()));
        Outcome::Invalid(message)
    }

    pub(crate) fn fail(&mut self, err: &ClientError, fallback: &str) -> Outcome {
        let message = err.user_message(fallback);
        warn!(error = %err, "{fallback}");
        self.notice = Some(Notice::Error(message.clone()));
        if err.is_unauthorized() {
            Outcome::SessionExpired(message)
        } else {
            Outcome::Failed(message)
        }
    }

    pub(crate) fn succeed(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Warning(message.into()));
    }
}

/// What a mounted view needs to talk to the API.
#[derive(Clone)]
pub(crate) struct ViewContext {
    pub api: Arc<dyn SocietyApi>,
    pub token: String,
}

impl ViewContext {
    /// Run the guard for `route` and capture the caller's token.
    pub fn admit(
        api: Arc<dyn SocietyApi>,
        session: &SessionStore,
        route: Route,
    ) -> Result<Self, Refusal> {
        RouteGuard::admit(&session.state(), route)?;
        let identity = session
            .identity()
            .ok_or(Refusal::Redirect(Route::Login))?;
        Ok(Self {
            api,
            token: identity.token.clone(),
        })
    }
}

/// Common surface of the mounted views.
#[async_trait]
pub trait ResourceView: Send {
    fn route(&self) -> Route;

    /// Fetch everything the view shows.
    async fn refresh(&mut self) -> Outcome;

    fn feedback(&self) -> &Feedback;
    fn feedback_mut(&mut self) -> &mut Feedback;

    fn notice(&self) -> Option<&Notice> {
        self.feedback().notice()
    }

    fn dismiss(&mut self) {
        self.feedback_mut().dismiss();
    }
}

/// Refresh after a successful write. The write stands even when the
/// refresh fails: the outcome stays `Done` and the notice becomes a warning
/// naming both. A rejected token still ends the session.
pub(crate) async fn refetch_after_write<V: ResourceView + ?Sized>(
    view: &mut V,
    success: &str,
) -> Outcome {
    match view.refresh().await {
        Outcome::Done => {
            view.feedback_mut().succeed(success);
            Outcome::Done
        }
        Outcome::SessionExpired(message) => Outcome::SessionExpired(message),
        Outcome::Invalid(message) | Outcome::Failed(message) => {
            warn!(%message, "write succeeded but the view is stale");
            view.feedback_mut().warn(format!("{success}. {message}"));
            Outcome::Done
        }
    }
}
