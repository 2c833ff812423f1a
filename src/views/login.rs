//! Login screen

use tracing::debug;

use super::{Feedback, Notice};
use crate::api::dto::LoginForm;
use crate::api::SocietyApi;
use crate::routing::{GuardState, Refusal, Route};
use crate::session::SessionStore;

const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Default)]
pub struct LoginView {
    feedback: Feedback,
}

impl LoginView {
    /// Signed-in users are sent to their landing route instead.
    pub fn mount(session: &SessionStore) -> Result<Self, Refusal> {
        match session.state() {
            GuardState::Authenticated(role) => Err(Refusal::Redirect(Route::landing(role))),
            GuardState::Loading | GuardState::Unauthenticated => Ok(Self::default()),
        }
    }

    /// Returns the route to show next on success. On failure the session is
    /// untouched and the error is left on the view.
    pub async fn submit(
        &mut self,
        api: &dyn SocietyApi,
        session: &mut SessionStore,
        username: &str,
        password: &str,
    ) -> Option<Route> {
        let form = LoginForm::new(username, password);
        match session.login(api, &form).await {
            Ok(identity) => {
                self.feedback.clear();
                let landing = Route::landing(identity.role);
                debug!(%landing, "login succeeded");
                Some(landing)
            }
            Err(e) => {
                self.feedback.fail(&e, LOGIN_FAILED);
                None
            }
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.feedback.notice()
    }

    pub fn dismiss(&mut self) {
        self.feedback.dismiss();
    }
}
