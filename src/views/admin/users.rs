//! User registration (admin only)

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::api::dto::RegisterRequest;
use crate::api::SocietyApi;
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::shared::validations::describe;
use crate::views::{Feedback, Notice, Outcome, ViewContext};

/// Registration form. There is no user list to fetch.
pub struct UsersView {
    ctx: ViewContext,
    feedback: Feedback,
}

impl UsersView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::AdminUsers)?,
            feedback: Feedback::default(),
        })
    }

    pub async fn register(&mut self, request: RegisterRequest) -> Outcome {
        if let Err(errors) = request.validate() {
            return self.feedback.reject(describe(&errors));
        }

        match self.ctx.api.register_user(&self.ctx.token, &request).await {
            Ok(()) => {
                info!(email = %request.email, role = %request.role, "user registered");
                self.feedback
                    .succeed(format!("Registered {} as {}", request.email, request.role));
                Outcome::Done
            }
            Err(e) => self.feedback.fail(&e, "Failed to register user"),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.feedback.notice()
    }

    pub fn dismiss(&mut self) {
        self.feedback.dismiss();
    }
}
