//! Every complaint in the society; admins resolve them

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::SocietyApi;
use crate::domain::Complaint;
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

pub struct AdminComplaintsView {
    ctx: ViewContext,
    complaints: Vec<Complaint>,
    feedback: Feedback,
}

impl AdminComplaintsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::AdminComplaints)?,
            complaints: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    /// Only pending complaints can be resolved; anything else is refused
    /// without a request.
    pub async fn resolve(&mut self, complaint_id: &str) -> Outcome {
        match self.complaints.iter().find(|c| c.id == complaint_id) {
            Some(c) if c.can_resolve() => {}
            Some(_) => return self.feedback.reject("Complaint is already resolved"),
            None => return self.feedback.reject(format!("Complaint {complaint_id} not found")),
        }

        match self
            .ctx
            .api
            .resolve_complaint(&self.ctx.token, complaint_id)
            .await
        {
            Ok(()) => refetch_after_write(self, "Complaint resolved successfully").await,
            Err(e) => self.feedback.fail(&e, "Failed to resolve complaint"),
        }
    }
}

#[async_trait]
impl ResourceView for AdminComplaintsView {
    fn route(&self) -> Route {
        Route::AdminComplaints
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_all_complaints(&self.ctx.token).await {
            Ok(complaints) => {
                self.complaints = complaints;
                self.feedback.clear();
                Outcome::Done
            }
            Err(e) => self.feedback.fail(&e, "Failed to fetch complaints"),
        }
    }

    fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }
}
