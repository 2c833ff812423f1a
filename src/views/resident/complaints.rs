//! Resident complaints: list own complaints, file new ones

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::api::dto::NewComplaint;
use crate::api::SocietyApi;
use crate::domain::Complaint;
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::shared::validations::describe;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

const MISSING_FIELDS: &str = "Please provide both an issue type and description";

pub struct ResidentComplaintsView {
    ctx: ViewContext,
    complaints: Vec<Complaint>,
    feedback: Feedback,
}

impl ResidentComplaintsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::ResidentComplaints)?,
            complaints: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    /// File a complaint under one of the fixed categories.
    pub async fn file(&mut self, category: &str, description: &str) -> Outcome {
        if category.trim().is_empty() || description.trim().is_empty() {
            return self.feedback.reject(MISSING_FIELDS);
        }
        let complaint = NewComplaint::new(category, description);
        if let Err(errors) = complaint.validate() {
            return self.feedback.reject(describe(&errors));
        }

        match self.ctx.api.create_complaint(&self.ctx.token, &complaint).await {
            Ok(()) => refetch_after_write(self, "Complaint submitted successfully").await,
            Err(e) => self.feedback.fail(&e, "Failed to submit complaint"),
        }
    }
}

#[async_trait]
impl ResourceView for ResidentComplaintsView {
    fn route(&self) -> Route {
        Route::ResidentComplaints
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_complaints(&self.ctx.token).await {
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
