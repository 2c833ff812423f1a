//! Resident visitor approvals

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::SocietyApi;
use crate::domain::{Decision, Visitor};
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

pub struct ResidentVisitorsView {
    ctx: ViewContext,
    pending: Vec<Visitor>,
    feedback: Feedback,
}

impl ResidentVisitorsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::ResidentVisitors)?,
            pending: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    /// Visitors waiting for a decision.
    pub fn pending(&self) -> &[Visitor] {
        &self.pending
    }

    pub async fn decide(&mut self, visitor_id: &str, decision: Decision) -> Outcome {
        if !self.pending.iter().any(|v| v.id == visitor_id && v.is_pending()) {
            return self
                .feedback
                .reject(format!("Visitor {visitor_id} is not awaiting a decision"));
        }

        let fallback = format!("Failed to {} visitor", decision.as_str());
        match self
            .ctx
            .api
            .decide_visitor(&self.ctx.token, visitor_id, decision)
            .await
        {
            Ok(()) => {
                let done = format!("Visitor {}", decision.outcome().as_str());
                refetch_after_write(self, &done).await
            }
            Err(e) => self.feedback.fail(&e, &fallback),
        }
    }
}

#[async_trait]
impl ResourceView for ResidentVisitorsView {
    fn route(&self) -> Route {
        Route::ResidentVisitors
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_pending_visitors(&self.ctx.token).await {
            Ok(visitors) => {
                self.pending = visitors;
                self.feedback.clear();
                Outcome::Done
            }
            Err(e) => self.feedback.fail(&e, "Failed to fetch visitors"),
        }
    }

    fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }
}
