//! All visitors, with admin override on pending ones

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::SocietyApi;
use crate::domain::{Decision, Visitor};
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

pub struct AdminVisitorsView {
    ctx: ViewContext,
    visitors: Vec<Visitor>,
    feedback: Feedback,
}

impl AdminVisitorsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::AdminVisitors)?,
            visitors: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    pub fn pending(&self) -> impl Iterator<Item = &Visitor> {
        self.visitors.iter().filter(|v| v.is_pending())
    }

    pub async fn decide(&mut self, visitor_id: &str, decision: Decision) -> Outcome {
        match self.visitors.iter().find(|v| v.id == visitor_id) {
            Some(v) if v.is_pending() => {}
            Some(v) => {
                let status = v.status;
                return self.feedback.reject(format!("Visitor is already {status}"));
            }
            None => return self.feedback.reject(format!("Visitor {visitor_id} not found")),
        }

        let fallback = format!("Failed to {} visitor", decision.as_str());
        match self
            .ctx
            .api
            .admin_decide_visitor(&self.ctx.token, visitor_id, decision)
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
impl ResourceView for AdminVisitorsView {
    fn route(&self) -> Route {
        Route::AdminVisitors
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_all_visitors(&self.ctx.token).await {
            Ok(visitors) => {
                self.visitors = visitors;
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
