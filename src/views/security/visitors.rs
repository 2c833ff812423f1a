//! Security gate log
//!
//! One view serves both security routes: the dashboard and the visitor log
//! show the same collection, register new arrivals the same way, and differ
//! only in which route they were mounted at.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::NewVisitor;
use crate::api::SocietyApi;
use crate::domain::{GateStatus, Visitor, VisitorStatus};
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

const MISSING_FIELDS: &str = "Both name and purpose are required.";
const RECENT_ENTRIES: usize = 5;

/// Headline numbers for the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSummary<'a> {
    pub pending: usize,
    /// First five visitors currently inside, in server order.
    pub recent_entries: Vec<&'a Visitor>,
}

pub struct SecurityVisitorsView {
    ctx: ViewContext,
    route: Route,
    visitors: Vec<Visitor>,
    feedback: Feedback,
}

impl SecurityVisitorsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Self::mount_at(api, session, Route::SecurityVisitors)
    }

    pub fn mount_dashboard(
        api: Arc<dyn SocietyApi>,
        session: &SessionStore,
    ) -> Result<Self, Refusal> {
        Self::mount_at(api, session, Route::SecurityDashboard)
    }

    fn mount_at(
        api: Arc<dyn SocietyApi>,
        session: &SessionStore,
        route: Route,
    ) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, route)?,
            route,
            visitors: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    pub fn summary(&self) -> GateSummary<'_> {
        GateSummary {
            pending: self.visitors.iter().filter(|v| v.is_pending()).count(),
            recent_entries: self
                .visitors
                .iter()
                .filter(|v| v.status == VisitorStatus::Entered)
                .take(RECENT_ENTRIES)
                .collect(),
        }
    }

    /// Register someone arriving at the gate. They start out pending.
    pub async fn add(&mut self, name: &str, purpose: &str) -> Outcome {
        let visitor = NewVisitor::new(name, purpose);
        if visitor.name.is_empty() || visitor.purpose.is_empty() {
            return self.feedback.reject(MISSING_FIELDS);
        }

        match self.ctx.api.register_visitor(&self.ctx.token, &visitor).await {
            Ok(()) => refetch_after_write(self, "Visitor added successfully!").await,
            Err(e) => self.feedback.fail(&e, "Failed to add visitor"),
        }
    }

    pub async fn mark(&mut self, visitor_id: &str, status: GateStatus) -> Outcome {
        match self
            .ctx
            .api
            .update_gate_status(&self.ctx.token, visitor_id, status)
            .await
        {
            Ok(()) => {
                let done = format!("Visitor marked {}", status.as_str());
                refetch_after_write(self, &done).await
            }
            Err(e) => self.feedback.fail(&e, "Failed to update visitor"),
        }
    }
}

#[async_trait]
impl ResourceView for SecurityVisitorsView {
    fn route(&self) -> Route {
        self.route
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_gate_visitors(&self.ctx.token).await {
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
