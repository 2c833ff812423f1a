//! Admin panel summary

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::SocietyApi;
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::shared::ClientError;
use crate::views::{Feedback, Outcome, ResourceView, ViewContext};

const STATS_UNAVAILABLE: &str = "Could not load statistics";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocietyStats {
    pub complaints: usize,
    pub bookings: usize,
    pub pending_visitors: usize,
}

pub struct AdminDashboard {
    ctx: ViewContext,
    stats: SocietyStats,
    feedback: Feedback,
}

impl AdminDashboard {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::AdminDashboard)?,
            stats: SocietyStats::default(),
            feedback: Feedback::default(),
        })
    }

    pub fn stats(&self) -> SocietyStats {
        self.stats
    }

    async fn fetch(&self) -> Result<SocietyStats, ClientError> {
        let api = &self.ctx.api;
        let token = &self.ctx.token;
        let (complaints, bookings, visitors) = tokio::try_join!(
            api.list_all_complaints(token),
            api.list_all_bookings(token),
            api.list_all_visitors(token),
        )?;
        Ok(SocietyStats {
            complaints: complaints.len(),
            bookings: bookings.len(),
            pending_visitors: visitors.iter().filter(|v| v.is_pending()).count(),
        })
    }
}

#[async_trait]
impl ResourceView for AdminDashboard {
    fn route(&self) -> Route {
        Route::AdminDashboard
    }

    /// Any failed fetch zeroes every count.
    async fn refresh(&mut self) -> Outcome {
        match self.fetch().await {
            Ok(stats) => {
                self.stats = stats;
                self.feedback.clear();
                Outcome::Done
            }
            Err(e) => {
                self.stats = SocietyStats::default();
                self.feedback.fail(&e, STATS_UNAVAILABLE)
            }
        }
    }

    fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }
}
