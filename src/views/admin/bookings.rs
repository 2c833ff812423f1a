//! Every booking; admins can cancel

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::SocietyApi;
use crate::domain::Booking;
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

pub struct AdminBookingsView {
    ctx: ViewContext,
    bookings: Vec<Booking>,
    feedback: Feedback,
}

impl AdminBookingsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::AdminBookings)?,
            bookings: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Cancelling hands the slot back to the facility server-side.
    pub async fn cancel(&mut self, booking_id: &str) -> Outcome {
        match self.ctx.api.cancel_booking(&self.ctx.token, booking_id).await {
            Ok(()) => refetch_after_write(self, "Booking canceled successfully").await,
            Err(e) => self.feedback.fail(&e, "Failed to cancel booking"),
        }
    }
}

#[async_trait]
impl ResourceView for AdminBookingsView {
    fn route(&self) -> Route {
        Route::AdminBookings
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_all_bookings(&self.ctx.token).await {
            Ok(bookings) => {
                self.bookings = bookings;
                self.feedback.clear();
                Outcome::Done
            }
            Err(e) => self.feedback.fail(&e, "Failed to fetch bookings"),
        }
    }

    fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }
}
