//! Resident bookings: pick a facility slot, list own bookings

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::NewBooking;
use crate::api::SocietyApi;
use crate::domain::{Booking, Facility};
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

const MISSING_SELECTION: &str = "Please select a facility and a slot";

pub struct ResidentBookingsView {
    ctx: ViewContext,
    facilities: Vec<Facility>,
    bookings: Vec<Booking>,
    feedback: Feedback,
}

impl ResidentBookingsView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::ResidentBookings)?,
            facilities: Vec::new(),
            bookings: Vec::new(),
            feedback: Feedback::default(),
        })
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Slot choices for the selected facility.
    pub fn slots_for(&self, facility_id: &str) -> &[String] {
        self.facilities
            .iter()
            .find(|f| f.id == facility_id)
            .map(|f| f.available_slots.as_slice())
            .unwrap_or_default()
    }

    /// Book `slot` at `facility_id`. Whether the slot is still offered is the
    /// server's call.
    pub async fn book(&mut self, facility_id: &str, slot: &str) -> Outcome {
        let booking = NewBooking::new(facility_id, slot);
        if booking.facility_id.is_empty() || booking.slot.is_empty() {
            return self.feedback.reject(MISSING_SELECTION);
        }

        match self.ctx.api.create_booking(&self.ctx.token, &booking).await {
            Ok(()) => refetch_after_write(self, "Booking created successfully").await,
            Err(e) => self.feedback.fail(&e, "Failed to create booking"),
        }
    }
}

#[async_trait]
impl ResourceView for ResidentBookingsView {
    fn route(&self) -> Route {
        Route::ResidentBookings
    }

    async fn refresh(&mut self) -> Outcome {
        let token = &self.ctx.token;
        let (facilities, bookings) = tokio::join!(
            self.ctx.api.list_facilities(token),
            self.ctx.api.list_bookings(token),
        );

        let facilities = match facilities {
            Ok(facilities) => facilities,
            Err(e) => return self.feedback.fail(&e, "Failed to fetch facilities"),
        };
        self.facilities = facilities;

        match bookings {
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
