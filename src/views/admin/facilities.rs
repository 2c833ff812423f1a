//! Facility management

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::api::dto::FacilityPayload;
use crate::api::SocietyApi;
use crate::domain::Facility;
use crate::routing::{Refusal, Route};
use crate::session::SessionStore;
use crate::views::{refetch_after_write, Feedback, Outcome, ResourceView, ViewContext};

const INCOMPLETE_FORM: &str = "Please provide a name and at least one valid slot";

/// Form contents while a facility is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityDraft {
    pub id: String,
    pub name: String,
    /// Comma-separated, as typed.
    pub slots: String,
}

pub struct FacilitiesView {
    ctx: ViewContext,
    facilities: Vec<Facility>,
    editing: Option<FacilityDraft>,
    feedback: Feedback,
}

impl FacilitiesView {
    pub fn mount(api: Arc<dyn SocietyApi>, session: &SessionStore) -> Result<Self, Refusal> {
        Ok(Self {
            ctx: ViewContext::admit(api, session, Route::AdminFacilities)?,
            facilities: Vec::new(),
            editing: None,
            feedback: Feedback::default(),
        })
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn editing(&self) -> Option<&FacilityDraft> {
        self.editing.as_ref()
    }

    /// Load a facility into the edit form. `None` if it is not listed.
    pub fn begin_edit(&mut self, id: &str) -> Option<&FacilityDraft> {
        let facility = self.facilities.iter().find(|f| f.id == id)?;
        let draft = FacilityDraft {
            id: facility.id.clone(),
            name: facility.name.clone(),
            slots: facility.slots_label(),
        };
        Some(self.editing.insert(draft))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    fn payload(&mut self, name: &str, slots: &str) -> Result<FacilityPayload, Outcome> {
        let payload = FacilityPayload::from_form(name, slots);
        payload
            .validate()
            .map(|()| payload)
            .map_err(|_| self.feedback.reject(INCOMPLETE_FORM))
    }

    pub async fn add(&mut self, name: &str, slots: &str) -> Outcome {
        let payload = match self.payload(name, slots) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        match self.ctx.api.create_facility(&self.ctx.token, &payload).await {
            Ok(()) => refetch_after_write(self, "Facility added successfully").await,
            Err(e) => self.feedback.fail(&e, "Failed to add facility"),
        }
    }

    /// Replace name and slots of `id`. Clears the edit form on success.
    pub async fn update(&mut self, id: &str, name: &str, slots: &str) -> Outcome {
        let payload = match self.payload(name, slots) {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        match self.ctx.api.update_facility(&self.ctx.token, id, &payload).await {
            Ok(()) => {
                self.editing = None;
                refetch_after_write(self, "Facility updated successfully").await
            }
            Err(e) => self.feedback.fail(&e, "Failed to update facility"),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Outcome {
        match self.ctx.api.delete_facility(&self.ctx.token, id).await {
            Ok(()) => {
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                refetch_after_write(self, "Facility deleted successfully").await
            }
            Err(e) => self.feedback.fail(&e, "Failed to delete facility"),
        }
    }
}

#[async_trait]
impl ResourceView for FacilitiesView {
    fn route(&self) -> Route {
        Route::AdminFacilities
    }

    async fn refresh(&mut self) -> Outcome {
        match self.ctx.api.list_facilities(&self.ctx.token).await {
            Ok(facilities) => {
                self.facilities = facilities;
                self.feedback.clear();
                Outcome::Done
            }
            Err(e) => self.feedback.fail(&e, "Failed to fetch facilities"),
        }
    }

    fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }
}
