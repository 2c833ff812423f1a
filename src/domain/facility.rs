//! Shared facilities and their bookable slots

use serde::{Deserialize, Serialize};

/// A bookable amenity. Slots are opaque labels in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub available_slots: Vec<String>,
}

impl Facility {
    /// Slots as the comma-separated text used by the facility form.
    pub fn slots_label(&self) -> String {
        self.available_slots.join(", ")
    }
}
