//! Facility bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// A resident's claim on one slot of one facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub facility_id: String,
    #[serde(default)]
    pub facility_name: Option<String>,
    pub slot: String,
    #[serde(default)]
    pub resident_id: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub booked_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn facility_label(&self) -> &str {
        self.facility_name.as_deref().unwrap_or(&self.facility_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn decodes_backend_booking() {
        let b: Booking = serde_json::from_value(serde_json::json!({
            "_id": "b1",
            "facility_id": "f1",
            "facility_name": "Clubhouse",
            "slot": "18:00-19:00",
            "resident_id": "r1",
            "booked_at": "2024-06-01"
        }))
        .unwrap();
        assert_eq!(b.facility_label(), "Clubhouse");
        assert_eq!(b.booked_at.unwrap().day(), 1);
    }
}
