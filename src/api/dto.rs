//! Request and response bodies for the society API

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::{ComplaintCategory, Role};
use crate::shared::validations::split_list;

/// Form body for `POST /login`. The backend calls the email `username`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewComplaint {
    #[validate(custom(function = "known_category"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

impl NewComplaint {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title
                .parse::<ComplaintCategory>()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|_| title.trim().to_string()),
            description: description.trim().to_string(),
        }
    }
}

fn known_category(title: &str) -> Result<(), ValidationError> {
    title
        .parse::<ComplaintCategory>()
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("category");
            err.message = Some("must be one of Maintenance, Noise, Parking, Other".into());
            err
        })
}

/// Body for creating and replacing a facility.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct FacilityPayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "at least one slot is required"))]
    pub available_slots: Vec<String>,
}

impl FacilityPayload {
    /// Build from the form fields; `slots` is comma-separated.
    pub fn from_form(name: &str, slots: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            available_slots: split_list(slots),
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewBooking {
    #[validate(length(min = 1))]
    pub facility_id: String,
    #[validate(length(min = 1))]
    pub slot: String,
}

impl NewBooking {
    pub fn new(facility_id: &str, slot: &str) -> Self {
        Self {
            facility_id: facility_id.trim().to_string(),
            slot: slot.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewVisitor {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub purpose: String,
}

impl NewVisitor {
    pub fn new(name: &str, purpose: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            purpose: purpose.trim().to_string(),
        }
    }
}

/// Body for `POST /register`. Only admins may call it.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        custom(function = "letters_and_digits")
    )]
    pub password: String,
    pub role: Role,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

fn letters_and_digits(password: &str) -> Result<(), ValidationError> {
    let letters = password.chars().any(|c| c.is_alphabetic());
    let digits = password.chars().any(|c| c.is_ascii_digit());
    if letters && digits {
        Ok(())
    } else {
        let mut err = ValidationError::new("composition");
        err.message = Some("password must contain both letters and numbers".into());
        Err(err)
    }
}
