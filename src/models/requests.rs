use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{BudgetRange, Location, MessageType, TravelPreferences, TravelStyle};

/// Query string of the companion search endpoint.
///
/// Every field is kept as raw text; numbers and dates are parsed in
/// `core::params` so that malformed values degrade to "absent".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanionSearchParams {
    pub destination: Option<String>,
    #[serde(rename = "budgetMin")]
    pub budget_min: Option<String>,
    #[serde(rename = "budgetMax")]
    pub budget_max: Option<String>,
    #[serde(rename = "travelStyle")]
    pub travel_style: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query string of the user directory search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchParams {
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "travelStyle")]
    pub travel_style: Option<String>,
    #[serde(rename = "budgetMin")]
    pub budget_min: Option<String>,
    #[serde(rename = "budgetMax")]
    pub budget_max: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query string of the trip room listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripListParams {
    pub destination: Option<String>,
    #[serde(rename = "budgetMin")]
    pub budget_min: Option<String>,
    #[serde(rename = "budgetMax")]
    pub budget_max: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "travelStyle")]
    pub travel_style: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Body of `PUT /users/me`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_profile_budget"))]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
    pub location: Option<Location>,
    #[serde(rename = "travelPreferences")]
    pub travel_preferences: Option<TravelPreferences>,
}

fn validate_profile_budget(req: &UpdateProfileRequest) -> Result<(), ValidationError> {
    match &req.travel_preferences {
        Some(prefs) => check_budget(&prefs.budget_range),
        None => Ok(()),
    }
}

/// Body of `POST /trips`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_trip_window"))]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub destination: String,
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub description: String,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    pub budget: BudgetRange,
    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "maxParticipants")]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "travelStyle", default)]
    pub travel_style: Vec<TravelStyle>,
    #[serde(rename = "accommodationType")]
    pub accommodation_type: Option<String>,
}

/// Rejects text that is empty once surrounding whitespace is removed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn validate_trip_window(req: &CreateTripRequest) -> Result<(), ValidationError> {
    if req.start_date > req.end_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("startDate must not be after endDate".into());
        return Err(err);
    }
    check_budget(&req.budget)
}

fn check_budget(budget: &BudgetRange) -> Result<(), ValidationError> {
    if budget.min > budget.max {
        let mut err = ValidationError::new("budget_range");
        err.message = Some("budget min must not exceed max".into());
        return Err(err);
    }
    Ok(())
}

/// Optional display data sent when joining a trip
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JoinTripRequest {
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
    #[serde(rename = "userProfilePicture")]
    pub user_profile_picture: Option<String>,
}

/// Body of `POST /chat/{tripRoomId}/send`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    #[serde(rename = "messageType")]
    pub message_type: Option<MessageType>,
}

/// Body of `POST /companions/request`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanionRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "companionId")]
    pub companion_id: String,
    #[validate(length(max = 500))]
    pub message: Option<String>,
    #[serde(rename = "tripDetails")]
    pub trip_details: Option<serde_json::Value>,
}

/// Body of `POST /identity/aadhaar`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AadhaarRequest {
    pub aadhaar: String,
}
