use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod daily_goal;
pub mod settings_form;

pub use daily_goal::{suggested_volume, DailyGoalDraft, DailyGoalField};
pub use settings_form::{plan_submission, SettingsDraft, SettingsField, SubmissionPlan};

/// Gender identity used by the water norm formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Girl,
    Man,
}

impl Gender {
    /// Value used for radio inputs and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Girl => "girl",
            Gender::Man => "man",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "girl" => Some(Gender::Girl),
            "man" => Some(Gender::Man),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user's account data as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, rename = "avatarURL")]
    pub avatar_url: Option<String>,
    /// Daily water norm in millilitres
    #[serde(default)]
    pub daily_water_requirement: Option<u32>,
}

impl UserProfile {
    /// Daily norm in litres, falling back to the default goal
    pub fn daily_norm_litres(&self) -> f64 {
        self.daily_water_requirement
            .map(|ml| f64::from(ml) / 1000.0)
            .unwrap_or(DEFAULT_DAILY_NORM_LITRES)
    }
}

/// Goal pre-filled when the profile has none
pub const DEFAULT_DAILY_NORM_LITRES: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDailyNormRequest {
    /// Millilitres
    pub daily_water_requirement: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDailyNormResponse {
    pub daily_water_requirement: u32,
}

/// Changed subset of the profile; absent fields are left untouched by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_outdated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.gender.is_none()
            && self.password_outdated.is_none()
            && self.password.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAvatarResponse {
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

/// Body the backend sends with non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Per-field validation messages, first failing rule wins
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, &'static str>,
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Records `message` unless the field already failed an earlier rule
    pub fn add(&mut self, field: F, message: &'static str) {
        self.errors.entry(field).or_insert(message);
    }

    pub fn get(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

}

impl<F: Ord + Copy> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub mod messages {
    pub const GOAL_SAVED: &str = "Goal set! Stay hydrated and track your progress!";
    pub const PROFILE_UPDATED: &str = "Your profile data was successfully updated";
    pub const NO_CHANGES: &str = "No changes made. Profile data remains the same.";
    pub const NOT_AN_IMAGE: &str = "Please choose an image file";
}
