//! Profile settings form: validation rules and the change-detection policy
//! that decides which request, if any, a submission turns into.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{FieldErrors, Gender, UpdateProfileRequest, UserProfile};

pub const NAME_HAS_DIGITS: &str = "Name should not contain numbers";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const OUTDATED_PASSWORD_REQUIRED: &str = "Outdated password is required";
pub const NEW_PASSWORD_REQUIRED: &str = "New password is required";
pub const REPEAT_PASSWORD_REQUIRED: &str = "Repeat password is required";
pub const PASSWORD_TOO_SHORT: &str = "Too short";
pub const PASSWORD_TOO_LONG: &str = "Too long";
pub const PASSWORD_NEEDS_LETTER: &str = "Must contain at least one letter";
pub const PASSWORDS_MUST_MATCH: &str = "Passwords must match";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 48;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁіІїЇєЄ\s'-]*$").expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.%+-]+@[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*\.[A-Za-z]{2,4}$")
        .expect("valid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SettingsField {
    Name,
    Email,
    PasswordOutdated,
    Password,
    PasswordRepeat,
}

/// Raw input of the settings modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsDraft {
    pub gender: Option<Gender>,
    pub name: String,
    pub email: String,
    pub password_outdated: String,
    pub password: String,
    pub password_repeat: String,
}

/// What a submission resolves to once validation has passed
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPlan {
    /// Nothing to send; warn the user
    NoChanges,
    /// The avatar was already uploaded and nothing else changed
    AvatarOnly,
    Update(UpdateProfileRequest),
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Non-blank, trimmed value that differs from what the profile holds
fn changed_text(value: &str, current: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != current).then(|| value.to_string())
}

impl SettingsDraft {
    /// Starts a draft with only the gender pre-selected
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        Self {
            gender: profile.and_then(|p| p.gender),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> FieldErrors<SettingsField> {
        let mut errors = FieldErrors::new();

        if !self.name.is_empty() && !NAME_RE.is_match(&self.name) {
            errors.add(SettingsField::Name, NAME_HAS_DIGITS);
        }

        if !is_blank(&self.email) && !EMAIL_RE.is_match(self.email.trim()) {
            errors.add(SettingsField::Email, INVALID_EMAIL);
        }

        if !is_blank(&self.password) && is_blank(&self.password_outdated) {
            errors.add(SettingsField::PasswordOutdated, OUTDATED_PASSWORD_REQUIRED);
        }

        if !is_blank(&self.password_outdated) && is_blank(&self.password) {
            errors.add(SettingsField::Password, NEW_PASSWORD_REQUIRED);
        }
        if !self.password.is_empty() {
            let len = self.password.chars().count();
            if len < PASSWORD_MIN_LEN {
                errors.add(SettingsField::Password, PASSWORD_TOO_SHORT);
            } else if len > PASSWORD_MAX_LEN {
                errors.add(SettingsField::Password, PASSWORD_TOO_LONG);
            }
            if !self.password.chars().any(|c| c.is_ascii_alphabetic()) {
                errors.add(SettingsField::Password, PASSWORD_NEEDS_LETTER);
            }
        }

        if !is_blank(&self.password) && is_blank(&self.password_repeat) {
            errors.add(SettingsField::PasswordRepeat, REPEAT_PASSWORD_REQUIRED);
        }
        if !self.password_repeat.is_empty() && self.password_repeat != self.password {
            errors.add(SettingsField::PasswordRepeat, PASSWORDS_MUST_MATCH);
        }

        errors
    }

    /// Validates, then diffs against the cached profile
    pub fn plan(
        &self,
        profile: &UserProfile,
        avatar_changed: bool,
    ) -> Result<SubmissionPlan, FieldErrors<SettingsField>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(plan_submission(self, profile, avatar_changed))
    }
}

/// Decides what to send for a draft that already passed validation.
///
/// Only non-empty fields that differ from the profile are included; password
/// fields are never cached so a non-blank one always counts as a change.
pub fn plan_submission(
    draft: &SettingsDraft,
    profile: &UserProfile,
    avatar_changed: bool,
) -> SubmissionPlan {
    let request = UpdateProfileRequest {
        name: changed_text(&draft.name, &profile.name),
        email: changed_text(&draft.email, &profile.email),
        gender: draft.gender.filter(|g| Some(*g) != profile.gender),
        password_outdated: (!is_blank(&draft.password_outdated))
            .then(|| draft.password_outdated.clone()),
        password: (!is_blank(&draft.password)).then(|| draft.password.clone()),
    };

    match (request.is_empty(), avatar_changed) {
        (true, false) => SubmissionPlan::NoChanges,
        (true, true) => SubmissionPlan::AvatarOnly,
        (false, _) => SubmissionPlan::Update(request),
    }
}
