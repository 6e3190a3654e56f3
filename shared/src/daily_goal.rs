//! Daily water norm form: draft state, validation and the suggestion formula.

use crate::{FieldErrors, Gender, UpdateDailyNormRequest, UserProfile};

pub const REQUIRED: &str = "Required";
pub const ONLY_INTEGER: &str = "Only integer number";
pub const MUST_BE_POSITIVE: &str = "Must be positive";
pub const MUST_NOT_BE_NEGATIVE: &str = "Must not be negative";
pub const ENTER_LITRES: &str = "Enter a number of litres";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DailyGoalField {
    Weight,
    ActiveHours,
    WaterVolume,
}

/// Raw input of the daily norm modal, kept as typed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyGoalDraft {
    pub gender: Option<Gender>,
    pub weight: String,
    pub active_hours: String,
    /// Litres per day
    pub water_volume: String,
}

/// Litres per day for a body weight in kg and hours of activity
///
/// Girl: `V = M * 0.03 + T * 0.4`, man: `V = M * 0.04 + T * 0.6`.
pub fn suggested_volume(gender: Gender, weight_kg: u32, active_hours: u32) -> f64 {
    let (per_kg, per_hour) = match gender {
        Gender::Girl => (0.03, 0.4),
        Gender::Man => (0.04, 0.6),
    };
    f64::from(weight_kg) * per_kg + f64::from(active_hours) * per_hour
}

/// Formats litres for display: no trailing zeros, at most two decimals
pub fn format_litres(litres: f64) -> String {
    let rounded = (litres * 100.0).round() / 100.0;
    format!("{}", rounded)
}

fn to_millilitres(litres: f64) -> f64 {
    (litres * 1000.0).round()
}

enum IntegerInput {
    Empty,
    NotInteger,
    Value(i64),
}

fn parse_integer(raw: &str) -> IntegerInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return IntegerInput::Empty;
    }
    match trimmed.parse::<i64>() {
        Ok(value) => IntegerInput::Value(value),
        Err(_) => IntegerInput::NotInteger,
    }
}

impl DailyGoalDraft {
    /// Starts a draft with the target volume taken from the cached profile
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        // Exact litres, so saving an untouched volume sends the stored millilitres back
        let litres = profile
            .map(UserProfile::daily_norm_litres)
            .unwrap_or(crate::DEFAULT_DAILY_NORM_LITRES);
        Self {
            gender: profile.and_then(|p| p.gender),
            water_volume: format!("{}", litres),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> FieldErrors<DailyGoalField> {
        let mut errors = FieldErrors::new();

        match parse_integer(&self.weight) {
            IntegerInput::Empty => errors.add(DailyGoalField::Weight, REQUIRED),
            IntegerInput::NotInteger => errors.add(DailyGoalField::Weight, ONLY_INTEGER),
            IntegerInput::Value(v) if v <= 0 => errors.add(DailyGoalField::Weight, MUST_BE_POSITIVE),
            IntegerInput::Value(_) => {}
        }

        match parse_integer(&self.active_hours) {
            IntegerInput::Empty => {}
            IntegerInput::NotInteger => errors.add(DailyGoalField::ActiveHours, ONLY_INTEGER),
            IntegerInput::Value(v) if v < 0 => {
                errors.add(DailyGoalField::ActiveHours, MUST_NOT_BE_NEGATIVE)
            }
            IntegerInput::Value(_) => {}
        }

        match self.water_volume.trim().parse::<f64>() {
            Ok(litres) if !litres.is_finite() => errors.add(DailyGoalField::WaterVolume, ENTER_LITRES),
            Ok(litres) if to_millilitres(litres) < 1.0 => {
                errors.add(DailyGoalField::WaterVolume, MUST_BE_POSITIVE)
            }
            Ok(_) => {}
            Err(_) => errors.add(DailyGoalField::WaterVolume, ENTER_LITRES),
        }

        errors
    }

    /// Suggested litres once gender and a valid weight are known
    pub fn suggestion(&self) -> Option<f64> {
        let gender = self.gender?;
        let weight = match parse_integer(&self.weight) {
            IntegerInput::Value(v) if v > 0 => u32::try_from(v).ok()?,
            _ => return None,
        };
        let hours = match parse_integer(&self.active_hours) {
            IntegerInput::Empty => 0,
            IntegerInput::Value(v) if v >= 0 => u32::try_from(v).ok()?,
            _ => return None,
        };
        Some(suggested_volume(gender, weight, hours))
    }

    /// Builds the request body, or the validation errors blocking it
    pub fn to_request(&self) -> Result<UpdateDailyNormRequest, FieldErrors<DailyGoalField>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let litres: f64 = self.water_volume.trim().parse().unwrap_or_default();
        let millilitres = to_millilitres(litres).min(f64::from(u32::MAX));
        Ok(UpdateDailyNormRequest {
            daily_water_requirement: millilitres as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> DailyGoalDraft {
        DailyGoalDraft {
            gender: Some(Gender::Girl),
            weight: "60".to_string(),
            active_hours: "2".to_string(),
            water_volume: "2.1".to_string(),
        }
    }

    #[test]
    fn test_suggested_volume_per_gender() {
        assert!((suggested_volume(Gender::Girl, 60, 2) - 2.6).abs() < 1e-9);
        assert!((suggested_volume(Gender::Man, 80, 1) - 3.8).abs() < 1e-9);
        assert_eq!(suggested_volume(Gender::Man, 0, 0), 0.0);
    }

    #[test]
    fn test_from_profile_prefills_volume() {
        let profile = UserProfile {
            daily_water_requirement: Some(1800),
            gender: Some(Gender::Man),
            ..Default::default()
        };
        let draft = DailyGoalDraft::from_profile(Some(&profile));
        assert_eq!(draft.water_volume, "1.8");
        assert_eq!(draft.gender, Some(Gender::Man));
        assert!(draft.weight.is_empty());

        let draft = DailyGoalDraft::from_profile(None);
        assert_eq!(draft.water_volume, "2");
    }

    #[test]
    fn test_untouched_prefill_sends_stored_goal() {
        let profile = UserProfile {
            daily_water_requirement: Some(1755),
            gender: Some(Gender::Girl),
            ..Default::default()
        };
        let draft = DailyGoalDraft {
            weight: "60".to_string(),
            ..DailyGoalDraft::from_profile(Some(&profile))
        };
        assert_eq!(draft.water_volume, "1.755");
        assert_eq!(draft.to_request().unwrap().daily_water_requirement, 1755);
    }

    #[test]
    fn test_weight_is_required() {
        let draft = DailyGoalDraft {
            weight: "  ".to_string(),
            ..valid_draft()
        };
        assert_eq!(draft.validate().get(DailyGoalField::Weight), Some(REQUIRED));
    }

    #[test]
    fn test_weight_must_be_positive_integer() {
        let fractional = DailyGoalDraft {
            weight: "60.5".to_string(),
            ..valid_draft()
        };
        assert_eq!(fractional.validate().get(DailyGoalField::Weight), Some(ONLY_INTEGER));

        let zero = DailyGoalDraft {
            weight: "0".to_string(),
            ..valid_draft()
        };
        assert_eq!(zero.validate().get(DailyGoalField::Weight), Some(MUST_BE_POSITIVE));
    }

    #[test]
    fn test_active_hours_optional_but_integer() {
        let empty = DailyGoalDraft {
            active_hours: String::new(),
            ..valid_draft()
        };
        assert!(empty.validate().is_empty());

        let fractional = DailyGoalDraft {
            active_hours: "1.5".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            fractional.validate().get(DailyGoalField::ActiveHours),
            Some(ONLY_INTEGER)
        );

        let negative = DailyGoalDraft {
            active_hours: "-1".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            negative.validate().get(DailyGoalField::ActiveHours),
            Some(MUST_NOT_BE_NEGATIVE)
        );
    }

    #[test]
    fn test_water_volume_must_be_number() {
        let text = DailyGoalDraft {
            water_volume: "lots".to_string(),
            ..valid_draft()
        };
        assert_eq!(text.validate().get(DailyGoalField::WaterVolume), Some(ENTER_LITRES));

        let zero = DailyGoalDraft {
            water_volume: "0".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            zero.validate().get(DailyGoalField::WaterVolume),
            Some(MUST_BE_POSITIVE)
        );
    }

    #[test]
    fn test_volume_below_one_millilitre_is_rejected() {
        let tiny = DailyGoalDraft {
            water_volume: "0.0004".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            tiny.validate().get(DailyGoalField::WaterVolume),
            Some(MUST_BE_POSITIVE)
        );
        assert!(tiny.to_request().is_err());

        let one_ml = DailyGoalDraft {
            water_volume: "0.001".to_string(),
            ..valid_draft()
        };
        assert_eq!(one_ml.to_request().unwrap().daily_water_requirement, 1);
    }

    #[test]
    fn test_suggestion_needs_gender_and_weight() {
        assert!(valid_draft().suggestion().is_some());

        let no_gender = DailyGoalDraft {
            gender: None,
            ..valid_draft()
        };
        assert_eq!(no_gender.suggestion(), None);

        let no_hours = DailyGoalDraft {
            active_hours: String::new(),
            ..valid_draft()
        };
        let litres = no_hours.suggestion().unwrap();
        assert!((litres - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_suggestion_is_not_checked_against_target() {
        let draft = DailyGoalDraft {
            water_volume: "5".to_string(),
            ..valid_draft()
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_to_request_converts_to_millilitres() {
        let request = valid_draft().to_request().unwrap();
        assert_eq!(request.daily_water_requirement, 2100);
    }

    #[test]
    fn test_to_request_blocked_by_errors() {
        let draft = DailyGoalDraft {
            weight: String::new(),
            ..valid_draft()
        };
        let errors = draft.to_request().unwrap_err();
        assert_eq!(errors.get(DailyGoalField::Weight), Some(REQUIRED));
    }

    #[test]
    fn test_format_litres() {
        assert_eq!(format_litres(2.0), "2");
        assert_eq!(format_litres(0.1 + 0.2), "0.3");
        assert_eq!(format_litres(1.234), "1.23");
    }
}
