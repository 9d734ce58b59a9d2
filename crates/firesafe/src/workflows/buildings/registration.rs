use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text inputs of the building registration screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingForm {
    pub name: String,
    pub address: String,
    pub building_type: String,
    pub floors: String,
    pub units: String,
    pub construction_date: Option<NaiveDate>,
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,
    #[error("{field} must be a decimal number (found '{found}')")]
    InvalidCoordinate { field: &'static str, found: String },
    #[error("{field} must be a whole number (found '{found}')")]
    InvalidCount { field: &'static str, found: String },
    #[error("{0}")]
    Rejected(String),
}

const DEFAULT_REJECTION: &str = "There was a problem registering the building.";

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, RegistrationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RegistrationError::InvalidCoordinate {
            field,
            found: raw.to_string(),
        })
}

fn parse_count(field: &'static str, raw: &str) -> Result<Option<u32>, RegistrationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| RegistrationError::InvalidCount {
            field,
            found: raw.to_string(),
        })
}

impl BuildingForm {
    pub fn registration(&self) -> Result<BuildingRegistration, RegistrationError> {
        let required = [
            &self.name,
            &self.address,
            &self.building_type,
            &self.lat,
            &self.lng,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(RegistrationError::MissingRequiredFields);
        }

        Ok(BuildingRegistration {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            building_type: self.building_type.trim().to_string(),
            floors: parse_count("floors", &self.floors)?,
            units: parse_count("units", &self.units)?,
            construction_date: self.construction_date,
            lat: parse_coordinate("lat", &self.lat)?,
            lng: parse_coordinate("lng", &self.lng)?,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Body of `POST /buildings/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingRegistration {
    pub name: String,
    pub address: String,
    pub building_type: String,
    pub floors: Option<u32>,
    pub units: Option<u32>,
    #[serde(serialize_with = "serialize_optional_date")]
    pub construction_date: Option<NaiveDate>,
    pub lat: f64,
    pub lng: f64,
}

fn serialize_optional_date<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        None => serializer.serialize_none(),
    }
}

/// Response of `POST /buildings/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RegistrationReply {
    pub fn into_result(self) -> Result<(), RegistrationError> {
        if self.success {
            return Ok(());
        }
        let message = self
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
        Err(RegistrationError::Rejected(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled_form() -> BuildingForm {
        BuildingForm {
            name: "Harbor View".to_string(),
            address: "12 Pier Rd".to_string(),
            building_type: "Commercial".to_string(),
            floors: "4".to_string(),
            units: "".to_string(),
            construction_date: NaiveDate::from_ymd_opt(2010, 3, 1),
            lat: "14.5995".to_string(),
            lng: " 120.9842 ".to_string(),
        }
    }

    #[test]
    fn registration_requires_core_fields() {
        let mut form = filled_form();
        form.lng.clear();
        assert_eq!(
            form.registration(),
            Err(RegistrationError::MissingRequiredFields)
        );
    }

    #[test]
    fn registration_parses_counts_and_coordinates() {
        let registration = filled_form().registration().expect("form is complete");
        assert_eq!(registration.floors, Some(4));
        assert_eq!(registration.units, None);
        assert!((registration.lng - 120.9842).abs() < f64::EPSILON);

        let body = serde_json::to_value(&registration).expect("serializes");
        assert_eq!(body["construction_date"], json!("2010-03-01"));
        assert_eq!(body["units"], json!(null));
        assert_eq!(body["building_type"], json!("Commercial"));
    }

    #[test]
    fn registration_rejects_non_numeric_coordinates() {
        let mut form = filled_form();
        form.lat = "north".to_string();
        assert!(matches!(
            form.registration(),
            Err(RegistrationError::InvalidCoordinate { field: "lat", .. })
        ));
    }

    #[test]
    fn unsuccessful_reply_falls_back_to_default_message() {
        let reply: RegistrationReply = serde_json::from_value(json!({ "success": false }))
            .expect("reply decodes");
        assert_eq!(
            reply.into_result(),
            Err(RegistrationError::Rejected(DEFAULT_REJECTION.to_string()))
        );

        let reply: RegistrationReply =
            serde_json::from_value(json!({ "success": false, "message": "Duplicate address" }))
                .expect("reply decodes");
        assert_eq!(
            reply.into_result(),
            Err(RegistrationError::Rejected("Duplicate address".to_string()))
        );
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = filled_form();
        form.reset();
        assert_eq!(form, BuildingForm::default());
        assert!(matches!(
            form.registration(),
            Err(RegistrationError::MissingRequiredFields)
        ));
    }
}
