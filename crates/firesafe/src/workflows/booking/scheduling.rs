use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

use super::domain::BuildingId;

pub const APPOINTMENT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of visit requested when scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    #[default]
    Survey,
    Inspection,
}

impl BookingKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Survey => "survey",
            Self::Inspection => "inspection",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "survey" => Some(Self::Survey),
            "inspection" => Some(Self::Inspection),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulingError {
    #[error("Please select a building and enter a date and time for the survey.")]
    Incomplete,
}

/// Selections made on the schedule screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    pub building_id: Option<BuildingId>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub kind: BookingKind,
}

impl ScheduleForm {
    pub fn request(&self) -> Result<BookingRequest, SchedulingError> {
        match (self.building_id, self.date, self.time) {
            (Some(building_id), Some(date), Some(time)) => Ok(BookingRequest {
                building_id,
                kind: self.kind,
                appointment: date.and_time(time),
            }),
            _ => Err(SchedulingError::Incomplete),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "buildings_id")]
    pub building_id: BuildingId,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    #[serde(rename = "appointment_date", serialize_with = "serialize_appointment")]
    pub appointment: NaiveDateTime,
}

fn serialize_appointment<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(APPOINTMENT_FORMAT))
}
