use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::workflows::inspection::InspectionRecord;

/// Identifier of a registered building owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub u64);

/// Identifier of an inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonnelId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
}

/// Inspector dispatched against a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: PersonnelId,
    pub name: String,
}

/// A registered building, read-mostly after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    pub floors: u32,
    pub units: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub building_type: String,
    pub construction_date: Option<NaiveDate>,
    pub owner: Owner,
}

impl Building {
    /// Map link for the building location, when both coordinates are known.
    pub fn map_url(&self) -> Option<String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(format!("https://www.google.com/maps?q={lat},{lng}")),
            _ => None,
        }
    }

    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner.id == owner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Deployed,
    Completed,
}

impl BookingStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Scheduled, Self::Deployed, Self::Completed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Deployed => "deployed",
            Self::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Some(Self::Scheduled),
            "deployed" => Some(Self::Deployed),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// The single status this one may advance to.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Scheduled => Some(Self::Deployed),
            Self::Deployed => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled inspection event tied to one building.
///
/// `status` and `inspection` only change through the lifecycle methods in
/// [`super::lifecycle`], which keep the two consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub building: Building,
    pub personnel: Option<Personnel>,
    pub appointment_date: NaiveDateTime,
    pub(super) status: BookingStatus,
    pub(super) inspection: Option<InspectionRecord>,
}

impl Booking {
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn inspection(&self) -> Option<&InspectionRecord> {
        self.inspection.as_ref()
    }

    pub fn owner_id(&self) -> OwnerId {
        self.building.owner.id
    }

    pub fn personnel_label(&self) -> &str {
        self.personnel
            .as_ref()
            .map(|personnel| personnel.name.as_str())
            .unwrap_or("Not assigned")
    }
}
