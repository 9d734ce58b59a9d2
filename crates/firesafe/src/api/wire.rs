//! Shapes returned by the remote REST API and their conversion into domain types.
//!
//! The backend serializes decimals as strings, booleans as `0`/`1`, and dates
//! either as `YYYY-MM-DD` or as full timestamps. Decoding accepts all of those.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::workflows::booking::{
    Booking, BookingId, BookingStatus, Building, BuildingId, LifecycleError, Owner, OwnerId,
    Personnel, PersonnelId,
};
use crate::workflows::inspection::{
    ConstructionTypeFlags, InspectionOutcome, InspectionRecord, InspectionReference,
    InspectionResult, InspectionSubject, InspectionTypeFlags,
};

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("building {building} has no owner")]
    MissingOwner { building: u64 },
    #[error("booking {booking} has unknown status '{status}'")]
    UnknownStatus { booking: u64, status: String },
    #[error("booking {booking} has unreadable appointment date '{value}'")]
    AppointmentDate { booking: u64, value: String },
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Listing envelopes: `{ data: [...] }`, `{ buildings: [...] }`, `{ bookings: [...] }`
/// or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Data { data: Vec<T> },
    Buildings { buildings: Vec<T> },
    Bookings { bookings: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Listing::Data { data } => data,
            Listing::Buildings { buildings } => buildings,
            Listing::Bookings { bookings } => bookings,
            Listing::Bare(items) => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireOwner {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBuilding {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub floors: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub units: u32,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub construction_date: Option<NaiveDate>,
    #[serde(default)]
    pub owner: Option<WireOwner>,
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl TryFrom<WireBuilding> for Building {
    type Error = WireError;

    fn try_from(wire: WireBuilding) -> Result<Self, Self::Error> {
        let owner = match (wire.owner, wire.user_id) {
            (Some(owner), _) => Owner {
                id: OwnerId(owner.id),
                name: owner.name,
            },
            (None, Some(user_id)) => Owner {
                id: OwnerId(user_id),
                name: String::new(),
            },
            (None, None) => return Err(WireError::MissingOwner { building: wire.id }),
        };

        Ok(Building {
            id: BuildingId(wire.id),
            name: wire.name,
            address: wire.address,
            floors: wire.floors,
            units: wire.units,
            lat: wire.lat,
            lng: wire.lng,
            building_type: wire.building_type.unwrap_or_default(),
            construction_date: wire.construction_date,
            owner,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePersonnel {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireImage {
    pub image: String,
}

/// Stored inspection as embedded under `buildingInfo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireInspection {
    #[serde(deserialize_with = "lenient_text")]
    pub inspection_order_no: String,
    #[serde(deserialize_with = "lenient_date")]
    pub date_issued: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub date_inspected: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_text")]
    pub building_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub business_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub nature_of_business: String,
    #[serde(deserialize_with = "lenient_text")]
    pub owner_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fsec_no: String,
    #[serde(deserialize_with = "lenient_text")]
    pub building_permit: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fsic_no: String,
    #[serde(deserialize_with = "lenient_text")]
    pub business_permit_no: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fire_insurance_no: String,
    #[serde(deserialize_with = "lenient_text")]
    pub contact_no: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub inspection_during_construction: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub fsic_occupancy: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub fsic_new_permit: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub fsic_renew_permit: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub fsic_annual_inspection: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub verification_inspection: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub ntc: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub ntcv: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub abatement: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub closure: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub disapproval: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub others: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub mercantile: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub business: bool,
    #[serde(alias = "reinforcedconcrete", deserialize_with = "lenient_flag")]
    pub reinforced_concrete: bool,
    #[serde(alias = "timberframedwalls", deserialize_with = "lenient_flag")]
    pub timber_framed_walls: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub steel: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub mixed: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub remarks: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reasons: String,
    #[serde(deserialize_with = "lenient_list")]
    pub images: Vec<WireImage>,
}

impl From<WireInspection> for InspectionRecord {
    fn from(wire: WireInspection) -> Self {
        let outcome = match InspectionResult::parse(&wire.remarks) {
            Some(InspectionResult::Fail) => InspectionOutcome::Fail {
                reason: wire.reasons,
            },
            _ => InspectionOutcome::Pass,
        };

        InspectionRecord {
            reference: InspectionReference {
                inspection_order_no: wire.inspection_order_no,
                date_issued: wire.date_issued,
                date_inspected: wire.date_inspected,
            },
            subject: InspectionSubject {
                building_name: wire.building_name,
                business_name: wire.business_name,
                nature_of_business: wire.nature_of_business,
                owner_name: wire.owner_name,
                address: wire.address,
                fsec_no: wire.fsec_no,
                building_permit: wire.building_permit,
                fsic_no: wire.fsic_no,
                business_permit_no: wire.business_permit_no,
                fire_insurance_no: wire.fire_insurance_no,
                contact_no: wire.contact_no,
            },
            inspection_types: InspectionTypeFlags {
                inspection_during_construction: wire.inspection_during_construction,
                fsic_occupancy: wire.fsic_occupancy,
                fsic_new_permit: wire.fsic_new_permit,
                fsic_renew_permit: wire.fsic_renew_permit,
                fsic_annual_inspection: wire.fsic_annual_inspection,
                verification_inspection: wire.verification_inspection,
                ntc: wire.ntc,
                ntcv: wire.ntcv,
                abatement: wire.abatement,
                closure: wire.closure,
                disapproval: wire.disapproval,
            },
            construction_types: ConstructionTypeFlags {
                mercantile: wire.mercantile,
                business: wire.business,
                reinforced_concrete: wire.reinforced_concrete,
                timber_framed_walls: wire.timber_framed_walls,
                steel: wire.steel,
                mixed: wire.mixed,
            },
            others: wire.others,
            outcome,
            images: wire.images.into_iter().map(|image| image.image).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBooking {
    pub id: u64,
    pub building: WireBuilding,
    #[serde(default)]
    pub personnel: Option<WirePersonnel>,
    pub appointment_date: String,
    pub status: String,
    #[serde(default, rename = "buildingInfo", alias = "inspection")]
    pub building_info: Option<WireInspection>,
}

impl TryFrom<WireBooking> for Booking {
    type Error = WireError;

    fn try_from(wire: WireBooking) -> Result<Self, Self::Error> {
        let status =
            BookingStatus::parse(&wire.status).ok_or_else(|| WireError::UnknownStatus {
                booking: wire.id,
                status: wire.status.clone(),
            })?;
        let appointment_date = parse_appointment(&wire.appointment_date).ok_or_else(|| {
            WireError::AppointmentDate {
                booking: wire.id,
                value: wire.appointment_date.clone(),
            }
        })?;
        let building = Building::try_from(wire.building)?;
        let personnel = wire.personnel.map(|personnel| Personnel {
            id: PersonnelId(personnel.id),
            name: personnel.name,
        });

        let booking = Booking::restore(
            BookingId(wire.id),
            building,
            personnel,
            appointment_date,
            status,
            wire.building_info.map(InspectionRecord::from),
        )?;
        Ok(booking)
    }
}

fn parse_appointment(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|value| value.naive_utc())
        })
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_day))
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite()))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|count| u32::try_from(count).ok())
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(number)) => number.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        _ => false,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
