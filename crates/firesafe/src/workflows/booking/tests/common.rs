use chrono::{NaiveDate, NaiveDateTime};

use crate::session::{Role, SessionContext, UserProfile};
use crate::workflows::booking::{
    Booking, BookingId, BookingStatus, Building, BuildingId, Owner, OwnerId, Personnel,
    PersonnelId,
};
use crate::workflows::inspection::{
    InspectionOutcome, InspectionRecord, InspectionReference, InspectionSubject,
};

pub(super) fn appointment() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time")
}

pub(super) fn building(id: u64, owner: u64) -> Building {
    Building {
        id: BuildingId(id),
        name: format!("Building {id}"),
        address: format!("{id} Main St"),
        floors: 3,
        units: 6,
        lat: Some(14.5995),
        lng: Some(120.9842),
        building_type: "Commercial".to_string(),
        construction_date: None,
        owner: Owner {
            id: OwnerId(owner),
            name: format!("Owner {owner}"),
        },
    }
}

pub(super) fn inspector() -> Personnel {
    Personnel {
        id: PersonnelId(21),
        name: "Insp. Reyes".to_string(),
    }
}

pub(super) fn passing_record() -> InspectionRecord {
    InspectionRecord {
        reference: InspectionReference {
            inspection_order_no: "IO-1".to_string(),
            ..InspectionReference::default()
        },
        subject: InspectionSubject {
            business_name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            ..InspectionSubject::default()
        },
        inspection_types: Default::default(),
        construction_types: Default::default(),
        others: String::new(),
        outcome: InspectionOutcome::Pass,
        images: Vec::new(),
    }
}

pub(super) fn scheduled(id: u64, owner: u64) -> Booking {
    Booking::scheduled(BookingId(id), building(id, owner), appointment())
}

pub(super) fn deployed(id: u64, owner: u64) -> Booking {
    let mut booking = scheduled(id, owner);
    booking.dispatch(inspector()).expect("scheduled bookings dispatch");
    booking
}

pub(super) fn completed(id: u64, owner: u64) -> Booking {
    Booking::restore(
        BookingId(id),
        building(id, owner),
        Some(inspector()),
        appointment(),
        BookingStatus::Completed,
        Some(passing_record()),
    )
    .expect("completed booking with record is consistent")
}

pub(super) fn owner_session(id: u64) -> SessionContext {
    SessionContext::new(
        Some("owner-token".to_string()),
        Some(UserProfile {
            id,
            name: format!("Owner {id}"),
        }),
        Role::BuildingOwner,
    )
}

pub(super) fn personnel_session() -> SessionContext {
    SessionContext::new(
        Some("personnel-token".to_string()),
        Some(UserProfile {
            id: 21,
            name: "Insp. Reyes".to_string(),
        }),
        Role::Personnel,
    )
}

pub(super) fn ids(bookings: &[&Booking]) -> Vec<u64> {
    bookings.iter().map(|booking| booking.id.0).collect()
}
