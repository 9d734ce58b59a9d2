use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::workflows::booking::{
    Booking, BookingId, Building, BuildingId, Owner, OwnerId, Personnel, PersonnelId,
};
use crate::workflows::inspection::{
    GatewayError, ImageAttachment, InspectionDraft, InspectionGateway, InspectionPayload,
    InspectionResult, InspectionSubmissionService, CREATED,
};

pub(super) fn building() -> Building {
    Building {
        id: BuildingId(9),
        name: "Acme Tower".to_string(),
        address: "1 Main St".to_string(),
        floors: 5,
        units: 20,
        lat: None,
        lng: None,
        building_type: "Commercial".to_string(),
        construction_date: None,
        owner: Owner {
            id: OwnerId(5),
            name: "Dana Cruz".to_string(),
        },
    }
}

pub(super) fn deployed_booking() -> Booking {
    let appointment = NaiveDate::from_ymd_opt(2024, 6, 3)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time");
    let mut booking = Booking::scheduled(BookingId(42), building(), appointment);
    booking
        .dispatch(Personnel {
            id: PersonnelId(21),
            name: "Insp. Reyes".to_string(),
        })
        .expect("scheduled bookings dispatch");
    booking
}

/// IO-1 / Acme / 1 Main St, passing.
pub(super) fn passing_draft() -> InspectionDraft {
    let mut draft = InspectionDraft::for_booking(&deployed_booking());
    draft.reference.inspection_order_no = "IO-1".to_string();
    draft.reference.date_issued = NaiveDate::from_ymd_opt(2024, 6, 1);
    draft.reference.date_inspected = NaiveDate::from_ymd_opt(2024, 6, 3);
    draft.subject.business_name = "Acme".to_string();
    draft.inspection_types.fsic_annual_inspection = true;
    draft.construction_types.reinforced_concrete = true;
    draft
}

pub(super) fn failing_draft(reason: &str) -> InspectionDraft {
    let mut draft = passing_draft();
    draft.result = InspectionResult::Fail;
    draft.failure_reason = reason.to_string();
    draft
}

pub(super) fn with_images(mut draft: InspectionDraft) -> InspectionDraft {
    draft.images = vec![
        ImageAttachment::new("file:///tmp/photos/front.png").with_content_type(&mime::IMAGE_PNG),
        ImageAttachment::new("file:///tmp/photos/"),
    ];
    draft
}

#[derive(Debug)]
pub(super) enum Reply {
    Status(u16),
    Offline,
}

/// Gateway double that records every payload and answers with a fixed reply.
#[derive(Debug)]
pub(super) struct RecordingGateway {
    reply: Reply,
    calls: Mutex<Vec<InspectionPayload>>,
}

impl RecordingGateway {
    pub(super) fn answering(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Status(status),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn created() -> Arc<Self> {
        Self::answering(CREATED)
    }

    pub(super) fn offline() -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Offline,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn calls(&self) -> Vec<InspectionPayload> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl InspectionGateway for RecordingGateway {
    async fn submit_inspection(&self, payload: &InspectionPayload) -> Result<u16, GatewayError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(payload.clone());
        match self.reply {
            Reply::Status(status) => Ok(status),
            Reply::Offline => Err(GatewayError::Transport("connection refused".to_string())),
        }
    }
}

pub(super) fn service(
    gateway: &Arc<RecordingGateway>,
) -> InspectionSubmissionService<RecordingGateway> {
    InspectionSubmissionService::new(gateway.clone())
}
