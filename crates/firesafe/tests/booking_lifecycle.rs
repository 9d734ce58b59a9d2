use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use firesafe::api::wire::WireBooking;
use firesafe::reports;
use firesafe::session::{Role, SessionContext, UserProfile};
use firesafe::workflows::booking::{Booking, BookingStatus, BookingView, OwnerId};
use firesafe::workflows::inspection::{
    GatewayError, InspectionDraft, InspectionGateway, InspectionPayload, InspectionResult,
    InspectionSubmissionService, CREATED,
};
use serde_json::json;

fn decode(value: serde_json::Value) -> Booking {
    let wire: WireBooking = serde_json::from_value(value).expect("wire booking decodes");
    Booking::try_from(wire).expect("wire booking is consistent")
}

fn remote_bookings() -> Vec<Booking> {
    vec![
        decode(json!({
            "id": 1,
            "building": {
                "id": 10, "name": "Acme Tower", "address": "1 Main St",
                "floors": "5", "units": 20, "lat": "14.5995", "lng": 120.9842,
                "owner": { "id": 5, "name": "Dana Cruz" }
            },
            "personnel": { "id": 21, "name": "Insp. Reyes" },
            "appointment_date": "2024-06-03 09:00:00",
            "status": "deployed"
        })),
        decode(json!({
            "id": 2,
            "building": { "id": 11, "name": "Pier 3", "address": "3 Pier Rd", "user_id": 7 },
            "appointment_date": "2024-06-04T10:30:00.000000Z",
            "status": "scheduled"
        })),
        decode(json!({
            "id": 3,
            "building": {
                "id": 12, "name": "Old Mill", "address": "8 Mill Ln",
                "owner": { "id": 5, "name": "Dana Cruz" }
            },
            "personnel": { "id": 21, "name": "Insp. Reyes" },
            "appointment_date": "2024-05-20 08:00:00",
            "status": "completed",
            "buildingInfo": {
                "inspection_order_no": "IO-0",
                "business_name": "Mill Foods",
                "address": "8 Mill Ln",
                "ntc": 1,
                "reinforcedconcrete": "1",
                "remarks": "fail",
                "reasons": "Expired extinguishers",
                "images": [{ "image": "inspections/abc.jpg" }]
            }
        })),
    ]
}

#[derive(Default)]
struct AcceptingGateway {
    payloads: Mutex<Vec<InspectionPayload>>,
}

#[async_trait]
impl InspectionGateway for AcceptingGateway {
    async fn submit_inspection(&self, payload: &InspectionPayload) -> Result<u16, GatewayError> {
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(payload.clone());
        Ok(CREATED)
    }
}

#[test]
fn remote_snapshot_feeds_role_views() {
    let bookings = remote_bookings();
    let owner = SessionContext::new(
        Some("t".to_string()),
        Some(UserProfile {
            id: 5,
            name: "Dana Cruz".to_string(),
        }),
        Role::BuildingOwner,
    );

    let all: Vec<u64> = BookingView::All
        .select(&owner, &bookings)
        .iter()
        .map(|booking| booking.id.0)
        .collect();
    assert_eq!(all, vec![1, 3]);

    let history = BookingView::History.select(&owner, &bookings);
    let record = history[0].inspection().expect("completed booking has record");
    assert_eq!(record.result(), InspectionResult::Fail);
    assert_eq!(record.failure_reason(), Some("Expired extinguishers"));
    assert!(record.inspection_types.ntc);
    assert!(record.construction_types.reinforced_concrete);
    assert_eq!(record.images, vec!["inspections/abc.jpg".to_string()]);

    assert_eq!(bookings[1].owner_id(), OwnerId(7));
    assert_eq!(bookings[1].personnel_label(), "Not assigned");
    assert_eq!(
        bookings[0].building.map_url().as_deref(),
        Some("https://www.google.com/maps?q=14.5995,120.9842")
    );
}

#[tokio::test]
async fn personnel_submits_pending_booking_and_it_moves_to_history() {
    let mut bookings = remote_bookings();
    let personnel = SessionContext::anonymous(Role::Personnel);
    let gateway = Arc::new(AcceptingGateway::default());
    let service = InspectionSubmissionService::new(gateway.clone());

    let pending_id = BookingView::Pending.select(&personnel, &bookings)[0].id;
    let booking = bookings
        .iter_mut()
        .find(|booking| booking.id == pending_id)
        .expect("pending booking present");

    let mut draft = InspectionDraft::for_booking(booking);
    draft.reference.inspection_order_no = "IO-1".to_string();
    draft.subject.business_name = "Acme".to_string();

    let receipt = service
        .submit(booking, &mut draft)
        .await
        .expect("submission accepted");
    assert_eq!(receipt.booking_id, pending_id);
    assert!(draft.is_pristine());

    assert!(BookingView::Pending.select(&personnel, &bookings).is_empty());
    let history = BookingView::History.select(&personnel, &bookings);
    assert_eq!(history.len(), 2);
    assert!(history
        .iter()
        .all(|booking| booking.status() == BookingStatus::Completed));

    let payloads = gateway.payloads.lock().expect("payload mutex poisoned");
    assert_eq!(payloads[0].field("address"), Some("1 Main St"));
    assert_eq!(payloads[0].field("buildingName"), Some("Acme Tower"));

    let csv = reports::bookings_to_string(&history).expect("csv renders");
    assert!(csv.contains("1,Acme Tower,Dana Cruz,1 Main St,2024-06-03 09:00:00,completed"));
}

#[test]
fn inspection_on_open_booking_is_rejected_on_decode() {
    let wire: WireBooking = serde_json::from_value(json!({
        "id": 9,
        "building": { "id": 1, "user_id": 5 },
        "appointment_date": "2024-06-03 09:00:00",
        "status": "deployed",
        "buildingInfo": { "remarks": "pass" }
    }))
    .expect("wire booking decodes");
    assert!(Booking::try_from(wire).is_err());
}
