use std::time::Duration;

use super::common::*;
use crate::workflows::booking::{BookingStatus, LifecycleError};
use crate::workflows::inspection::{
    InspectionDraft, InspectionSubmissionService, SubmissionError, Violation,
};

#[tokio::test]
async fn created_response_completes_booking_and_resets_draft() {
    let gateway = RecordingGateway::created();
    let service = service(&gateway);
    let mut booking = deployed_booking();
    let mut draft = passing_draft();

    let receipt = service
        .submit(&mut booking, &mut draft)
        .await
        .expect("submission succeeds");

    assert_eq!(receipt.booking_id, booking.id);
    assert_eq!(receipt.image_count, 0);
    assert_eq!(receipt.redirect_after, Duration::from_millis(1000));
    assert_eq!(receipt.message(), "Form submitted successfully!");

    assert_eq!(booking.status(), BookingStatus::Completed);
    let record = booking.inspection().expect("record attached");
    assert_eq!(record.reference.inspection_order_no, "IO-1");
    assert_eq!(record.subject.business_name, "Acme");
    assert_eq!(draft, InspectionDraft::default());

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].field("inspectionResult"), Some("pass"));
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_gateway() {
    let gateway = RecordingGateway::created();
    let service = service(&gateway);
    let mut booking = deployed_booking();
    let mut draft = failing_draft("");
    let before = draft.clone();

    match service.submit(&mut booking, &mut draft).await {
        Err(SubmissionError::Validation(err)) => {
            assert_eq!(err.violations(), &[Violation::MissingFailureReason]);
            assert_eq!(err.to_string(), "Please provide a reason for failure.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(gateway.calls().is_empty());
    assert_eq!(draft, before);
    assert_eq!(booking.status(), BookingStatus::Deployed);
}

#[tokio::test]
async fn rejected_response_preserves_draft_and_booking() {
    let gateway = RecordingGateway::answering(500);
    let service = service(&gateway);
    let mut booking = deployed_booking();
    let mut draft = with_images(failing_draft("Blocked exit"));
    let before = draft.clone();

    let err = service
        .submit(&mut booking, &mut draft)
        .await
        .expect_err("non-201 fails");

    assert!(matches!(err, SubmissionError::Rejected { status: 500 }));
    assert!(err.is_submission_failure());
    assert_eq!(draft, before);
    assert_eq!(booking.status(), BookingStatus::Deployed);
    assert!(booking.inspection().is_none());

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].images().len(), 2);
}

#[tokio::test]
async fn ok_but_not_created_is_still_a_failure() {
    let gateway = RecordingGateway::answering(200);
    let service = service(&gateway);
    let mut booking = deployed_booking();
    let mut draft = passing_draft();

    let err = service
        .submit(&mut booking, &mut draft)
        .await
        .expect_err("only 201 counts");
    assert!(matches!(err, SubmissionError::Rejected { status: 200 }));
    assert!(!draft.is_pristine());
}

#[tokio::test]
async fn unreachable_remote_preserves_draft() {
    let gateway = RecordingGateway::offline();
    let service = service(&gateway);
    let mut booking = deployed_booking();
    let mut draft = passing_draft();
    let before = draft.clone();

    let err = service
        .submit(&mut booking, &mut draft)
        .await
        .expect_err("transport failure");

    assert!(matches!(err, SubmissionError::Unreachable(_)));
    assert_eq!(
        err.to_string(),
        "Failed to submit form. Please check your network or try again."
    );
    assert_eq!(draft, before);
    assert_eq!(booking.status(), BookingStatus::Deployed);
}

#[tokio::test]
async fn completed_booking_rejects_resubmission() {
    let gateway = RecordingGateway::created();
    let service = service(&gateway);
    let mut booking = deployed_booking();

    service
        .submit(&mut booking, &mut passing_draft())
        .await
        .expect("first submission succeeds");

    let mut second = passing_draft();
    match service.submit(&mut booking, &mut second).await {
        Err(SubmissionError::Lifecycle(LifecycleError::InvalidStateTransition {
            from, to, ..
        })) => {
            assert_eq!(from, BookingStatus::Completed);
            assert_eq!(to, BookingStatus::Completed);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
    assert_eq!(gateway.calls().len(), 1);
    assert!(!second.is_pristine());
}

#[tokio::test]
async fn redirect_delay_is_configurable() {
    let gateway = RecordingGateway::created();
    let service =
        InspectionSubmissionService::with_redirect_delay(gateway.clone(), Duration::from_millis(0));
    let mut booking = deployed_booking();

    let receipt = service
        .submit(&mut booking, &mut passing_draft())
        .await
        .expect("submission succeeds");
    assert_eq!(receipt.redirect_after, Duration::ZERO);
}
