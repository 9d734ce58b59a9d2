use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::draft::InspectionDraft;
use super::gateway::{GatewayError, InspectionGateway, CREATED};
use super::payload::InspectionPayload;
use super::validation::ValidationError;
use crate::workflows::booking::{Booking, BookingId, BookingStatus, LifecycleError};

/// Delay before the caller routes away from a successfully submitted form.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Confirmation handed back after the remote stored the inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub booking_id: BookingId,
    pub image_count: usize,
    pub redirect_after: Duration,
}

impl SubmissionReceipt {
    pub fn message(&self) -> &'static str {
        "Form submitted successfully!"
    }
}

/// Error raised by the submission pipeline. Only `Validation` and `Lifecycle`
/// are raised before the network is touched.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("Failed to submit form. Please try again. (status {status})")]
    Rejected { status: u16 },
    #[error("Failed to submit form. Please check your network or try again.")]
    Unreachable(#[source] GatewayError),
}

impl SubmissionError {
    /// Remote failures: the draft was preserved and the same submission may be retried.
    pub fn is_submission_failure(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Unreachable(_))
    }
}

/// Validates drafts, posts them, and applies the reset-on-success/preserve-on-failure policy.
pub struct InspectionSubmissionService<G> {
    gateway: Arc<G>,
    redirect_delay: Duration,
}

impl<G> InspectionSubmissionService<G>
where
    G: InspectionGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_redirect_delay(gateway, DEFAULT_REDIRECT_DELAY)
    }

    pub fn with_redirect_delay(gateway: Arc<G>, redirect_delay: Duration) -> Self {
        Self {
            gateway,
            redirect_delay,
        }
    }

    /// Submit the draft against a deployed booking.
    ///
    /// On HTTP 201 the booking completes with the record and the draft is reset.
    /// Every other outcome leaves both the booking and the draft as they were.
    pub async fn submit(
        &self,
        booking: &mut Booking,
        draft: &mut InspectionDraft,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if booking.status() != BookingStatus::Deployed {
            return Err(LifecycleError::InvalidStateTransition {
                booking: booking.id,
                from: booking.status(),
                to: BookingStatus::Completed,
            }
            .into());
        }

        let record = draft.to_record()?;
        let payload = InspectionPayload::assemble(booking.id, draft);
        let image_count = payload.images().len();

        let status = match self.gateway.submit_inspection(&payload).await {
            Ok(status) => status,
            Err(err) => {
                warn!(booking = %booking.id, error = %err, "inspection submission unreachable");
                return Err(SubmissionError::Unreachable(err));
            }
        };

        if status != CREATED {
            warn!(booking = %booking.id, status, "inspection submission rejected");
            return Err(SubmissionError::Rejected { status });
        }

        booking.complete(record)?;
        draft.reset();

        info!(booking = %booking.id, image_count, "inspection submitted");

        Ok(SubmissionReceipt {
            booking_id: booking.id,
            image_count,
            redirect_after: self.redirect_delay,
        })
    }
}
