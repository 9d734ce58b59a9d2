use chrono::NaiveDateTime;

use super::domain::{Booking, BookingId, BookingStatus, Building, Personnel};
use crate::workflows::inspection::validation::{self, ValidationError};
use crate::workflows::inspection::InspectionRecord;

/// Error raised when an action does not fit the booking's current status.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("booking {booking} cannot move from {from} to {to}")]
    InvalidStateTransition {
        booking: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error("booking {booking} carries an inspection while {status}")]
    InspectionBeforeCompletion {
        booking: BookingId,
        status: BookingStatus,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Booking {
    /// New booking created by a scheduling action.
    pub fn scheduled(id: BookingId, building: Building, appointment_date: NaiveDateTime) -> Self {
        Self {
            id,
            building,
            personnel: None,
            appointment_date,
            status: BookingStatus::Scheduled,
            inspection: None,
        }
    }

    /// Rebuild a booking from a remote snapshot, rejecting inconsistent ones.
    pub fn restore(
        id: BookingId,
        building: Building,
        personnel: Option<Personnel>,
        appointment_date: NaiveDateTime,
        status: BookingStatus,
        inspection: Option<InspectionRecord>,
    ) -> Result<Self, LifecycleError> {
        if inspection.is_some() && status != BookingStatus::Completed {
            return Err(LifecycleError::InspectionBeforeCompletion {
                booking: id,
                status,
            });
        }

        Ok(Self {
            id,
            building,
            personnel,
            appointment_date,
            status,
            inspection,
        })
    }

    fn advance(&mut self, target: BookingStatus) -> Result<(), LifecycleError> {
        if !self.status.can_transition_to(target) {
            return Err(LifecycleError::InvalidStateTransition {
                booking: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    /// scheduled -> deployed. Building and appointment are guaranteed by construction.
    pub fn dispatch(&mut self, personnel: Personnel) -> Result<(), LifecycleError> {
        self.advance(BookingStatus::Deployed)?;
        self.personnel = Some(personnel);
        Ok(())
    }

    /// deployed -> completed, attaching the record in the same step.
    pub fn complete(&mut self, record: InspectionRecord) -> Result<(), LifecycleError> {
        if !self.status.can_transition_to(BookingStatus::Completed) {
            return Err(LifecycleError::InvalidStateTransition {
                booking: self.id,
                from: self.status,
                to: BookingStatus::Completed,
            });
        }
        validation::validate(&record)?;

        self.advance(BookingStatus::Completed)?;
        self.inspection = Some(record);
        Ok(())
    }
}
