pub mod directory;
pub mod domain;
mod lifecycle;
pub mod scheduling;
pub mod views;

#[cfg(test)]
mod tests;

pub use directory::{BookingDirectory, BookingScope, FetchError, RemoteCall};
pub use domain::{
    Booking, BookingId, BookingStatus, Building, BuildingId, Owner, OwnerId, Personnel,
    PersonnelId,
};
pub use lifecycle::LifecycleError;
pub use scheduling::{BookingKind, BookingRequest, ScheduleForm, SchedulingError};
pub use views::{BookingTabs, BookingView};
