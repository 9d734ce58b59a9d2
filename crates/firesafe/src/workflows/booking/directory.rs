use std::fmt;

use async_trait::async_trait;

use super::domain::{Booking, Building, OwnerId};
use super::scheduling::BookingRequest;
use crate::workflows::buildings::{BuildingRegistration, RegistrationReply};

/// Which bookings a listing call asks the remote for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    /// `GET /my-booking?user_id=…`
    User(u64),
    /// `GET /bookings`
    All,
}

/// Read and write access to the remote building/booking directory.
#[async_trait]
pub trait BookingDirectory: Send + Sync {
    async fn buildings(&self, owner: Option<OwnerId>) -> Result<Vec<Building>, FetchError>;
    async fn bookings(&self, scope: BookingScope) -> Result<Vec<Booking>, FetchError>;
    async fn create_booking(&self, request: &BookingRequest) -> Result<(), FetchError>;
    async fn register_building(
        &self,
        registration: &BuildingRegistration,
    ) -> Result<RegistrationReply, FetchError>;
}

/// The remote call a [`FetchError`] came from. Each reads differently to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    List(&'static str),
    CreateBooking,
    RegisterBuilding,
}

impl fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCall::List(resource) => {
                write!(f, "Failed to fetch {resource}. Please try again later.")
            }
            RemoteCall::CreateBooking => {
                f.write_str("Failed to create booking. Please try again.")
            }
            RemoteCall::RegisterBuilding => {
                f.write_str("There was a problem registering the building.")
            }
        }
    }
}

/// A listing or write call against the remote failed. The caller may retry.
#[derive(Debug, thiserror::Error)]
#[error("{call}")]
pub struct FetchError {
    pub call: RemoteCall,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl FetchError {
    pub fn new<E>(resource: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::during(RemoteCall::List(resource), source)
    }

    pub fn during<E>(call: RemoteCall, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            call,
            source: source.into(),
        }
    }
}
