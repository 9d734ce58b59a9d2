//! Role-appropriate partitions of booking and building collections.
//!
//! Every view is pure, keeps the input order, and yields an empty list for empty input.

use super::domain::{Booking, BookingStatus, Building, OwnerId};
use crate::session::{Role, SessionContext};

pub fn owner_buildings(buildings: &[Building], owner: OwnerId) -> Vec<&Building> {
    buildings
        .iter()
        .filter(|building| building.is_owned_by(owner))
        .collect()
}

pub fn owner_bookings(bookings: &[Booking], owner: OwnerId) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|booking| booking.owner_id() == owner)
        .collect()
}

/// Deployed bookings only. Scheduled bookings that were never dispatched
/// appear in neither this view nor [`history`].
pub fn pending(bookings: &[Booking]) -> Vec<&Booking> {
    with_status(bookings, BookingStatus::Deployed)
}

pub fn history(bookings: &[Booking]) -> Vec<&Booking> {
    with_status(bookings, BookingStatus::Completed)
}

pub fn with_status(bookings: &[Booking], status: BookingStatus) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|booking| booking.status() == status)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingView {
    Pending,
    History,
    Owned,
    All,
}

impl BookingView {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending Bookings",
            Self::History => "Booking History",
            Self::Owned => "My Bookings",
            Self::All => "All Bookings",
        }
    }

    /// Apply the view for the given session. Owners only ever see their own bookings.
    pub fn select<'a>(self, session: &SessionContext, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        let visible: Vec<&Booking> = match session.role() {
            Role::BuildingOwner => owner_bookings(bookings, session.owner_id()),
            Role::Personnel => bookings.iter().collect(),
        };

        match self {
            Self::Pending => visible
                .into_iter()
                .filter(|booking| booking.status() == BookingStatus::Deployed)
                .collect(),
            Self::History => visible
                .into_iter()
                .filter(|booking| booking.status() == BookingStatus::Completed)
                .collect(),
            Self::Owned => owner_bookings(bookings, session.owner_id()),
            Self::All => visible,
        }
    }
}

/// Pending/history tabs of the bookings screen.
#[derive(Debug, Default)]
pub struct BookingTabs<'a> {
    pub pending: Vec<&'a Booking>,
    pub history: Vec<&'a Booking>,
}

pub fn tabs_for<'a>(session: &SessionContext, bookings: &'a [Booking]) -> BookingTabs<'a> {
    BookingTabs {
        pending: BookingView::Pending.select(session, bookings),
        history: BookingView::History.select(session, bookings),
    }
}
