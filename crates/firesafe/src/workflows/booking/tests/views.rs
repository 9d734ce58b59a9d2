use super::common::*;
use crate::workflows::booking::views::{self, tabs_for};
use crate::workflows::booking::{BookingStatus, BookingView, OwnerId};

#[test]
fn owner_filter_keeps_input_order() {
    let bookings = vec![scheduled(1, 5), deployed(2, 7), completed(3, 5)];
    let owned = views::owner_bookings(&bookings, OwnerId(5));
    assert_eq!(ids(&owned), vec![1, 3]);

    let buildings = vec![building(10, 7), building(11, 5), building(12, 5)];
    let owned: Vec<u64> = views::owner_buildings(&buildings, OwnerId(5))
        .iter()
        .map(|building| building.id.0)
        .collect();
    assert_eq!(owned, vec![11, 12]);
}

#[test]
fn pending_and_history_partition_by_status() {
    let bookings = vec![
        deployed(1, 5),
        completed(2, 5),
        scheduled(3, 5),
        deployed(4, 7),
    ];

    assert_eq!(ids(&views::pending(&bookings)), vec![1, 4]);
    assert_eq!(ids(&views::history(&bookings)), vec![2]);
    assert_eq!(
        ids(&views::with_status(&bookings, BookingStatus::Scheduled)),
        vec![3]
    );
}

#[test]
fn empty_inputs_yield_empty_views() {
    assert!(views::owner_bookings(&[], OwnerId(5)).is_empty());
    assert!(views::owner_buildings(&[], OwnerId(5)).is_empty());
    assert!(views::pending(&[]).is_empty());
    assert!(views::history(&[]).is_empty());

    let tabs = tabs_for(&personnel_session(), &[]);
    assert!(tabs.pending.is_empty());
    assert!(tabs.history.is_empty());
}

#[test]
fn owners_only_see_their_own_bookings() {
    let bookings = vec![deployed(1, 5), deployed(2, 7), completed(3, 7), completed(4, 5)];
    let session = owner_session(5);

    assert_eq!(ids(&BookingView::All.select(&session, &bookings)), vec![1, 4]);
    assert_eq!(ids(&BookingView::Pending.select(&session, &bookings)), vec![1]);
    assert_eq!(ids(&BookingView::History.select(&session, &bookings)), vec![4]);

    let tabs = tabs_for(&personnel_session(), &bookings);
    assert_eq!(ids(&tabs.pending), vec![1, 2]);
    assert_eq!(ids(&tabs.history), vec![3, 4]);
}

#[test]
fn owned_view_scopes_to_session_user() {
    let bookings = vec![deployed(1, 21), completed(2, 5)];
    let owned = BookingView::Owned.select(&personnel_session(), &bookings);
    assert_eq!(ids(&owned), vec![1]);
    assert_eq!(BookingView::Owned.label(), "My Bookings");
}
