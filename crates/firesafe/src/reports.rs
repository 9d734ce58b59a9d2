//! CSV rendering of booking listings.

use std::io::Write;

use serde::Serialize;

use crate::workflows::booking::Booking;
use crate::workflows::booking::scheduling::APPOINTMENT_FORMAT;

#[derive(Debug, Serialize)]
struct BookingRow<'a> {
    booking_id: u64,
    building: &'a str,
    owner: &'a str,
    address: &'a str,
    appointment: String,
    status: &'static str,
    personnel: &'a str,
    inspection_order_no: &'a str,
    result: &'static str,
    failure_reason: &'a str,
    image_count: usize,
}

impl<'a> From<&'a Booking> for BookingRow<'a> {
    fn from(booking: &'a Booking) -> Self {
        let inspection = booking.inspection();
        Self {
            booking_id: booking.id.0,
            building: &booking.building.name,
            owner: &booking.building.owner.name,
            address: &booking.building.address,
            appointment: booking.appointment_date.format(APPOINTMENT_FORMAT).to_string(),
            status: booking.status().label(),
            personnel: booking.personnel_label(),
            inspection_order_no: inspection
                .map(|record| record.reference.inspection_order_no.as_str())
                .unwrap_or(""),
            result: inspection.map(|record| record.result().label()).unwrap_or(""),
            failure_reason: inspection
                .and_then(|record| record.failure_reason())
                .unwrap_or(""),
            image_count: inspection.map(|record| record.images.len()).unwrap_or(0),
        }
    }
}

/// Write one header row plus one row per booking, in the given order.
pub fn write_bookings<W: Write>(writer: W, bookings: &[&Booking]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for booking in bookings {
        csv_writer.serialize(BookingRow::from(*booking))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn bookings_to_string(bookings: &[&Booking]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_bookings(&mut buffer, bookings)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
