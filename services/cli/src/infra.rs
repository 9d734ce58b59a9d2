use chrono::{NaiveDate, NaiveTime};
use firesafe::workflows::booking::{Booking, BookingKind, Building};
use firesafe::workflows::inspection::{ImageAttachment, InspectionDraft, MediaSelection};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|err| format!("failed to parse '{raw}' as HH:MM ({err})"))
}

pub(crate) fn parse_kind(raw: &str) -> Result<BookingKind, String> {
    BookingKind::parse(raw).ok_or_else(|| format!("unknown booking kind '{raw}'"))
}

/// Attachment for a local photo. The content type is guessed from the
/// extension and left out when it does not look like an image.
pub(crate) fn image_attachment(path: &Path) -> ImageAttachment {
    let attachment = ImageAttachment::new(path.display().to_string());
    match mime_guess::from_path(path).first() {
        Some(guess) if guess.type_() == mime::IMAGE => attachment.with_content_type(&guess),
        _ => attachment,
    }
}

pub(crate) async fn read_draft(path: &Path) -> io::Result<InspectionDraft> {
    let raw = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&raw).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Draft for one booking: the saved file, blank subject fields taken from the
/// booking, and `images` replacing the saved attachments when any are given.
pub(crate) async fn prepare_draft(
    path: &Path,
    images: &[PathBuf],
    booking: &Booking,
) -> io::Result<InspectionDraft> {
    let mut draft = read_draft(path).await?;
    draft.prefill_from(booking);
    if !images.is_empty() {
        let attachments = images.iter().map(|image| image_attachment(image)).collect();
        draft.apply_selection(MediaSelection::Selected(attachments));
    }
    Ok(draft)
}

pub(crate) async fn write_draft(path: &Path, draft: &InspectionDraft) -> io::Result<()> {
    let body = serde_json::to_string_pretty(draft)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    tokio::fs::write(path, body).await
}

pub(crate) fn render_buildings(buildings: &[Building]) -> String {
    let mut out = String::new();
    if buildings.is_empty() {
        out.push_str("No buildings found.\n");
        return out;
    }

    for building in buildings {
        let _ = writeln!(
            out,
            "[{}] {} ({}) - {}",
            building.id.0, building.name, building.building_type, building.address
        );
        let _ = writeln!(
            out,
            "    owner: {} | floors: {} | units: {}",
            building.owner.name, building.floors, building.units
        );
        if let Some(url) = building.map_url() {
            let _ = writeln!(out, "    map: {url}");
        }
    }
    out
}

pub(crate) fn render_bookings(title: &str, bookings: &[&Booking]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title} ({})", bookings.len());
    if bookings.is_empty() {
        out.push_str("  No bookings available.\n");
        return out;
    }

    for booking in bookings {
        let _ = writeln!(
            out,
            "  {} {} | {} | {} | {} | personnel: {}",
            booking.id,
            booking.appointment_date.format("%Y-%m-%d %H:%M"),
            booking.status(),
            booking.building.name,
            booking.building.address,
            booking.personnel_label()
        );
        if let Some(record) = booking.inspection() {
            let _ = write!(
                out,
                "      inspection {} -> {}",
                record.reference.inspection_order_no,
                record.result()
            );
            if let Some(reason) = record.failure_reason() {
                let _ = write!(out, " ({reason})");
            }
            out.push('\n');
        }
    }
    out
}
