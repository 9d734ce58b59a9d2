use mime::Mime;
use serde::{Deserialize, Serialize};

use super::domain::{
    ConstructionTypeFlags, InspectionOutcome, InspectionRecord, InspectionReference,
    InspectionResult, InspectionSubject, InspectionTypeFlags,
};
use super::validation::{self, ValidationError};
use crate::workflows::booking::Booking;

/// An image handed over by the media picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Local handle (path or `file://` URI) as reported by the picker.
    pub uri: String,
    /// Content type; the picker leaves it out for plain photo selections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ImageAttachment {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, mime: &Mime) -> Self {
        self.content_type = Some(mime.essence_str().to_string());
        self
    }

    /// Declared content type, falling back to JPEG when absent or unparsable.
    pub fn mime(&self) -> Mime {
        self.content_type
            .as_deref()
            .and_then(|raw| raw.parse::<Mime>().ok())
            .unwrap_or(mime::IMAGE_JPEG)
    }

    /// Last path segment of the handle.
    pub fn file_name(&self) -> Option<&str> {
        self.uri
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

fn fill_blank(field: &mut String, value: &str) {
    if field.trim().is_empty() {
        *field = value.to_string();
    }
}

/// Result of one media-picker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSelection {
    Cancelled,
    Selected(Vec<ImageAttachment>),
}

/// The in-progress, not-yet-submitted inspection held by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionDraft {
    pub reference: InspectionReference,
    pub subject: InspectionSubject,
    pub inspection_types: InspectionTypeFlags,
    pub construction_types: ConstructionTypeFlags,
    pub others: String,
    pub result: InspectionResult,
    pub failure_reason: String,
    pub images: Vec<ImageAttachment>,
}

impl InspectionDraft {
    /// Empty draft with the general information pre-filled from the booking card.
    pub fn for_booking(booking: &Booking) -> Self {
        let mut draft = Self::default();
        draft.prefill_from(booking);
        draft
    }

    /// Fill blank building name, owner name and address from the booking.
    /// Values the inspector already typed are kept.
    pub fn prefill_from(&mut self, booking: &Booking) {
        let building = &booking.building;
        fill_blank(&mut self.subject.building_name, &building.name);
        fill_blank(&mut self.subject.owner_name, &building.owner.name);
        fill_blank(&mut self.subject.address, &building.address);
    }

    /// Apply a picker result. A new selection replaces the previous list.
    pub fn apply_selection(&mut self, selection: MediaSelection) {
        if let MediaSelection::Selected(images) = selection {
            self.images = images;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Validate and settle the draft into a record. The draft is left untouched.
    pub fn to_record(&self) -> Result<InspectionRecord, ValidationError> {
        validation::validate(self)?;

        let outcome = match self.result {
            InspectionResult::Pass => InspectionOutcome::Pass,
            InspectionResult::Fail => InspectionOutcome::Fail {
                reason: self.failure_reason.trim().to_string(),
            },
        };

        Ok(InspectionRecord {
            reference: self.reference.clone(),
            subject: self.subject.clone(),
            inspection_types: self.inspection_types,
            construction_types: self.construction_types,
            others: self.others.clone(),
            outcome,
            images: self.images.iter().map(|image| image.uri.clone()).collect(),
        })
    }
}
