use chrono::NaiveDate;
use mime::Mime;

use super::domain::InspectionResult;
use super::draft::InspectionDraft;
use crate::workflows::booking::BookingId;

/// Multi-part field name repeated once per image.
pub const IMAGE_FIELD: &str = "images[]";

/// One file part of the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub handle: String,
    pub mime: Mime,
    pub file_name: String,
}

/// Transport-ready form for `POST /save-inpection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionPayload {
    pub booking_id: BookingId,
    fields: Vec<(&'static str, String)>,
    images: Vec<ImagePart>,
}

fn date_field(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl InspectionPayload {
    /// Assemble the form from an already validated draft.
    pub fn assemble(booking_id: BookingId, draft: &InspectionDraft) -> Self {
        let reference = &draft.reference;
        let subject = &draft.subject;

        let mut fields: Vec<(&'static str, String)> = vec![
            ("inspectionOrderNo", reference.inspection_order_no.clone()),
            ("dateIssued", date_field(reference.date_issued)),
            ("dateInspected", date_field(reference.date_inspected)),
            ("inspectionResult", draft.result.label().to_string()),
        ];

        if draft.result == InspectionResult::Fail {
            fields.push(("failureReason", draft.failure_reason.trim().to_string()));
        }

        fields.extend([
            ("booking_id", booking_id.0.to_string()),
            ("buildingName", subject.building_name.clone()),
            ("address", subject.address.clone()),
            ("businessName", subject.business_name.clone()),
            ("natureOfBusiness", subject.nature_of_business.clone()),
            ("ownerName", subject.owner_name.clone()),
            ("fsecNo", subject.fsec_no.clone()),
            ("buildingPermit", subject.building_permit.clone()),
            ("fsicNo", subject.fsic_no.clone()),
            ("businessPermitNo", subject.business_permit_no.clone()),
            ("fireInsuranceNo", subject.fire_insurance_no.clone()),
            ("contactNo", subject.contact_no.clone()),
        ]);

        fields.extend(
            draft
                .inspection_types
                .fields()
                .into_iter()
                .map(|(name, flag)| (name, flag.to_string())),
        );
        fields.push(("others", draft.others.clone()));
        fields.extend(
            draft
                .construction_types
                .fields()
                .into_iter()
                .map(|(name, flag)| (name, flag.to_string())),
        );

        let images = draft
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| ImagePart {
                handle: image.uri.clone(),
                mime: image.mime(),
                file_name: image
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("image-{}.jpg", index + 1)),
            })
            .collect();

        Self {
            booking_id,
            fields,
            images,
        }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn images(&self) -> &[ImagePart] {
        &self.images
    }
}
