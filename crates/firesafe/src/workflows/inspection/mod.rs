//! Inspection questionnaire drafting, validation, and submission.

pub mod domain;
pub mod draft;
pub mod gateway;
pub mod payload;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ConstructionTypeFlags, InspectionOutcome, InspectionRecord, InspectionReference,
    InspectionResult, InspectionSubject, InspectionTypeFlags,
};
pub use draft::{ImageAttachment, InspectionDraft, MediaSelection};
pub use gateway::{GatewayError, InspectionGateway, CREATED};
pub use payload::{ImagePart, InspectionPayload, IMAGE_FIELD};
pub use service::{
    InspectionSubmissionService, SubmissionError, SubmissionReceipt, DEFAULT_REDIRECT_DELAY,
};
pub use validation::{Questionnaire, ValidationError, Violation};
