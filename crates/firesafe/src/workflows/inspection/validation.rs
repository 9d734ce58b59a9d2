use std::fmt;

use super::domain::{InspectionRecord, InspectionResult};
use super::draft::InspectionDraft;

/// Read access shared by drafts and settled records so both pass through the same rules.
pub trait Questionnaire {
    fn inspection_order_no(&self) -> &str;
    fn business_name(&self) -> &str;
    fn address(&self) -> &str;
    fn result(&self) -> InspectionResult;
    fn failure_reason(&self) -> Option<&str>;
}

impl Questionnaire for InspectionDraft {
    fn inspection_order_no(&self) -> &str {
        &self.reference.inspection_order_no
    }

    fn business_name(&self) -> &str {
        &self.subject.business_name
    }

    fn address(&self) -> &str {
        &self.subject.address
    }

    fn result(&self) -> InspectionResult {
        self.result
    }

    fn failure_reason(&self) -> Option<&str> {
        Some(self.failure_reason.as_str())
    }
}

impl Questionnaire for InspectionRecord {
    fn inspection_order_no(&self) -> &str {
        &self.reference.inspection_order_no
    }

    fn business_name(&self) -> &str {
        &self.subject.business_name
    }

    fn address(&self) -> &str {
        &self.subject.address
    }

    fn result(&self) -> InspectionResult {
        self.outcome.result()
    }

    fn failure_reason(&self) -> Option<&str> {
        self.outcome.failure_reason()
    }
}

/// A single violated rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    MissingInspectionOrderNo,
    MissingBusinessName,
    MissingAddress,
    MissingFailureReason,
}

impl Violation {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingInspectionOrderNo => "Inspection Order No. is required.",
            Self::MissingBusinessName => "Business Name is required.",
            Self::MissingAddress => "Address is required.",
            Self::MissingFailureReason => "Please provide a reason for failure.",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Every rule a questionnaire broke. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.violations.iter().map(|violation| violation.message()).collect()
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

impl std::error::Error for ValidationError {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Evaluate all rules without short-circuiting.
pub fn violations<Q: Questionnaire + ?Sized>(questionnaire: &Q) -> Vec<Violation> {
    let mut violations = Vec::new();

    if is_blank(questionnaire.inspection_order_no()) {
        violations.push(Violation::MissingInspectionOrderNo);
    }
    if is_blank(questionnaire.business_name()) {
        violations.push(Violation::MissingBusinessName);
    }
    if is_blank(questionnaire.address()) {
        violations.push(Violation::MissingAddress);
    }
    if questionnaire.result() == InspectionResult::Fail
        && questionnaire.failure_reason().map_or(true, is_blank)
    {
        violations.push(Violation::MissingFailureReason);
    }

    violations
}

pub fn validate<Q: Questionnaire + ?Sized>(questionnaire: &Q) -> Result<(), ValidationError> {
    let violations = violations(questionnaire);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
