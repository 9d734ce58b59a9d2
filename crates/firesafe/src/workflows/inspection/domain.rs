use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reference block of the inspection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionReference {
    pub inspection_order_no: String,
    pub date_issued: Option<NaiveDate>,
    pub date_inspected: Option<NaiveDate>,
}

/// General information about the inspected premises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionSubject {
    pub building_name: String,
    pub business_name: String,
    pub nature_of_business: String,
    pub owner_name: String,
    pub address: String,
    pub fsec_no: String,
    pub building_permit: String,
    pub fsic_no: String,
    pub business_permit_no: String,
    pub fire_insurance_no: String,
    pub contact_no: String,
}

/// Nature of the inspection conducted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionTypeFlags {
    pub inspection_during_construction: bool,
    pub fsic_occupancy: bool,
    pub fsic_new_permit: bool,
    pub fsic_renew_permit: bool,
    pub fsic_annual_inspection: bool,
    pub verification_inspection: bool,
    pub ntc: bool,
    pub ntcv: bool,
    pub abatement: bool,
    pub closure: bool,
    pub disapproval: bool,
}

impl InspectionTypeFlags {
    /// Flags paired with the multi-part field names the remote expects.
    pub fn fields(&self) -> [(&'static str, bool); 11] {
        [
            (
                "inspectionDuringConstruction",
                self.inspection_during_construction,
            ),
            ("fsicOccupancy", self.fsic_occupancy),
            ("fsicNewPermit", self.fsic_new_permit),
            ("fsicRenewPermit", self.fsic_renew_permit),
            ("fsicAnnualInspection", self.fsic_annual_inspection),
            ("verificationInspection", self.verification_inspection),
            ("ntc", self.ntc),
            ("ntcv", self.ntcv),
            ("abatement", self.abatement),
            ("closure", self.closure),
            ("disapproval", self.disapproval),
        ]
    }
}

/// Type of building construction observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionTypeFlags {
    pub mercantile: bool,
    pub business: bool,
    pub reinforced_concrete: bool,
    pub timber_framed_walls: bool,
    pub steel: bool,
    pub mixed: bool,
}

impl ConstructionTypeFlags {
    pub fn fields(&self) -> [(&'static str, bool); 6] {
        [
            ("mercantile", self.mercantile),
            ("business", self.business),
            ("reinforcedconcrete", self.reinforced_concrete),
            ("timberframedwalls", self.timber_framed_walls),
            ("steel", self.steel),
            ("mixed", self.mixed),
        ]
    }
}

/// Pass/fail toggle as edited on the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionResult {
    #[default]
    Pass,
    Fail,
}

impl InspectionResult {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pass" | "passed" => Some(Self::Pass),
            "fail" | "failed" => Some(Self::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for InspectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Settled result of a submitted inspection. A failure always carries its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum InspectionOutcome {
    Pass,
    Fail { reason: String },
}

impl InspectionOutcome {
    pub fn result(&self) -> InspectionResult {
        match self {
            Self::Pass => InspectionResult::Pass,
            Self::Fail { .. } => InspectionResult::Fail,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail { reason } => Some(reason.as_str()),
        }
    }
}

/// Structured questionnaire result attached to a completed booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub reference: InspectionReference,
    pub subject: InspectionSubject,
    pub inspection_types: InspectionTypeFlags,
    pub construction_types: ConstructionTypeFlags,
    pub others: String,
    pub outcome: InspectionOutcome,
    /// Image handles: local paths for records submitted here, stored file
    /// names for records read back from the remote.
    pub images: Vec<String>,
}

impl InspectionRecord {
    pub fn result(&self) -> InspectionResult {
        self.outcome.result()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.outcome.failure_reason()
    }
}
