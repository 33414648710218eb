//! Lab analysis requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::snapshot::refresh_optional;
use super::{date, snapshot, snapshot_source, text, RecordKind, Snapshot};
use crate::registry::{Directory, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Routine,
    Urgent,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Routine => "routine",
            Urgency::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Routine => "Normale",
            Urgency::Urgent => "Urgente",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Requested,
    InProgress,
    Completed,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Requested => "requested",
            AnalysisStatus::InProgress => "in_progress",
            AnalysisStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStatus::Requested => "Demandée",
            AnalysisStatus::InProgress => "En cours",
            AnalysisStatus::Completed => "Terminée",
        }
    }
}

/// A lab request form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Analysis {
    /// Registry id
    pub id: String,
    pub patient: Option<Snapshot>,
    /// Requesting clinician
    pub prescriber: String,
    /// Requested tests (e.g., "NFS", "Glycémie")
    pub tests: Vec<String>,
    /// Sample type (e.g., "Sang", "Urines")
    pub sample_type: Option<String>,
    pub urgency: Urgency,
    /// Clinical context for the lab
    pub clinical_info: String,
    /// Patient must be fasting
    pub fasting: bool,
    pub requested_on: Option<NaiveDate>,
    pub status: AnalysisStatus,
    /// Result summary once completed
    pub results: Option<String>,
}

impl Analysis {
    pub fn set_status(&mut self, status: AnalysisStatus) {
        self.status = status;
    }
}

impl Record for Analysis {
    const KIND: RecordKind = RecordKind::Analysis;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "patient_id" => snapshot_source(&self.patient),
            "patient_name" => snapshot(&self.patient),
            "prescriber" => text(&self.prescriber),
            "tests" => Some(self.tests.join(", ")),
            "sample_type" => self.sample_type.clone(),
            "urgency" => text(self.urgency.as_str()),
            "clinical_info" => text(&self.clinical_info),
            "fasting" => text(if self.fasting { "Oui" } else { "Non" }),
            "requested_on" => date(&self.requested_on),
            "status" => text(self.status.as_str()),
            "results" => self.results.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["patient_name", "prescriber", "tests"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["patient_name", "prescriber", "tests"]
    }

    fn display_name(&self) -> String {
        self.tests.join(", ")
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.patient, RecordKind::Patient, directory);
    }
}
