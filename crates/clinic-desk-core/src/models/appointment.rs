//! Appointment scheduling models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::snapshot::refresh_optional;
use super::{date, snapshot, snapshot_source, text, RecordKind, Snapshot};
use crate::registry::{Directory, Record};

/// Appointment status.
///
/// Transitions are plain assignments; any status can follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "En attente",
            AppointmentStatus::Confirmed => "Confirmé",
            AppointmentStatus::Cancelled => "Annulé",
        }
    }
}

/// A scheduled consultation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Appointment {
    /// Registry id
    pub id: String,
    /// Patient name copied from the patient registry
    pub patient: Option<Snapshot>,
    /// Practitioner seen
    pub practitioner: String,
    /// Day of the appointment
    pub date: Option<NaiveDate>,
    /// Time slot, as entered (e.g., "09:30")
    pub time: String,
    /// Expected duration
    pub duration_minutes: Option<u32>,
    /// Reason for visit
    pub reason: String,
    /// Consultation room
    pub room: Option<String>,
    /// Status
    pub status: AppointmentStatus,
    /// Additional notes
    pub notes: Option<String>,
}

impl Appointment {
    /// Create a pending appointment for a selected patient.
    pub fn new(patient_id: &str, practitioner: String, date: NaiveDate, time: String) -> Self {
        Self {
            patient: Some(Snapshot::select(patient_id)),
            practitioner,
            date: Some(date),
            time,
            ..Self::default()
        }
    }

    pub fn set_status(&mut self, status: AppointmentStatus) {
        self.status = status;
    }
}

impl Record for Appointment {
    const KIND: RecordKind = RecordKind::Appointment;

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
            "practitioner" => text(&self.practitioner),
            "date" => date(&self.date),
            "time" => text(&self.time),
            "duration_minutes" => self.duration_minutes.map(|m| m.to_string()),
            "reason" => text(&self.reason),
            "room" => self.room.clone(),
            "status" => text(self.status.as_str()),
            "notes" => self.notes.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["patient_name", "practitioner", "date", "time"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["patient_name", "practitioner", "reason"]
    }

    fn display_name(&self) -> String {
        format!(
            "{} {}",
            date(&self.date).unwrap_or_default(),
            self.time
        )
        .trim()
        .to_string()
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.patient, RecordKind::Patient, directory);
    }
}
