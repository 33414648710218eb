//! Prescriptions (ordonnances).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::snapshot::refresh_optional;
use super::{date, snapshot, snapshot_source, text, RecordKind, Snapshot};
use crate::registry::{Directory, Record};

/// One prescribed medication line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Medication {
    pub name: String,
    /// Strength per intake (e.g., "500 mg")
    pub dosage: String,
    /// Intake schedule (e.g., "3 fois par jour")
    pub frequency: String,
    /// Treatment length (e.g., "7 jours")
    pub duration: String,
    pub instructions: Option<String>,
}

/// A prescription for one patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Prescription {
    /// Registry id
    pub id: String,
    pub patient: Option<Snapshot>,
    pub prescriber: String,
    pub date: Option<NaiveDate>,
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    /// Known allergies; empty when none recorded
    pub allergies: String,
    pub notes: Option<String>,
}

impl Record for Prescription {
    const KIND: RecordKind = RecordKind::Prescription;

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
            "date" => date(&self.date),
            "diagnosis" => text(&self.diagnosis),
            "medications" => Some(
                self.medications
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            "allergies" => text(&self.allergies),
            "notes" => self.notes.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["patient_name", "prescriber", "medications"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["patient_name", "prescriber", "diagnosis"]
    }

    fn display_name(&self) -> String {
        format!("Ordonnance {}", self.id)
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.patient, RecordKind::Patient, directory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medications_field() {
        let prescription = Prescription {
            medications: vec![
                Medication {
                    name: "Amoxicilline".into(),
                    ..Medication::default()
                },
                Medication {
                    name: "Paracétamol".into(),
                    ..Medication::default()
                },
            ],
            ..Prescription::default()
        };
        assert_eq!(
            prescription.field("medications").as_deref(),
            Some("Amoxicilline, Paracétamol")
        );
    }
}
