//! Patient models.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{date, text, RecordKind};
use crate::registry::Record;

/// Patient file status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "active",
            PatientStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Active => "Actif",
            PatientStatus::Inactive => "Inactif",
        }
    }
}

/// Administrative sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "Féminin",
            Sex::Male => "Masculin",
        }
    }
}

/// A patient registry entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Patient {
    /// Registry id
    pub id: String,
    /// Family name
    pub last_name: String,
    /// Given name(s)
    pub first_name: String,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Administrative sex
    pub sex: Option<Sex>,
    /// Primary phone number
    pub phone: String,
    /// Email address
    pub email: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Blood group (e.g., "O+")
    pub blood_group: Option<String>,
    /// Known allergies, free text; empty when none recorded
    pub allergies: String,
    /// Secondary contact (name and phone)
    pub emergency_contact: Option<String>,
    /// Insurance or mutual name
    pub insurance: Option<String>,
    /// Additional notes
    pub notes: Option<String>,
    /// File status
    pub status: PatientStatus,
    /// Registration timestamp
    pub registered_at: Option<DateTime<Utc>>,
}

impl Patient {
    /// Create a new patient with required fields.
    pub fn new(last_name: String, first_name: String, phone: String) -> Self {
        Self {
            last_name,
            first_name,
            phone,
            registered_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Family name followed by given names.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
            .trim()
            .to_string()
    }

    /// Age in completed years on the given date.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        if on < birth {
            return None;
        }
        let mut age = on.year() - birth.year();
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}

impl Record for Patient {
    const KIND: RecordKind = RecordKind::Patient;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "last_name" => text(&self.last_name),
            "first_name" => text(&self.first_name),
            "full_name" => Some(self.full_name()),
            "birth_date" => date(&self.birth_date),
            "sex" => self.sex.map(|s| s.as_str().to_string()),
            "phone" => text(&self.phone),
            "email" => self.email.clone(),
            "address" => self.address.clone(),
            "blood_group" => self.blood_group.clone(),
            "allergies" => text(&self.allergies),
            "emergency_contact" => self.emergency_contact.clone(),
            "insurance" => self.insurance.clone(),
            "notes" => self.notes.clone(),
            "status" => text(self.status.as_str()),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["last_name", "first_name", "phone"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["id", "last_name", "first_name", "phone", "email"]
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}
