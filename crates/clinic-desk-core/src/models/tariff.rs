//! Medical service tariffs.

use serde::{Deserialize, Serialize};

use super::{text, RecordKind};
use crate::registry::Record;

/// A billable medical service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MedicalService {
    /// Registry id
    pub id: String,
    /// Tariff code (e.g., "CONS-GEN")
    pub code: String,
    /// Service label shown on invoices
    pub label: String,
    /// Grouping (e.g., "Consultation", "Imagerie")
    pub category: String,
    /// Unit price in the configured currency; `None` until set
    pub price: Option<u64>,
    /// Longer description
    pub description: Option<String>,
}

impl MedicalService {
    pub fn new(code: String, label: String, price: u64) -> Self {
        Self {
            code,
            label,
            price: Some(price),
            ..Self::default()
        }
    }
}

impl Record for MedicalService {
    const KIND: RecordKind = RecordKind::MedicalService;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "code" => text(&self.code),
            "label" => text(&self.label),
            "category" => text(&self.category),
            "price" => self.price.map(|p| p.to_string()),
            "description" => self.description.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["code", "label", "price"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["code", "label", "category"]
    }

    fn display_name(&self) -> String {
        self.label.clone()
    }
}
