//! Clinic configuration: letterhead identity, currency and list page sizes.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::RecordKind;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid page size for {0}: must be positive")]
    InvalidPageSize(RecordKind),

    #[error("Invalid default page size: must be positive")]
    InvalidDefaultPageSize,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Clinic identity printed on every exported document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClinicIdentity {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Logo shown on PDF letterheads
    pub logo_url: Option<String>,
}

impl ClinicIdentity {
    /// Field view used by `clinic.*` template placeholders.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "address" => Some(self.address.clone()),
            "phone" => Some(self.phone.clone()),
            "email" => Some(self.email.clone()),
            "logo_url" => self.logo_url.clone(),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClinicConfig {
    pub clinic: ClinicIdentity,
    /// Currency suffix for amounts (e.g., "FCFA")
    pub currency: String,
    /// Page size for kinds without an entry in `page_sizes`
    pub default_page_size: usize,
    /// Per-kind page sizes
    pub page_sizes: HashMap<RecordKind, usize>,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        let page_sizes = HashMap::from([
            (RecordKind::Appointment, 5),
            (RecordKind::LeaveRequest, 8),
            (RecordKind::Prescription, 5),
            (RecordKind::PurchaseOrder, 5),
            (RecordKind::Message, 8),
        ]);

        Self {
            clinic: ClinicIdentity::default(),
            currency: "FCFA".to_string(),
            default_page_size: 10,
            page_sizes,
        }
    }
}

impl ClinicConfig {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&raw)?;
        info!(path = %path.as_ref().display(), "loaded clinic configuration");
        Ok(config)
    }

    /// Parse and validate configuration from JSON text.
    ///
    /// Missing sections fall back to defaults.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero page sizes.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidDefaultPageSize);
        }
        if let Some((kind, _)) = self.page_sizes.iter().find(|(_, size)| **size == 0) {
            return Err(ConfigError::InvalidPageSize(*kind));
        }
        Ok(())
    }

    /// Page size for a kind's list page.
    pub fn page_size(&self, kind: RecordKind) -> usize {
        self.page_sizes
            .get(&kind)
            .copied()
            .unwrap_or(self.default_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClinicConfig::default();
        assert_eq!(config.currency, "FCFA");
        assert_eq!(config.page_size(RecordKind::Appointment), 5);
        assert_eq!(config.page_size(RecordKind::Patient), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClinicConfig::from_json(
            r#"{"clinic": {"name": "Clinique Les Palmiers"}, "page_sizes": {"patient": 2}}"#,
        )
        .unwrap();

        assert_eq!(config.clinic.name, "Clinique Les Palmiers");
        assert_eq!(config.currency, "FCFA");
        assert_eq!(config.page_size(RecordKind::Patient), 2);
        // Map replaced wholesale, other kinds use the default size
        assert_eq!(config.page_size(RecordKind::Appointment), 10);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ClinicConfig::from_json(r#"{"page_sizes": {"invoice": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize(RecordKind::Invoice)));
    }

    #[test]
    fn test_zero_default_page_size_rejected() {
        let err = ClinicConfig::from_json(r#"{"default_page_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDefaultPageSize));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"currency": "EUR"}}"#).unwrap();

        let config = ClinicConfig::load(file.path()).unwrap();
        assert_eq!(config.currency, "EUR");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClinicConfig::load("/nonexistent/clinic.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_identity_field_view() {
        let identity = ClinicIdentity {
            name: "Centre Médical Espoir".into(),
            ..ClinicIdentity::default()
        };
        assert_eq!(identity.field("name").as_deref(), Some("Centre Médical Espoir"));
        assert_eq!(identity.field("logo_url"), None);
    }
}
