//! Seed data injected at registry construction.

use super::{Record, RegistryResult};

/// A source of initial records for a registry.
pub trait SeedSource<R: Record> {
    fn load(self) -> RegistryResult<Vec<R>>;
}

impl<R: Record> SeedSource<R> for Vec<R> {
    fn load(self) -> RegistryResult<Vec<R>> {
        Ok(self)
    }
}

/// Seed records from a JSON array.
#[derive(Debug, Clone, Copy)]
pub struct JsonSeed<'a>(pub &'a str);

impl<R: Record> SeedSource<R> for JsonSeed<'_> {
    fn load(self) -> RegistryResult<Vec<R>> {
        Ok(serde_json::from_str(self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MedicalService, Patient};
    use crate::registry::{Registry, RegistryError};

    #[test]
    fn test_json_seed() {
        let registry: Registry<Patient> = Registry::with_seed(JsonSeed(
            r#"[
                {"id": "1", "last_name": "Traoré", "first_name": "Awa", "phone": "0701"},
                {"id": "2", "last_name": "Kouamé", "first_name": "Yao", "phone": "0502", "status": "inactive"}
            ]"#,
        ))
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("2").unwrap().last_name, "Kouamé");
    }

    #[test]
    fn test_seed_generates_blank_ids() {
        let registry = Registry::with_seed(vec![
            MedicalService::new("CONS".into(), "Consultation".into(), 10_000),
            MedicalService::new("ECHO".into(), "Échographie".into(), 25_000),
        ])
        .unwrap();

        let ids: Vec<_> = registry.records().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_seed_rejects_duplicate_ids() {
        let result: RegistryResult<Registry<Patient>> =
            Registry::with_seed(JsonSeed(r#"[{"id": "1"}, {"id": "1"}]"#));
        assert!(matches!(result, Err(RegistryError::DuplicateId { .. })));
    }

    #[test]
    fn test_malformed_seed() {
        let result: RegistryResult<Registry<Patient>> = Registry::with_seed(JsonSeed("{"));
        assert!(matches!(result, Err(RegistryError::Json(_))));
    }
}
