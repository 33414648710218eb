//! In-memory record stores backing every list page.
//!
//! A [`Registry`] exclusively owns all records of one type. Pages derive
//! filtered, paginated slices from it through a [`ListView`] and mutate it
//! through an [`Editor`] or a confirmed [`DeleteRequest`].

mod editor;
mod filter;
mod paginate;
mod seed;
mod view;

pub use editor::*;
pub use filter::*;
pub use paginate::*;
pub use seed::*;
pub use view::*;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::RecordKind;

/// Required fields missing, or values out of range, on submit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.missing, .invalid))]
pub struct ValidationError {
    /// Missing field keys, in declaration order
    pub missing: Vec<&'static str>,
    /// Present fields whose value cannot be accepted
    pub invalid: Vec<&'static str>,
}

fn describe(missing: &[&'static str], invalid: &[&'static str]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Champs obligatoires manquants : {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("Valeurs invalides : {}", invalid.join(", ")));
    }
    parts.join(" ; ")
}

/// Registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Record not found: {kind}/{id}")]
    NotFound { kind: RecordKind, id: String },

    #[error("Duplicate id: {kind}/{id}")]
    DuplicateId { kind: RecordKind, id: String },

    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("Editor is closed")]
    EditorClosed,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A record type managed by a [`Registry`].
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Kind tag of this record type.
    const KIND: RecordKind;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Display string for a field key, `None` when the record has no such
    /// field or the optional value is absent.
    fn field(&self, name: &str) -> Option<String>;

    /// Fields that must be non-empty on submit.
    fn required_fields() -> &'static [&'static str];

    /// Fields scanned by free-text search.
    fn searchable_fields() -> &'static [&'static str];

    /// Fields whose present value is out of range (e.g. an amount too large
    /// to total).
    fn invalid_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Name copied into other records' snapshots.
    fn display_name(&self) -> String;

    /// Copy display values of referenced records onto this one.
    fn capture_snapshots(&mut self, _directory: &dyn Directory) {}
}

/// Lookup of display names across registries, used to take snapshots.
pub trait Directory {
    fn lookup_name(&self, kind: RecordKind, id: &str) -> Option<String>;
}

/// Check every required field is present and not blank, and every present
/// value is in range.
pub fn validate<R: Record>(record: &R) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = R::required_fields()
        .iter()
        .copied()
        .filter(|name| record.field(name).map_or(true, |v| v.trim().is_empty()))
        .collect();
    let invalid = record.invalid_fields();

    if missing.is_empty() && invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing, invalid })
    }
}

/// Ordered in-memory collection of one record type.
#[derive(Debug, Clone)]
pub struct Registry<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Registry<R> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a registry pre-filled from a seed source.
    pub fn with_seed<S: SeedSource<R>>(seed: S) -> RegistryResult<Self> {
        let mut registry = Self::new();
        registry.load_seed(seed)?;
        Ok(registry)
    }

    /// Append seed records, bypassing required-field checks.
    ///
    /// Ids stay unique: blank ids are generated, clashing ids are rejected.
    /// A rejected batch leaves the registry unchanged.
    pub fn load_seed<S: SeedSource<R>>(&mut self, seed: S) -> RegistryResult<usize> {
        let records = seed.load()?;
        let mut batch = Vec::with_capacity(records.len());
        for mut record in records {
            self.claim_id(&mut record, &batch)?;
            batch.push(record);
        }
        let count = batch.len();
        self.records.extend(batch);
        debug!(kind = %R::KIND, count, "seeded registry");
        Ok(count)
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    /// Get a record by id.
    pub fn get(&self, id: &str) -> RegistryResult<&R> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))
    }

    /// Validate and append a new record, generating its id when blank.
    pub fn insert(&mut self, record: R) -> RegistryResult<String> {
        validate(&record)?;
        let id = self.push(record)?;
        debug!(kind = %R::KIND, %id, "record created");
        Ok(id)
    }

    /// Validate and fully replace the record with the same id.
    pub fn replace(&mut self, record: R) -> RegistryResult<()> {
        validate(&record)?;
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| not_found::<R>(record.id()))?;
        debug!(kind = %R::KIND, id = %record.id(), "record replaced");
        *slot = record;
        Ok(())
    }

    /// Remove a record immediately. UI paths go through [`Registry::request_delete`].
    pub fn remove(&mut self, id: &str) -> RegistryResult<R> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        debug!(kind = %R::KIND, %id, "record deleted");
        Ok(self.records.remove(index))
    }

    /// Start a confirmation-gated delete.
    pub fn request_delete(&self, id: &str) -> RegistryResult<DeleteRequest> {
        self.get(id)?;
        Ok(DeleteRequest {
            kind: R::KIND,
            id: id.to_string(),
        })
    }

    /// Records matching a query, in store order.
    pub fn filter(&self, query: &Query) -> Vec<&R> {
        query.apply(&self.records)
    }

    fn push(&mut self, mut record: R) -> RegistryResult<String> {
        self.claim_id(&mut record, &[])?;
        let id = record.id().to_string();
        self.records.push(record);
        Ok(id)
    }

    /// Give `record` a fresh id when blank, or reject an id already used by
    /// the registry or by `pending` records not yet stored.
    fn claim_id(&self, record: &mut R, pending: &[R]) -> RegistryResult<()> {
        let taken = |id: &str| self.contains(id) || pending.iter().any(|r| r.id() == id);

        if record.id().trim().is_empty() {
            let id = loop {
                let id = uuid::Uuid::new_v4().to_string();
                if !taken(&id) {
                    break id;
                }
            };
            record.set_id(id);
        } else if taken(record.id()) {
            return Err(RegistryError::DuplicateId {
                kind: R::KIND,
                id: record.id().to_string(),
            });
        }
        Ok(())
    }
}

impl<R: Record> Directory for Registry<R> {
    fn lookup_name(&self, kind: RecordKind, id: &str) -> Option<String> {
        if kind != R::KIND {
            return None;
        }
        self.get(id).ok().map(|r| r.display_name())
    }
}

fn not_found<R: Record>(id: &str) -> RegistryError {
    RegistryError::NotFound {
        kind: R::KIND,
        id: id.to_string(),
    }
}

/// A delete waiting for user confirmation.
///
/// Declining (or dropping) the request leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete request does nothing until confirmed"]
pub struct DeleteRequest {
    kind: RecordKind,
    id: String,
}

impl DeleteRequest {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Perform the delete.
    pub fn confirm<R: Record>(self, registry: &mut Registry<R>) -> RegistryResult<R> {
        if self.kind != R::KIND {
            return Err(not_found::<R>(&self.id));
        }
        registry.remove(&self.id)
    }

    /// Abandon the delete.
    pub fn decline(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, StaffMember};

    fn patient(id: &str, last_name: &str) -> Patient {
        Patient {
            id: id.into(),
            ..Patient::new(last_name.into(), "Awa".into(), "0700000000".into())
        }
    }

    #[test]
    fn test_insert_generates_id() {
        let mut registry = Registry::new();
        let id = registry.insert(patient("", "Traoré")).unwrap();

        assert_eq!(id.len(), 36); // UUID format
        assert_eq!(registry.get(&id).unwrap().last_name, "Traoré");
    }

    #[test]
    fn test_insert_keeps_client_id() {
        let mut registry = Registry::new();
        let id = registry.insert(patient("P-001", "Traoré")).unwrap();
        assert_eq!(id, "P-001");
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut registry = Registry::new();
        registry.insert(patient("1", "Traoré")).unwrap();

        let err = registry.insert(patient("1", "Kouamé")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { ref id, .. } if id == "1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_validates_required_fields() {
        let mut registry = Registry::new();
        let mut incomplete = patient("", "");
        incomplete.phone = "   ".into();

        let err = registry.insert(incomplete).unwrap_err();
        match err {
            RegistryError::Validation(e) => {
                assert_eq!(e.missing, vec!["last_name", "phone"]);
                assert_eq!(
                    e.to_string(),
                    "Champs obligatoires manquants : last_name, phone"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_rejected_seed_leaves_registry_unchanged() {
        let mut registry = Registry::new();
        registry.insert(patient("0", "Bamba")).unwrap();

        let batch = vec![patient("1", "Traoré"), patient("2", "Kouamé"), patient("1", "Koné")];
        let err = registry.load_seed(batch).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { ref id, .. } if id == "1"));
        assert_eq!(registry.len(), 1);

        let err = registry.load_seed(vec![patient("3", "Diallo"), patient("0", "Koné")]);
        assert!(err.is_err());
        assert!(!registry.contains("3"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_seed_generates_distinct_ids() {
        let mut registry = Registry::new();
        let count = registry
            .load_seed(vec![patient("", "Traoré"), patient(" ", "Kouamé")])
            .unwrap();
        assert_eq!(count, 2);
        assert_ne!(registry.records()[0].id, registry.records()[1].id);
    }

    #[test]
    fn test_replace_is_full_replace() {
        let mut registry = Registry::new();
        let mut original = patient("1", "Traoré");
        original.notes = Some("Suivi HTA".into());
        registry.insert(original).unwrap();

        let replacement = patient("1", "Traoré");
        registry.replace(replacement).unwrap();

        assert_eq!(registry.get("1").unwrap().notes, None);
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut registry: Registry<Patient> = Registry::new();
        let err = registry.replace(patient("9", "Traoré")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut registry = Registry::new();
        registry.insert(patient("1", "Traoré")).unwrap();

        registry.request_delete("1").unwrap().decline();
        assert!(registry.contains("1"));

        let removed = registry.request_delete("1").unwrap().confirm(&mut registry).unwrap();
        assert_eq!(removed.id, "1");
        assert!(matches!(
            registry.get("1"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_request_for_unknown_id() {
        let registry: Registry<Patient> = Registry::new();
        assert!(registry.request_delete("404").is_err());
    }

    #[test]
    fn test_directory_lookup_is_kind_scoped() {
        let mut staff = Registry::new();
        staff
            .insert(StaffMember {
                id: "7".into(),
                ..StaffMember::new("Diallo".into(), "Awa".into(), "Infirmière".into())
            })
            .unwrap();

        assert_eq!(
            staff.lookup_name(RecordKind::Staff, "7").as_deref(),
            Some("Awa Diallo")
        );
        assert_eq!(staff.lookup_name(RecordKind::Patient, "7"), None);
        assert_eq!(staff.lookup_name(RecordKind::Staff, "8"), None);
    }
}
