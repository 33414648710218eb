//! Snapshot fields: display values copied from another record at save time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecordKind;
use crate::registry::Directory;

/// A value copied from another record, never kept in sync afterwards.
///
/// `source_id` is the id of the record the value was copied from. An
/// unresolved snapshot (no `taken_at`) only carries the selection made in a
/// form; it gets its value when the owning record is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Id of the source record at the time of selection
    pub source_id: String,
    /// Copied display value
    #[serde(default)]
    pub value: String,
    /// When the value was copied
    #[serde(default)]
    pub taken_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Record a selection without copying anything yet.
    pub fn select(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            value: String::new(),
            taken_at: None,
        }
    }

    /// Copy a value now.
    pub fn take(source_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            value: value.into(),
            taken_at: Some(Utc::now()),
        }
    }

    /// Check if a value has been copied.
    pub fn is_resolved(&self) -> bool {
        self.taken_at.is_some()
    }

    /// Re-copy the value from the source record.
    ///
    /// Returns `false` and keeps the previous value when the source no longer
    /// exists.
    pub fn refresh(&mut self, kind: RecordKind, directory: &dyn Directory) -> bool {
        match directory.lookup_name(kind, &self.source_id) {
            Some(value) => {
                self.value = value;
                self.taken_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }
}

/// Refresh an optional snapshot in place.
pub(crate) fn refresh_optional(
    snapshot: &mut Option<Snapshot>,
    kind: RecordKind,
    directory: &dyn Directory,
) {
    if let Some(snapshot) = snapshot.as_mut() {
        snapshot.refresh(kind, directory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Names;

    impl Directory for Names {
        fn lookup_name(&self, kind: RecordKind, id: &str) -> Option<String> {
            match (kind, id) {
                (RecordKind::Staff, "7") => Some("Awa Diallo".into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_select_is_unresolved() {
        let snapshot = Snapshot::select("7");
        assert!(!snapshot.is_resolved());
        assert!(snapshot.value.is_empty());
    }

    #[test]
    fn test_refresh_copies_value() {
        let mut snapshot = Snapshot::select("7");
        assert!(snapshot.refresh(RecordKind::Staff, &Names));
        assert_eq!(snapshot.value, "Awa Diallo");
        assert!(snapshot.is_resolved());
    }

    #[test]
    fn test_refresh_keeps_value_when_source_missing() {
        let mut snapshot = Snapshot::take("9", "Ancien nom");
        assert!(!snapshot.refresh(RecordKind::Staff, &Names));
        assert_eq!(snapshot.value, "Ancien nom");
    }
}
