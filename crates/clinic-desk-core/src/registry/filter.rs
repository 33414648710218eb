//! Free-text search and categorical filters.

use serde::{Deserialize, Serialize};

use super::Record;

/// UI sentinel meaning "no restriction" in a categorical filter.
pub const ALL: &str = "all";

/// Expected value of a categorical filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    #[default]
    All,
    Equals(String),
}

impl FilterValue {
    /// Parse a select-box value; `"all"` and `""` mean no restriction.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            FilterValue::All
        } else {
            FilterValue::Equals(value.to_string())
        }
    }

    /// Exact comparison against a record's field value.
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Equals(expected) => actual == Some(expected.as_str()),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::parse(value)
    }
}

/// Search criteria for a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
    filters: Vec<(String, FilterValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query with search text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            filters: Vec::new(),
        }
    }

    /// Builder form of [`Query::set_filter`].
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set_filter(field, value);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Set or replace the filter on a field.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        let field = field.into();
        let value = value.into();
        match self.filters.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.filters.push((field, value)),
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn search_text(&self) -> &str {
        &self.text
    }

    pub fn filter_value(&self, field: &str) -> &FilterValue {
        self.filters
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
            .unwrap_or(&FilterValue::All)
    }

    /// Check if the query lets every record through.
    pub fn is_unrestricted(&self) -> bool {
        self.text.trim().is_empty() && self.filters.iter().all(|(_, v)| *v == FilterValue::All)
    }

    /// Check a single record against the query.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_with(record, &self.needle())
    }

    /// Order-preserving subsequence of matching records.
    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        let needle = self.needle();
        records
            .iter()
            .filter(|record| self.matches_with(*record, &needle))
            .collect()
    }

    fn needle(&self) -> String {
        self.text.trim().to_lowercase()
    }

    fn matches_with<R: Record>(&self, record: &R, needle: &str) -> bool {
        let text_match = needle.is_empty()
            || R::searchable_fields().iter().any(|name| {
                record
                    .field(name)
                    .is_some_and(|value| value.to_lowercase().contains(needle))
            });

        text_match
            && self
                .filters
                .iter()
                .all(|(field, value)| value.matches(record.field(field).as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, PatientStatus};

    fn patients() -> Vec<Patient> {
        let mut traore = Patient::new("Traoré".into(), "Awa".into(), "0701".into());
        traore.id = "1".into();

        let mut kouame = Patient::new("Kouamé".into(), "Yao".into(), "0502".into());
        kouame.id = "2".into();
        kouame.status = PatientStatus::Inactive;

        vec![traore, kouame]
    }

    #[test]
    fn test_case_insensitive_substring() {
        let records = patients();
        let result = Query::text("koua").apply(&records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");

        let result = Query::text("TRAOR").apply(&records);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_empty_and_whitespace_query_match_all() {
        let records = patients();
        assert_eq!(Query::text("").apply(&records).len(), 2);
        assert_eq!(Query::text("   ").apply(&records).len(), 2);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<Patient> = Vec::new();
        assert!(Query::text("koua").apply(&records).is_empty());
    }

    #[test]
    fn test_categorical_filter() {
        let records = patients();

        let inactive = Query::new().with_filter("status", "inactive").apply(&records);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, "2");

        let all = Query::new().with_filter("status", ALL).apply(&records);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_text_and_filter_combine() {
        let records = patients();
        let query = Query::text("koua").with_filter("status", "active");
        assert!(query.apply(&records).is_empty());
    }

    #[test]
    fn test_filter_on_absent_field_never_matches() {
        let records = patients();
        let query = Query::new().with_filter("sex", "female");
        assert!(query.apply(&records).is_empty());
    }

    #[test]
    fn test_set_filter_replaces() {
        let mut query = Query::new();
        query.set_filter("status", "active");
        query.set_filter("status", "all");
        assert_eq!(query.filter_value("status"), &FilterValue::All);
        assert!(query.is_unrestricted());
    }

    #[test]
    fn test_searches_only_designated_fields() {
        let mut records = patients();
        records[0].notes = Some("kouassi".into());
        // notes is not searchable
        assert_eq!(Query::text("kouassi").apply(&records).len(), 0);
    }
}
