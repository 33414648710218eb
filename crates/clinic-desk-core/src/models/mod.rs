//! Domain records for every clinic list page.
//!
//! Each type implements [`Record`](crate::registry::Record) so it can be
//! stored, searched, paginated, edited and exported by the shared list
//! machinery.

mod appointment;
mod invoice;
mod lab;
mod leave;
mod message;
mod patient;
mod pharmacy;
mod prescription;
mod snapshot;
mod staff;
mod tariff;

pub use appointment::*;
pub use invoice::*;
pub use lab::*;
pub use leave::*;
pub use message::*;
pub use patient::*;
pub use pharmacy::*;
pub use prescription::*;
pub use snapshot::*;
pub use staff::*;
pub use tariff::*;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in field views, filters and documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of record held by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Patient,
    Appointment,
    MedicalService,
    LeaveRequest,
    Analysis,
    Article,
    PurchaseOrder,
    Supplier,
    Message,
    Prescription,
    Staff,
    Invoice,
}

impl RecordKind {
    /// Every kind, in menu order.
    pub const ALL: [RecordKind; 12] = [
        RecordKind::Patient,
        RecordKind::Appointment,
        RecordKind::MedicalService,
        RecordKind::LeaveRequest,
        RecordKind::Analysis,
        RecordKind::Article,
        RecordKind::PurchaseOrder,
        RecordKind::Supplier,
        RecordKind::Message,
        RecordKind::Prescription,
        RecordKind::Staff,
        RecordKind::Invoice,
    ];

    /// Stable snake_case key.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Patient => "patient",
            RecordKind::Appointment => "appointment",
            RecordKind::MedicalService => "medical_service",
            RecordKind::LeaveRequest => "leave_request",
            RecordKind::Analysis => "analysis",
            RecordKind::Article => "article",
            RecordKind::PurchaseOrder => "purchase_order",
            RecordKind::Supplier => "supplier",
            RecordKind::Message => "message",
            RecordKind::Prescription => "prescription",
            RecordKind::Staff => "staff",
            RecordKind::Invoice => "invoice",
        }
    }

    /// French page title.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Patient => "Patients",
            RecordKind::Appointment => "Rendez-vous",
            RecordKind::MedicalService => "Tarifs",
            RecordKind::LeaveRequest => "Congés",
            RecordKind::Analysis => "Analyses",
            RecordKind::Article => "Stock",
            RecordKind::PurchaseOrder => "Commandes",
            RecordKind::Supplier => "Fournisseurs",
            RecordKind::Message => "Messages",
            RecordKind::Prescription => "Ordonnances",
            RecordKind::Staff => "Personnel",
            RecordKind::Invoice => "Factures",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Field view helpers shared by the record impls.

pub(crate) fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub(crate) fn date(value: &Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format(DATE_FORMAT).to_string())
}

pub(crate) fn snapshot(value: &Option<Snapshot>) -> Option<String> {
    value.as_ref().map(|s| s.value.clone())
}

pub(crate) fn snapshot_source(value: &Option<Snapshot>) -> Option<String> {
    value.as_ref().map(|s| s.source_id.clone())
}

/// Checked sum of line amounts; `None` if any line or the sum overflows.
pub(crate) fn sum_amounts(mut amounts: impl Iterator<Item = Option<u64>>) -> Option<u64> {
    amounts.try_fold(0u64, |sum, amount| sum.checked_add(amount?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keys_are_snake_case() {
        assert_eq!(RecordKind::MedicalService.as_str(), "medical_service");
        assert_eq!(
            serde_json::to_string(&RecordKind::LeaveRequest).unwrap(),
            "\"leave_request\""
        );
        assert_eq!(RecordKind::PurchaseOrder.to_string(), "purchase_order");
    }

    #[test]
    fn test_all_kinds_distinct() {
        let keys: std::collections::HashSet<_> =
            RecordKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), RecordKind::ALL.len());
    }
}
