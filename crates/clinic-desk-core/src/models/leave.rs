//! Staff leave requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::snapshot::refresh_optional;
use super::{date, snapshot, snapshot_source, text, RecordKind, Snapshot};
use crate::registry::{Directory, Record};

/// Kind of leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Maternity,
    Training,
    Other,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Maternity => "maternity",
            LeaveType::Training => "training",
            LeaveType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Congé annuel",
            LeaveType::Sick => "Congé maladie",
            LeaveType::Maternity => "Congé maternité",
            LeaveType::Training => "Formation",
            LeaveType::Other => "Autre",
        }
    }
}

/// Leave request status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "En attente",
            LeaveStatus::Approved => "Approuvé",
            LeaveStatus::Rejected => "Refusé",
        }
    }
}

/// A leave request.
///
/// `staff` and `replacement` are snapshots of staff display names taken when
/// the request is saved; renaming a staff member later does not touch
/// existing requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaveRequest {
    /// Registry id
    pub id: String,
    /// Requesting staff member
    pub staff: Option<Snapshot>,
    pub leave_type: Option<LeaveType>,
    /// First day off
    pub start_date: Option<NaiveDate>,
    /// Last day off (inclusive)
    pub end_date: Option<NaiveDate>,
    pub reason: String,
    /// Colleague covering the absence
    pub replacement: Option<Snapshot>,
    pub status: LeaveStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Select the colleague covering the absence; the name is copied on save.
    pub fn select_replacement(&mut self, staff_id: &str) {
        self.replacement = Some(Snapshot::select(staff_id));
    }

    /// Number of calendar days requested, both ends included.
    pub fn days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    pub fn set_status(&mut self, status: LeaveStatus) {
        self.status = status;
    }
}

impl Record for LeaveRequest {
    const KIND: RecordKind = RecordKind::LeaveRequest;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "staff_id" => snapshot_source(&self.staff),
            "staff_name" => snapshot(&self.staff),
            "leave_type" => self.leave_type.map(|t| t.as_str().to_string()),
            "start_date" => date(&self.start_date),
            "end_date" => date(&self.end_date),
            "days" => self.days().map(|d| d.to_string()),
            "reason" => text(&self.reason),
            "replacement_id" => snapshot_source(&self.replacement),
            "replacement_name" => snapshot(&self.replacement),
            "status" => text(self.status.as_str()),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["staff_name", "leave_type", "start_date", "end_date"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["staff_name", "reason", "replacement_name"]
    }

    fn display_name(&self) -> String {
        snapshot(&self.staff).unwrap_or_default()
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.staff, RecordKind::Staff, directory);
        refresh_optional(&mut self.replacement, RecordKind::Staff, directory);
        if self.submitted_at.is_none() {
            self.submitted_at = Some(Utc::now());
        }
    }
}
