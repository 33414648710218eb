//! Staff directory.

use serde::{Deserialize, Serialize};

use super::{text, RecordKind};
use crate::registry::Record;

/// A member of staff. Source of the names copied onto leave requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StaffMember {
    /// Registry id
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    /// Job title (e.g., "Infirmier", "Médecin")
    pub role: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl StaffMember {
    pub fn new(last_name: String, first_name: String, role: String) -> Self {
        Self {
            last_name,
            first_name,
            role,
            ..Self::default()
        }
    }
}

impl Record for StaffMember {
    const KIND: RecordKind = RecordKind::Staff;

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
            "display_name" => Some(self.display_name()),
            "role" => text(&self.role),
            "department" => self.department.clone(),
            "phone" => self.phone.clone(),
            "email" => self.email.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["last_name", "first_name", "role"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["last_name", "first_name", "role", "department"]
    }

    /// Given names first, as printed on schedules.
    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let staff = StaffMember::new("Diallo".into(), "Awa".into(), "Infirmière".into());
        assert_eq!(staff.display_name(), "Awa Diallo");
        assert_eq!(staff.field("display_name").as_deref(), Some("Awa Diallo"));
    }
}
