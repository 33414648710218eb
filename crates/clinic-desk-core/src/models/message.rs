//! Internal messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{text, RecordKind};
use crate::registry::Record;

/// A message between staff members.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Message {
    /// Registry id
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub read: bool,
}

impl Message {
    pub fn new(sender: String, recipient: String, subject: String, body: String) -> Self {
        Self {
            sender,
            recipient,
            subject,
            body,
            sent_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

impl Record for Message {
    const KIND: RecordKind = RecordKind::Message;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "sender" => text(&self.sender),
            "recipient" => text(&self.recipient),
            "subject" => text(&self.subject),
            "body" => text(&self.body),
            "sent_at" => self.sent_at.map(|t| t.to_rfc3339()),
            "status" => text(if self.read { "read" } else { "unread" }),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["recipient", "subject", "body"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["sender", "recipient", "subject"]
    }

    fn display_name(&self) -> String {
        self.subject.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_status() {
        let mut message = Message::new(
            "Accueil".into(),
            "Dr Bamba".into(),
            "Résultats".into(),
            "Les résultats sont arrivés.".into(),
        );
        assert_eq!(message.field("status").as_deref(), Some("unread"));
        message.mark_read();
        assert_eq!(message.field("status").as_deref(), Some("read"));
    }
}
