//! Printable HTML and declarative PDF documents for single records.
//!
//! Exporters never mutate the record they are given. Empty fields print as
//! [`NOT_SPECIFIED`] or, for list-like clinical fields, [`NONE_LISTED`].

mod html;
mod invoice;
mod lab_request;
mod pdf;
mod prescription;
mod purchase_order;
mod reference;
mod template;

pub use html::*;
pub use invoice::*;
pub use lab_request::*;
pub use pdf::*;
pub use prescription::*;
pub use purchase_order::*;
pub use reference::*;
pub use template::*;

use thiserror::Error;

use crate::models::RecordKind;
use crate::registry::{RegistryError, ValidationError};

/// Fallback for an empty field.
pub const NOT_SPECIFIED: &str = "Non spécifié";

/// Fallback for an empty list-like field (allergies, antecedents).
pub const NONE_LISTED: &str = "Aucune";

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Document incomplete: {0}")]
    Incomplete(#[from] ValidationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("No {format} document for {kind}")]
    Unsupported { kind: RecordKind, format: &'static str },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Renderer error: {0}")]
    Renderer(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

pub(crate) fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Format an amount with space-separated thousands and a currency suffix.
pub fn format_amount(amount: u64, currency: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if currency.is_empty() {
        grouped
    } else {
        format!("{} {}", grouped, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0, "FCFA"), "0 FCFA");
        assert_eq!(format_amount(950, "FCFA"), "950 FCFA");
        assert_eq!(format_amount(10_000, "FCFA"), "10 000 FCFA");
        assert_eq!(format_amount(1_234_567, ""), "1 234 567");
    }
}
