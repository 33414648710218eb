//! Clinic Desk Core Library
//!
//! Shared core of a clinic back-office: patients, appointments, tariffs,
//! staff leave, lab requests, pharmacy stock and orders, messages,
//! prescriptions and invoices.
//!
//! # Architecture
//!
//! ```text
//!   Seed JSON ──► Registry<R> (one per kind, in memory)
//!                     │
//!        ┌────────────┼─────────────────────┐
//!        ▼            ▼                     ▼
//!   ListView     Editor / create       DeleteRequest
//!  (search →     (snapshot capture →   (confirm →
//!   filter →      validate → store)     remove)
//!   paginate)
//!                     │
//!                     ▼
//!              Document export
//!      HTML (print target) / PDF tree (renderer)
//! ```
//!
//! # Core Principle
//!
//! **Cross-record values are snapshots.** A name copied onto an appointment
//! or invoice is never updated when the source record changes.
//!
//! # Modules
//!
//! - [`models`]: Record types (Patient, Appointment, Invoice, etc.)
//! - [`registry`]: Stores, search/filter, pagination, editor dialogs
//! - [`export`]: Printable HTML and PDF page trees
//! - [`config`]: Clinic identity and page sizes
//! - [`clinic`]: All registries behind one facade

pub mod clinic;
pub mod config;
pub mod export;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use clinic::{Clinic, JsonPage, Stored};
pub use config::{ClinicConfig, ClinicIdentity};
pub use export::{HtmlDocument, PdfDocument, PrintOutcome, PrintTarget};
pub use models::{RecordKind, Snapshot};
pub use registry::{Editor, ListView, Query, Record, Registry};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing::info;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<registry::RegistryError> for ClinicError {
    fn from(e: registry::RegistryError) -> Self {
        use registry::RegistryError;
        match e {
            RegistryError::Validation(_) => ClinicError::Validation(e.to_string()),
            RegistryError::NotFound { .. } => ClinicError::NotFound(e.to_string()),
            RegistryError::Json(_) => ClinicError::SerializationError(e.to_string()),
            RegistryError::DuplicateId { .. }
            | RegistryError::InvalidPageSize(_)
            | RegistryError::EditorClosed => ClinicError::InvalidInput(e.to_string()),
        }
    }
}

impl From<export::ExportError> for ClinicError {
    fn from(e: export::ExportError) -> Self {
        match e {
            export::ExportError::Registry(inner) => inner.into(),
            export::ExportError::Incomplete(_) => ClinicError::Validation(e.to_string()),
            _ => ClinicError::ExportError(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for ClinicError {
    fn from(e: config::ConfigError) -> Self {
        ClinicError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(e: serde_json::Error) -> Self {
        ClinicError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::InvalidInput(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a clinic with empty registries. `None` uses the default configuration.
#[uniffi::export]
pub fn open_clinic(config_json: Option<String>) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = match config_json {
        Some(raw) => ClinicConfig::from_json(&raw)?,
        None => ClinicConfig::default(),
    };
    info!(clinic = %config.clinic.name, "clinic opened");
    Ok(ClinicCore::wrap(Clinic::new(config)))
}

/// Open a clinic configured from a JSON file.
#[uniffi::export]
pub fn open_clinic_from_file(path: String) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = ClinicConfig::load(&path)?;
    Ok(ClinicCore::wrap(Clinic::new(config)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    clinic: Arc<Mutex<Clinic>>,
}

impl ClinicCore {
    fn wrap(clinic: Clinic) -> Arc<Self> {
        Arc::new(Self {
            clinic: Arc::new(Mutex::new(clinic)),
        })
    }
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Registry Operations
    // =========================================================================

    /// Append seed records (JSON array) without required-field checks.
    pub fn seed(&self, kind: FfiRecordKind, records_json: String) -> Result<u32, ClinicError> {
        let mut clinic = self.clinic.lock()?;
        let count = clinic.seed_json(kind.into(), &records_json)?;
        Ok(count as u32)
    }

    /// Number of records of a kind.
    pub fn count(&self, kind: FfiRecordKind) -> Result<u32, ClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.count(kind.into()) as u32)
    }

    /// Search, filter and paginate a list page.
    pub fn list(
        &self,
        kind: FfiRecordKind,
        request: FfiListRequest,
    ) -> Result<FfiListPage, ClinicError> {
        let clinic = self.clinic.lock()?;
        let kind = kind.into();

        let mut view = clinic.view(kind)?;
        if let Some(size) = request.page_size {
            view.resize(size as usize)?;
        }
        view.search(request.search);
        for filter in request.filters {
            view.filter_by(filter.field, filter.value.as_str());
        }
        view.request_page(request.page as usize);

        Ok(clinic.list_json(kind, &view)?.into())
    }

    /// Get a record as JSON.
    pub fn get(&self, kind: FfiRecordKind, id: String) -> Result<String, ClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.get_json(kind.into(), &id)?)
    }

    /// Create a record from JSON. Returns the new id.
    pub fn create(&self, kind: FfiRecordKind, record_json: String) -> Result<String, ClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.create_json(kind.into(), &record_json)?)
    }

    /// Replace a record with a JSON payload.
    pub fn update(
        &self,
        kind: FfiRecordKind,
        id: String,
        record_json: String,
    ) -> Result<(), ClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.update_json(kind.into(), &id, &record_json)?)
    }

    /// Delete a record. The host asks for confirmation before calling this.
    pub fn delete(&self, kind: FfiRecordKind, id: String) -> Result<(), ClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.delete(kind.into(), &id)?)
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Self-contained printable HTML for a prescription or lab request.
    pub fn print_html(&self, kind: FfiRecordKind, id: String) -> Result<String, ClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.print_document(kind.into(), &id)?.to_html())
    }

    /// PDF page tree (JSON) for an invoice or purchase order.
    pub fn pdf_document_json(&self, kind: FfiRecordKind, id: String) -> Result<String, ClinicError> {
        let clinic = self.clinic.lock()?;
        let document = clinic.pdf_document(kind.into(), &id)?;
        info!(file = %document.file_name, "pdf document exported");
        Ok(document.to_json()?)
    }

    /// Short content digest printed on a record's documents.
    pub fn document_reference(&self, kind: FfiRecordKind, id: String) -> Result<String, ClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.document_reference(kind.into(), &id)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiRecordKind {
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

impl From<FfiRecordKind> for RecordKind {
    fn from(kind: FfiRecordKind) -> Self {
        match kind {
            FfiRecordKind::Patient => RecordKind::Patient,
            FfiRecordKind::Appointment => RecordKind::Appointment,
            FfiRecordKind::MedicalService => RecordKind::MedicalService,
            FfiRecordKind::LeaveRequest => RecordKind::LeaveRequest,
            FfiRecordKind::Analysis => RecordKind::Analysis,
            FfiRecordKind::Article => RecordKind::Article,
            FfiRecordKind::PurchaseOrder => RecordKind::PurchaseOrder,
            FfiRecordKind::Supplier => RecordKind::Supplier,
            FfiRecordKind::Message => RecordKind::Message,
            FfiRecordKind::Prescription => RecordKind::Prescription,
            FfiRecordKind::Staff => RecordKind::Staff,
            FfiRecordKind::Invoice => RecordKind::Invoice,
        }
    }
}

/// One categorical filter; value `"all"` disables it.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilter {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiListRequest {
    /// Free-text search; empty matches everything
    pub search: String,
    pub filters: Vec<FfiFilter>,
    /// 1-based page, clamped to the available range
    pub page: u32,
    /// Overrides the configured page size
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiListPage {
    pub records_json: Vec<String>,
    pub page: u32,
    pub total_pages: u32,
    pub total_matches: u32,
}

impl From<JsonPage> for FfiListPage {
    fn from(page: JsonPage) -> Self {
        Self {
            records_json: page.records,
            page: page.page as u32,
            total_pages: page.total_pages as u32,
            total_matches: page.total_matches as u32,
        }
    }
}
