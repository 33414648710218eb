//! The clinic: one registry per record kind plus configuration.
//!
//! Typed access goes through [`Stored`]; hosts that only know a
//! [`RecordKind`] and JSON payloads use the `*_json` operations.

use serde::Serialize;
use tracing::debug;

use crate::config::ClinicConfig;
use crate::export::{
    document_reference, invoice_pdf, lab_request_html, prescription_html, print,
    purchase_order_pdf, ExportError, ExportResult, HtmlDocument, PdfDocument, PrintOutcome,
    PrintTarget,
};
use crate::models::{
    Analysis, Appointment, Article, Invoice, LeaveRequest, MedicalService, Message, Patient,
    Prescription, PurchaseOrder, RecordKind, StaffMember, Supplier,
};
use crate::registry::{
    Directory, Editor, JsonSeed, ListView, Record, Registry, RegistryResult,
};

/// A record type with a registry in the [`Clinic`].
pub trait Stored: Record + Default {
    fn registry(clinic: &Clinic) -> &Registry<Self>;

    fn registry_mut(clinic: &mut Clinic) -> &mut Registry<Self>;
}

macro_rules! stored {
    ($($record:ty => $field:ident),* $(,)?) => {
        $(
            impl Stored for $record {
                fn registry(clinic: &Clinic) -> &Registry<Self> {
                    &clinic.$field
                }

                fn registry_mut(clinic: &mut Clinic) -> &mut Registry<Self> {
                    &mut clinic.$field
                }
            }
        )*
    };
}

stored! {
    Patient => patients,
    Appointment => appointments,
    MedicalService => services,
    LeaveRequest => leave_requests,
    Analysis => analyses,
    Article => articles,
    PurchaseOrder => purchase_orders,
    Supplier => suppliers,
    Message => messages,
    Prescription => prescriptions,
    StaffMember => staff,
    Invoice => invoices,
}

/// Run `$body` with `$record` aliased to the record type of `$kind`.
macro_rules! with_kind {
    ($kind:expr, $record:ident => $body:expr) => {
        match $kind {
            RecordKind::Patient => {
                type $record = Patient;
                $body
            }
            RecordKind::Appointment => {
                type $record = Appointment;
                $body
            }
            RecordKind::MedicalService => {
                type $record = MedicalService;
                $body
            }
            RecordKind::LeaveRequest => {
                type $record = LeaveRequest;
                $body
            }
            RecordKind::Analysis => {
                type $record = Analysis;
                $body
            }
            RecordKind::Article => {
                type $record = Article;
                $body
            }
            RecordKind::PurchaseOrder => {
                type $record = PurchaseOrder;
                $body
            }
            RecordKind::Supplier => {
                type $record = Supplier;
                $body
            }
            RecordKind::Message => {
                type $record = Message;
                $body
            }
            RecordKind::Prescription => {
                type $record = Prescription;
                $body
            }
            RecordKind::Staff => {
                type $record = StaffMember;
                $body
            }
            RecordKind::Invoice => {
                type $record = Invoice;
                $body
            }
        }
    };
}

/// One rendered list page with records serialized to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonPage {
    pub records: Vec<String>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// All registries of the application.
#[derive(Debug, Clone, Default)]
pub struct Clinic {
    config: ClinicConfig,
    patients: Registry<Patient>,
    appointments: Registry<Appointment>,
    services: Registry<MedicalService>,
    leave_requests: Registry<LeaveRequest>,
    analyses: Registry<Analysis>,
    articles: Registry<Article>,
    purchase_orders: Registry<PurchaseOrder>,
    suppliers: Registry<Supplier>,
    messages: Registry<Message>,
    prescriptions: Registry<Prescription>,
    staff: Registry<StaffMember>,
    invoices: Registry<Invoice>,
}

impl Clinic {
    /// Create a clinic with empty registries.
    pub fn new(config: ClinicConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn registry<R: Stored>(&self) -> &Registry<R> {
        R::registry(self)
    }

    pub fn registry_mut<R: Stored>(&mut self) -> &mut Registry<R> {
        R::registry_mut(self)
    }

    /// Fresh list state for a kind, at its configured page size.
    pub fn view(&self, kind: RecordKind) -> RegistryResult<ListView> {
        ListView::new(self.config.page_size(kind))
    }

    /// Take snapshots, validate and append a record.
    pub fn create<R: Stored>(&mut self, mut record: R) -> RegistryResult<String> {
        record.capture_snapshots(&*self);
        self.registry_mut::<R>().insert(record)
    }

    /// Take snapshots, validate and replace a record.
    pub fn update<R: Stored>(&mut self, mut record: R) -> RegistryResult<()> {
        record.capture_snapshots(&*self);
        self.registry_mut::<R>().replace(record)
    }

    /// Submit an editor dialog, taking snapshots on its draft first.
    pub fn submit<R: Stored>(&mut self, editor: &mut Editor<R>) -> RegistryResult<String> {
        if editor.is_open() {
            editor.draft_mut().capture_snapshots(&*self);
        }
        editor.submit(self.registry_mut::<R>())
    }

    // =========================================================================
    // Kind-erased JSON operations
    // =========================================================================

    pub fn count(&self, kind: RecordKind) -> usize {
        with_kind!(kind, R => self.registry::<R>().len())
    }

    /// Append seed records given as a JSON array.
    pub fn seed_json(&mut self, kind: RecordKind, json: &str) -> RegistryResult<usize> {
        with_kind!(kind, R => self.registry_mut::<R>().load_seed(JsonSeed(json)))
    }

    pub fn get_json(&self, kind: RecordKind, id: &str) -> RegistryResult<String> {
        with_kind!(kind, R => Ok(serde_json::to_string(self.registry::<R>().get(id)?)?))
    }

    /// Render the current page of `view` over the kind's registry.
    pub fn list_json(&self, kind: RecordKind, view: &ListView) -> RegistryResult<JsonPage> {
        with_kind!(kind, R => {
            let page = view.render(self.registry::<R>());
            let records = page
                .records
                .iter()
                .map(|record| serde_json::to_string(record))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(JsonPage {
                records,
                page: page.page,
                total_pages: page.total_pages,
                total_matches: page.total_matches,
            })
        })
    }

    /// Create a record from JSON; returns its id.
    pub fn create_json(&mut self, kind: RecordKind, json: &str) -> RegistryResult<String> {
        with_kind!(kind, R => {
            let record: R = serde_json::from_str(json)?;
            self.create(record)
        })
    }

    /// Fully replace the record `id` with the JSON payload.
    pub fn update_json(&mut self, kind: RecordKind, id: &str, json: &str) -> RegistryResult<()> {
        with_kind!(kind, R => {
            let mut record: R = serde_json::from_str(json)?;
            record.set_id(id.to_string());
            self.update(record)
        })
    }

    /// Delete a record the user already confirmed.
    pub fn delete(&mut self, kind: RecordKind, id: &str) -> RegistryResult<()> {
        with_kind!(kind, R => {
            let registry = self.registry_mut::<R>();
            registry.request_delete(id)?.confirm(registry)?;
            Ok(())
        })
    }

    // =========================================================================
    // Documents
    // =========================================================================

    pub fn document_reference(&self, kind: RecordKind, id: &str) -> ExportResult<String> {
        with_kind!(kind, R => document_reference(self.registry::<R>().get(id)?))
    }

    /// Printable HTML for prescriptions and lab requests.
    pub fn print_document(&self, kind: RecordKind, id: &str) -> ExportResult<HtmlDocument> {
        let clinic = &self.config.clinic;
        match kind {
            RecordKind::Prescription => prescription_html(self.prescriptions.get(id)?, clinic),
            RecordKind::Analysis => lab_request_html(self.analyses.get(id)?, clinic),
            _ => Err(ExportError::Unsupported {
                kind,
                format: "HTML",
            }),
        }
    }

    /// Send a printable document to the host's print surface.
    pub fn print(
        &self,
        kind: RecordKind,
        id: &str,
        target: &mut dyn PrintTarget,
    ) -> ExportResult<PrintOutcome> {
        let document = self.print_document(kind, id)?;
        Ok(print(&document, target))
    }

    /// PDF page tree for invoices and purchase orders.
    pub fn pdf_document(&self, kind: RecordKind, id: &str) -> ExportResult<PdfDocument> {
        match kind {
            RecordKind::Invoice => invoice_pdf(self.invoices.get(id)?, &self.config),
            RecordKind::PurchaseOrder => {
                purchase_order_pdf(self.purchase_orders.get(id)?, &self.config)
            }
            _ => Err(ExportError::Unsupported { kind, format: "PDF" }),
        }
    }
}

impl Directory for Clinic {
    fn lookup_name(&self, kind: RecordKind, id: &str) -> Option<String> {
        let name = with_kind!(kind, R => self.registry::<R>().lookup_name(kind, id));
        if name.is_none() {
            debug!(%kind, %id, "snapshot source not found");
        }
        name
    }
}
