//! Patient invoices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::snapshot::refresh_optional;
use super::{
    date, snapshot, snapshot_source, sum_amounts, text, MedicalService, RecordKind, Snapshot,
};
use crate::registry::{Directory, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Impayée",
            InvoiceStatus::Paid => "Payée",
            InvoiceStatus::Cancelled => "Annulée",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
    Card,
    Insurance,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Card => "card",
            PaymentMethod::Insurance => "insurance",
            PaymentMethod::Transfer => "transfer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Espèces",
            PaymentMethod::MobileMoney => "Mobile Money",
            PaymentMethod::Card => "Carte bancaire",
            PaymentMethod::Insurance => "Assurance",
            PaymentMethod::Transfer => "Virement",
        }
    }
}

/// One billed service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InvoiceLine {
    /// Service label copied from the tariff registry
    pub service: Snapshot,
    pub quantity: u32,
    /// Price copied from the tariff at billing time
    pub unit_price: u64,
}

impl InvoiceLine {
    /// Bill a tariff at its current price.
    pub fn from_service(service: &MedicalService, quantity: u32) -> Self {
        Self {
            service: Snapshot::take(service.id.clone(), service.label.clone()),
            quantity,
            unit_price: service.price.unwrap_or(0),
        }
    }

    /// Line amount, `None` when it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        u64::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// An invoice (facture) for one patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Invoice {
    /// Registry id, printed as the invoice number
    pub id: String,
    pub patient: Option<Snapshot>,
    pub issued_on: Option<NaiveDate>,
    pub lines: Vec<InvoiceLine>,
    /// Share of the total covered by the insurer, in percent (capped at 100)
    pub coverage_percent: u8,
    pub insurer: Option<String>,
    pub status: InvoiceStatus,
    pub payment_method: Option<PaymentMethod>,
    pub paid_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Invoice {
    /// Sum of the lines, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        sum_amounts(self.lines.iter().map(InvoiceLine::total))
    }

    /// Amount taken over by the insurer.
    pub fn covered_amount(&self) -> Option<u64> {
        let total = u128::from(self.total()?);
        let covered = total * u128::from(self.coverage_percent.min(100)) / 100;
        u64::try_from(covered).ok()
    }

    /// Amount left for the patient.
    pub fn amount_due(&self) -> Option<u64> {
        self.total()?.checked_sub(self.covered_amount()?)
    }

    pub fn mark_paid(&mut self, method: PaymentMethod, on: NaiveDate) {
        self.status = InvoiceStatus::Paid;
        self.payment_method = Some(method);
        self.paid_on = Some(on);
    }
}

impl Record for Invoice {
    const KIND: RecordKind = RecordKind::Invoice;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "patient_id" => snapshot_source(&self.patient),
            "patient_name" => snapshot(&self.patient),
            "issued_on" => date(&self.issued_on),
            "lines" => Some(
                self.lines
                    .iter()
                    .map(|line| line.service.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            "total" => self.total().map(|v| v.to_string()),
            "coverage_percent" => Some(self.coverage_percent.to_string()),
            "insurer" => self.insurer.clone(),
            "amount_due" => self.amount_due().map(|v| v.to_string()),
            "status" => text(self.status.as_str()),
            "payment_method" => self.payment_method.map(|m| m.as_str().to_string()),
            "paid_on" => date(&self.paid_on),
            "notes" => self.notes.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["patient_name", "issued_on", "lines"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["id", "patient_name"]
    }

    fn invalid_fields(&self) -> Vec<&'static str> {
        if self.total().is_none() {
            vec!["total"]
        } else {
            Vec::new()
        }
    }

    fn display_name(&self) -> String {
        format!("Facture {}", self.id)
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.patient, RecordKind::Patient, directory);
        for line in &mut self.lines {
            line.service.refresh(RecordKind::MedicalService, directory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_invoice() -> Invoice {
        let consultation = MedicalService::new("CONS".into(), "Consultation".into(), 10_000);
        let nfs = MedicalService::new("NFS".into(), "Numération".into(), 4_500);
        Invoice {
            lines: vec![
                InvoiceLine::from_service(&consultation, 1),
                InvoiceLine::from_service(&nfs, 2),
            ],
            coverage_percent: 80,
            ..Invoice::default()
        }
    }

    #[test]
    fn test_totals() {
        let invoice = make_invoice();
        assert_eq!(invoice.total(), Some(19_000));
        assert_eq!(invoice.covered_amount(), Some(15_200));
        assert_eq!(invoice.amount_due(), Some(3_800));
    }

    #[test]
    fn test_coverage_capped() {
        let mut invoice = make_invoice();
        invoice.coverage_percent = 150;
        assert_eq!(invoice.amount_due(), Some(0));
    }

    #[test]
    fn test_overflowing_total_is_invalid() {
        let mut invoice = make_invoice();
        invoice.lines[0].quantity = 3;
        invoice.lines[0].unit_price = i64::MAX as u64;

        assert_eq!(invoice.lines[0].total(), None);
        assert_eq!(invoice.total(), None);
        assert_eq!(invoice.amount_due(), None);
        assert_eq!(invoice.field("total"), None);
        assert_eq!(invoice.invalid_fields(), vec!["total"]);

        // Each line fits, the sum does not
        invoice.lines[0].quantity = 1;
        invoice.lines[1].quantity = 1;
        invoice.lines[1].unit_price = u64::MAX;
        assert_eq!(invoice.total(), None);
    }

    #[test]
    fn test_full_coverage_of_largest_total() {
        let invoice = Invoice {
            lines: vec![InvoiceLine {
                quantity: 1,
                unit_price: u64::MAX,
                ..InvoiceLine::default()
            }],
            coverage_percent: 100,
            ..Invoice::default()
        };
        assert_eq!(invoice.covered_amount(), Some(u64::MAX));
        assert_eq!(invoice.amount_due(), Some(0));
    }

    #[test]
    fn test_mark_paid() {
        let mut invoice = make_invoice();
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        invoice.mark_paid(PaymentMethod::MobileMoney, day);
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.field("payment_method").as_deref(), Some("mobile_money"));
        assert_eq!(invoice.field("paid_on").as_deref(), Some("2024-04-02"));
    }
}
