//! Invoice (facture) PDF.

use tracing::info;

use super::pdf::{footer_nodes, letterhead_nodes};
use super::{
    document_reference, format_amount, or_not_specified, Align, ExportResult, Node, PdfDocument,
    PdfPage, TextStyle, NOT_SPECIFIED,
};
use crate::config::ClinicConfig;
use crate::models::Invoice;
use crate::registry::{validate, Record};

/// Build the page tree of a complete invoice.
pub fn invoice_pdf(invoice: &Invoice, config: &ClinicConfig) -> ExportResult<PdfDocument> {
    validate(invoice)?;
    let reference = document_reference(invoice)?;
    // Totals are in range once validated; the fallback is never printed
    let amount = |value: Option<u64>| {
        value.map_or_else(
            || NOT_SPECIFIED.to_string(),
            |v| format_amount(v, &config.currency),
        )
    };
    let field = |name: &str| invoice.field(name).unwrap_or_default();

    let mut nodes = letterhead_nodes(&config.clinic);

    nodes.push(Node::styled(
        format!("FACTURE N° {}", invoice.id),
        TextStyle {
            size: 16.0,
            bold: true,
            align: Align::Center,
            ..TextStyle::default()
        },
    ));
    nodes.push(Node::Spacer { height: 12.0 });

    nodes.push(Node::Row {
        children: vec![
            Node::Column {
                children: vec![
                    Node::text(format!("Patient : {}", or_not_specified(&field("patient_name")))),
                    Node::text(format!("Date : {}", or_not_specified(&field("issued_on")))),
                ],
            },
            Node::Column {
                children: vec![
                    Node::text(format!("Statut : {}", invoice.status.label())),
                    Node::text(format!(
                        "Mode de paiement : {}",
                        invoice.payment_method.map_or(NOT_SPECIFIED, |m| m.label())
                    )),
                ],
            },
        ],
    });
    nodes.push(Node::Spacer { height: 12.0 });

    nodes.push(Node::Table {
        headers: vec![
            "Prestation".into(),
            "Qté".into(),
            "Prix unitaire".into(),
            "Montant".into(),
        ],
        rows: invoice
            .lines
            .iter()
            .map(|line| {
                vec![
                    or_not_specified(&line.service.value).to_string(),
                    line.quantity.to_string(),
                    amount(Some(line.unit_price)),
                    amount(line.total()),
                ]
            })
            .collect(),
        widths: vec![4.0, 1.0, 2.0, 2.0],
    });

    let right = |content: String, bold: bool| {
        Node::styled(
            content,
            TextStyle {
                bold,
                align: Align::Right,
                ..TextStyle::default()
            },
        )
    };
    let mut totals = vec![right(format!("Total : {}", amount(invoice.total())), false)];
    if invoice.coverage_percent > 0 {
        totals.push(right(
            format!(
                "Prise en charge {} ({} %) : {}",
                or_not_specified(invoice.insurer.as_deref().unwrap_or_default()),
                invoice.coverage_percent.min(100),
                amount(invoice.covered_amount())
            ),
            false,
        ));
    }
    totals.push(right(format!("Net à payer : {}", amount(invoice.amount_due())), true));
    nodes.push(Node::Column { children: totals });

    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        nodes.push(Node::Spacer { height: 8.0 });
        nodes.push(Node::text(format!("Remarques : {}", notes)));
    }

    nodes.extend(footer_nodes(&config.clinic, &reference));

    info!(id = %invoice.id, %reference, "invoice document built");
    Ok(PdfDocument {
        title: format!("Facture {}", invoice.id),
        author: config.clinic.name.clone(),
        file_name: format!("facture-{}.pdf", invoice.id),
        pages: vec![PdfPage::a4(nodes)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;
    use crate::models::{InvoiceLine, MedicalService, Snapshot};
    use chrono::NaiveDate;

    fn invoice() -> Invoice {
        let consultation = MedicalService::new("CONS".into(), "Consultation".into(), 10_000);
        let nfs = MedicalService::new("NFS".into(), "Numération".into(), 4_500);
        Invoice {
            id: "F-2024-001".into(),
            patient: Some(Snapshot::take("p1", "Traoré Awa")),
            issued_on: NaiveDate::from_ymd_opt(2024, 4, 2),
            lines: vec![
                InvoiceLine::from_service(&consultation, 1),
                InvoiceLine::from_service(&nfs, 2),
            ],
            coverage_percent: 80,
            insurer: Some("MUGEF-CI".into()),
            ..Invoice::default()
        }
    }

    #[test]
    fn test_invoice_tree() {
        let document = invoice_pdf(&invoice(), &ClinicConfig::default()).unwrap();
        let texts = document.texts();

        assert_eq!(document.file_name, "facture-F-2024-001.pdf");
        assert!(texts.contains(&"FACTURE N° F-2024-001"));
        assert!(texts.contains(&"Patient : Traoré Awa"));
        assert!(texts.contains(&"Numération"));
        assert!(texts.contains(&"9 000 FCFA"));
        assert!(texts.contains(&"Total : 19 000 FCFA"));
        assert!(texts.contains(&"Prise en charge MUGEF-CI (80 %) : 15 200 FCFA"));
        assert!(texts.contains(&"Net à payer : 3 800 FCFA"));
        assert!(texts.contains(&"Mode de paiement : Non spécifié"));
    }

    #[test]
    fn test_no_coverage_line_without_coverage() {
        let mut invoice = invoice();
        invoice.coverage_percent = 0;
        let document = invoice_pdf(&invoice, &ClinicConfig::default()).unwrap();
        assert!(!document.texts().iter().any(|t| t.starts_with("Prise en charge")));
        assert!(document.texts().contains(&"Net à payer : 19 000 FCFA"));
    }

    #[test]
    fn test_incomplete_invoice_rejected() {
        let mut invoice = invoice();
        invoice.lines.clear();
        let err = invoice_pdf(&invoice, &ClinicConfig::default()).unwrap_err();
        match err {
            ExportError::Incomplete(e) => assert_eq!(e.missing, vec!["lines"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflowing_invoice_rejected() {
        let mut invoice = invoice();
        invoice.lines[0].quantity = 3;
        invoice.lines[0].unit_price = i64::MAX as u64;

        match invoice_pdf(&invoice, &ClinicConfig::default()).unwrap_err() {
            ExportError::Incomplete(e) => {
                assert!(e.missing.is_empty());
                assert_eq!(e.invalid, vec!["total"]);
                assert_eq!(e.to_string(), "Valeurs invalides : total");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_tree_serializes_for_renderer() {
        let json = invoice_pdf(&invoice(), &ClinicConfig::default())
            .unwrap()
            .to_json()
            .unwrap();
        assert!(json.contains(r#""type":"table""#));
    }
}
