//! Purchase order (bon de commande) PDF.

use tracing::info;

use super::pdf::{footer_nodes, letterhead_nodes};
use super::{
    document_reference, format_amount, or_not_specified, Align, ExportResult, Node, PdfDocument,
    PdfPage, TextStyle, NOT_SPECIFIED,
};
use crate::config::ClinicConfig;
use crate::models::PurchaseOrder;
use crate::registry::{validate, Record};

/// Build the page tree of a complete purchase order.
pub fn purchase_order_pdf(
    order: &PurchaseOrder,
    config: &ClinicConfig,
) -> ExportResult<PdfDocument> {
    validate(order)?;
    let reference = document_reference(order)?;
    // Totals are in range once validated; the fallback is never printed
    let amount = |value: Option<u64>| {
        value.map_or_else(
            || NOT_SPECIFIED.to_string(),
            |v| format_amount(v, &config.currency),
        )
    };
    let field = |name: &str| order.field(name).unwrap_or_default();

    let mut nodes = letterhead_nodes(&config.clinic);

    nodes.push(Node::styled(
        format!("BON DE COMMANDE N° {}", order.id),
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
                    Node::text(format!(
                        "Fournisseur : {}",
                        or_not_specified(&field("supplier_name"))
                    )),
                    Node::text(format!("Statut : {}", order.status.label())),
                ],
            },
            Node::Column {
                children: vec![
                    Node::text(format!(
                        "Date de commande : {}",
                        or_not_specified(&field("order_date"))
                    )),
                    Node::text(format!(
                        "Livraison prévue : {}",
                        or_not_specified(&field("expected_date"))
                    )),
                ],
            },
        ],
    });
    nodes.push(Node::Spacer { height: 12.0 });

    nodes.push(Node::Table {
        headers: vec![
            "Article".into(),
            "Quantité".into(),
            "Prix unitaire".into(),
            "Montant".into(),
        ],
        rows: order
            .lines
            .iter()
            .map(|line| {
                vec![
                    or_not_specified(&line.article.value).to_string(),
                    line.quantity.to_string(),
                    amount(Some(line.unit_price)),
                    amount(line.total()),
                ]
            })
            .collect(),
        widths: vec![4.0, 1.0, 2.0, 2.0],
    });

    nodes.push(Node::styled(
        format!("Total commande : {}", amount(order.total())),
        TextStyle {
            bold: true,
            align: Align::Right,
            ..TextStyle::default()
        },
    ));

    nodes.push(Node::Spacer { height: 8.0 });
    nodes.push(Node::text(format!(
        "Remarques : {}",
        or_not_specified(order.notes.as_deref().unwrap_or_default())
    )));
    nodes.push(Node::Spacer { height: 32.0 });
    nodes.push(Node::styled(
        "Visa du responsable",
        TextStyle {
            align: Align::Right,
            ..TextStyle::default()
        },
    ));

    nodes.extend(footer_nodes(&config.clinic, &reference));

    info!(id = %order.id, %reference, "purchase order document built");
    Ok(PdfDocument {
        title: format!("Bon de commande {}", order.id),
        author: config.clinic.name.clone(),
        file_name: format!("bon-de-commande-{}.pdf", order.id),
        pages: vec![PdfPage::a4(nodes)],
    })
}
