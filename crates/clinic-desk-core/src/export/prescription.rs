//! Printable prescription (ordonnance).

use super::html::{letterhead, table};
use super::{document_reference, escape_html, Escape, ExportResult, HtmlDocument, Template, NONE_LISTED};
use crate::config::ClinicIdentity;
use crate::models::Prescription;

const BODY: &str = r#"<h2>Ordonnance médicale</h2>
<div class="meta">
<p><strong>Patient :</strong> {{patient_name}}</p>
<p><strong>Date :</strong> {{date}}</p>
</div>
<p><strong>Prescripteur :</strong> {{prescriber}}</p>
<p><strong>Diagnostic :</strong> {{diagnosis}}</p>
<p><strong>Allergies :</strong> {{allergies|Aucune}}</p>
"#;

const NOTES: &str = r#"<p><strong>Remarques :</strong> {{notes|Aucune}}</p>
<div class="signature">Signature et cachet du prescripteur</div>
"#;

/// Render a prescription as a printable page.
///
/// Incomplete prescriptions still print, with placeholders for empty fields.
pub fn prescription_html(
    prescription: &Prescription,
    clinic: &ClinicIdentity,
) -> ExportResult<HtmlDocument> {
    let reference = document_reference(prescription)?;

    let mut body = letterhead(clinic);
    body.push('\n');
    body.push_str(&Template::parse(BODY).render_record(prescription, clinic, Escape::Html));

    if prescription.medications.is_empty() {
        body.push_str(&format!("<p><strong>Traitement :</strong> {}</p>\n", NONE_LISTED));
    } else {
        let rows: Vec<Vec<String>> = prescription
            .medications
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    m.dosage.clone(),
                    m.frequency.clone(),
                    m.duration.clone(),
                    m.instructions.clone().unwrap_or_default(),
                ]
            })
            .collect();
        body.push_str(&table(
            &["Médicament", "Posologie", "Fréquence", "Durée", "Instructions"],
            &rows,
        ));
        body.push('\n');
    }

    body.push_str(&Template::parse(NOTES).render_record(prescription, clinic, Escape::Html));
    body.push_str(&format!("<footer>Réf. {}</footer>", escape_html(&reference)));

    Ok(HtmlDocument::new(
        format!("Ordonnance {}", prescription.id),
        body,
    ))
}
