//! Printable lab request (bon d'analyse).

use super::html::letterhead;
use super::{document_reference, escape_html, Escape, ExportResult, HtmlDocument, Template, NONE_LISTED};
use crate::config::ClinicIdentity;
use crate::models::Analysis;

const BODY: &str = r#"<h2>Demande d'analyses</h2>
<div class="meta">
<p><strong>Patient :</strong> {{patient_name}}</p>
<p><strong>Date :</strong> {{requested_on}}</p>
</div>
<p><strong>Prescripteur :</strong> {{prescriber}}</p>
<p><strong>Urgence :</strong> {{urgency_label}}</p>
<p><strong>Prélèvement :</strong> {{sample_type}}</p>
<p><strong>À jeun :</strong> {{fasting}}</p>
<p><strong>Renseignements cliniques :</strong> {{clinical_info}}</p>
"#;

/// Render a lab request as a printable page.
pub fn lab_request_html(analysis: &Analysis, clinic: &ClinicIdentity) -> ExportResult<HtmlDocument> {
    let reference = document_reference(analysis)?;

    let mut body = letterhead(clinic);
    body.push('\n');
    body.push_str(&Template::parse(BODY).render_record_with(
        analysis,
        clinic,
        |key| (key == "urgency_label").then(|| analysis.urgency.label().to_string()),
        Escape::Html,
    ));

    body.push_str("<p><strong>Examens demandés :</strong></p>\n");
    let tests: Vec<&str> = analysis
        .tests
        .iter()
        .map(String::as_str)
        .filter(|t| !t.trim().is_empty())
        .collect();
    if tests.is_empty() {
        body.push_str(&format!("<p>{}</p>\n", NONE_LISTED));
    } else {
        body.push_str("<ul>\n");
        for test in tests {
            body.push_str(&format!("<li>☐ {}</li>\n", escape_html(test)));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<div class=\"signature\">Signature du prescripteur</div>\n");
    body.push_str(&format!("<footer>Réf. {}</footer>", escape_html(&reference)));

    Ok(HtmlDocument::new(
        format!("Demande d'analyses {}", analysis.id),
        body,
    ))
}
