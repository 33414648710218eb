//! Self-contained printable HTML documents.

use tracing::{info, warn};

use super::{escape_html, or_not_specified, Escape, Template};
use crate::config::ClinicIdentity;

const LETTERHEAD: &str = "<header>\n<h1>{{name}}</h1>\n\
<p>{{address}} · Tél. {{phone}} · {{email}}</p>\n</header>";

/// Print stylesheet shared by every printable document.
pub const PRINT_STYLE: &str = "\
@page { size: A4; margin: 15mm; }
body { font-family: Arial, Helvetica, sans-serif; font-size: 12px; color: #222; }
header { border-bottom: 2px solid #0b6e4f; margin-bottom: 16px; padding-bottom: 8px; }
header h1 { font-size: 18px; margin: 0; color: #0b6e4f; }
h2 { font-size: 15px; text-align: center; text-transform: uppercase; }
table { width: 100%; border-collapse: collapse; margin: 8px 0; }
th, td { border: 1px solid #999; padding: 4px 6px; text-align: left; }
.meta { display: flex; justify-content: space-between; }
.signature { margin-top: 48px; text-align: right; }
footer { margin-top: 24px; font-size: 10px; color: #666; text-align: center; }
";

/// A complete HTML page with inline styles and no external assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    pub title: String,
    pub style: String,
    /// Body markup, already escaped
    pub body: String,
}

impl HtmlDocument {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            style: PRINT_STYLE.to_string(),
            body: body.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_html(&self.title),
            self.style,
            self.body
        )
    }
}

/// Clinic header block.
pub(crate) fn letterhead(clinic: &ClinicIdentity) -> String {
    Template::parse(LETTERHEAD).render(|key| clinic.field(key), Escape::Html)
}

/// Bordered table with escaped cells; blank cells print as not specified.
pub(crate) fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_html(or_not_specified(cell))));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

/// Host surface that opens a printable context (a window, a print job).
pub trait PrintTarget {
    /// Open the document for printing. Returns `false` when the platform
    /// refuses to open a new context.
    fn open(&mut self, html: &str) -> bool;
}

/// Result of handing a document to a [`PrintTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintOutcome {
    Sent,
    /// The target refused; nothing was printed
    Blocked,
}

/// Send a document to a print target.
pub fn print(document: &HtmlDocument, target: &mut dyn PrintTarget) -> PrintOutcome {
    if target.open(&document.to_html()) {
        info!(title = %document.title, "document sent to print");
        PrintOutcome::Sent
    } else {
        warn!(title = %document.title, "print context blocked");
        PrintOutcome::Blocked
    }
}
