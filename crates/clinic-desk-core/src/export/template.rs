//! `{{placeholder}}` templates with per-placeholder fallbacks.
//!
//! Syntax: `{{field}}` prints the field or [`NOT_SPECIFIED`] when empty;
//! `{{field|Aucune}}` overrides the fallback. Keys prefixed `clinic.` resolve
//! against the clinic identity. An unterminated `{{` is kept literally.

use super::NOT_SPECIFIED;
use crate::config::ClinicIdentity;
use crate::registry::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { key: String, fallback: Option<String> },
}

/// Output escaping applied to substituted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    None,
    Html,
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };

            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let inner = after[..end].trim();
            let (key, fallback) = match inner.split_once('|') {
                Some((key, fallback)) => (key.trim(), Some(fallback.trim().to_string())),
                None => (inner, None),
            };
            segments.push(Segment::Placeholder {
                key: key.to_string(),
                fallback,
            });

            rest = &after[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Self { segments }
    }

    /// Placeholder keys in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { key, .. } => Some(key.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder through `lookup`.
    pub fn render<F>(&self, lookup: F, escape: Escape) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { key, fallback } => {
                    let value = lookup(key)
                        .filter(|v| !v.trim().is_empty())
                        .unwrap_or_else(|| {
                            fallback.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string())
                        });
                    match escape {
                        Escape::None => out.push_str(&value),
                        Escape::Html => out.push_str(&escape_html(&value)),
                    }
                }
            }
        }
        out
    }

    /// Substitute from a record's field view and the clinic identity.
    pub fn render_record<R: Record>(
        &self,
        record: &R,
        clinic: &ClinicIdentity,
        escape: Escape,
    ) -> String {
        self.render_record_with(record, clinic, |_| None, escape)
    }

    /// Like [`Template::render_record`], consulting `extra` first for
    /// document-only keys such as translated labels.
    pub fn render_record_with<R, F>(
        &self,
        record: &R,
        clinic: &ClinicIdentity,
        extra: F,
        escape: Escape,
    ) -> String
    where
        R: Record,
        F: Fn(&str) -> Option<String>,
    {
        self.render(
            |key| {
                extra(key).or_else(|| match key.strip_prefix("clinic.") {
                    Some(clinic_key) => clinic.field(clinic_key),
                    None => record.field(key),
                })
            },
            escape,
        )
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;

    fn lookup(key: &str) -> Option<String> {
        match key {
            "name" => Some("Traoré".into()),
            "allergies" => Some(String::new()),
            "notes" => Some("   ".into()),
            _ => None,
        }
    }

    #[test]
    fn test_substitution() {
        let template = Template::parse("Patient : {{name}}.");
        assert_eq!(template.render(lookup, Escape::None), "Patient : Traoré.");
    }

    #[test]
    fn test_default_fallback() {
        let template = Template::parse("{{notes}} / {{missing}}");
        assert_eq!(
            template.render(lookup, Escape::None),
            "Non spécifié / Non spécifié"
        );
    }

    #[test]
    fn test_custom_fallback() {
        let template = Template::parse("Allergies : {{ allergies | Aucune }}");
        assert_eq!(template.render(lookup, Escape::None), "Allergies : Aucune");
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        let template = Template::parse("{{name}} {{oops");
        assert_eq!(template.render(lookup, Escape::None), "Traoré {{oops");
    }

    #[test]
    fn test_placeholders() {
        let template = Template::parse("{{a}}-{{b|x}}-{{clinic.name}}");
        let keys: Vec<_> = template.placeholders().collect();
        assert_eq!(keys, vec!["a", "b", "clinic.name"]);
    }

    #[test]
    fn test_html_escape() {
        let template = Template::parse("<p>{{v}}</p>");
        let html = template.render(|_| Some("<b>A & B</b>".into()), Escape::Html);
        assert_eq!(html, "<p>&lt;b&gt;A &amp; B&lt;/b&gt;</p>");
    }

    #[test]
    fn test_render_record_with_clinic() {
        let patient = Patient::new("Koné".into(), "Issa".into(), "05".into());
        let clinic = ClinicIdentity {
            name: "Clinique Les Palmiers".into(),
            ..ClinicIdentity::default()
        };
        let template = Template::parse("{{clinic.name}} | {{last_name}} | {{allergies|Aucune}}");
        assert_eq!(
            template.render_record(&patient, &clinic, Escape::None),
            "Clinique Les Palmiers | Koné | Aucune"
        );
    }
}
