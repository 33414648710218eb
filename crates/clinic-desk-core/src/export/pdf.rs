//! Declarative PDF page trees and the renderer contract.
//!
//! The core only describes pages; a host renderer lays them out and returns
//! the bytes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{or_not_specified, ExportError, ExportResult};
use crate::config::ClinicIdentity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    pub bold: bool,
    pub align: Align,
    /// Hex color (e.g., "#0b6e4f")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            bold: false,
            align: Align::Left,
            color: None,
        }
    }
}

/// One layout node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Text {
        content: String,
        style: TextStyle,
    },
    Image {
        src: String,
        width: f32,
        height: f32,
    },
    /// Children laid out side by side
    Row { children: Vec<Node> },
    /// Children stacked vertically
    Column { children: Vec<Node> },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        /// Relative column widths
        widths: Vec<f32>,
    },
    Divider,
    Spacer { height: f32 },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
            style: TextStyle::default(),
        }
    }

    pub fn styled(content: impl Into<String>, style: TextStyle) -> Self {
        Node::Text {
            content: content.into(),
            style,
        }
    }

    pub fn heading(content: impl Into<String>, size: f32) -> Self {
        Node::styled(
            content,
            TextStyle {
                size,
                bold: true,
                ..TextStyle::default()
            },
        )
    }

    /// Every text content in the subtree, depth first.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Node::Text { content, .. } => vec![content.as_str()],
            Node::Row { children } | Node::Column { children } => {
                children.iter().flat_map(Node::texts).collect()
            }
            Node::Table { headers, rows, .. } => headers
                .iter()
                .chain(rows.iter().flatten())
                .map(String::as_str)
                .collect(),
            Node::Image { .. } | Node::Divider | Node::Spacer { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfPage {
    pub size: PageSize,
    pub orientation: Orientation,
    /// Page margin in points
    pub margin: f32,
    pub nodes: Vec<Node>,
}

impl PdfPage {
    /// Portrait A4 page with the house margin.
    pub fn a4(nodes: Vec<Node>) -> Self {
        Self {
            size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: 40.0,
            nodes,
        }
    }
}

/// A complete document ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDocument {
    pub title: String,
    pub author: String,
    /// Suggested download file name
    pub file_name: String,
    pub pages: Vec<PdfPage>,
}

impl PdfDocument {
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Every text content in the document, depth first.
    pub fn texts(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.nodes.iter())
            .flat_map(Node::texts)
            .collect()
    }
}

/// Clinic header: optional logo beside name and contact lines.
pub(crate) fn letterhead_nodes(clinic: &ClinicIdentity) -> Vec<Node> {
    let identity = vec![
        Node::heading(or_not_specified(&clinic.name), 14.0),
        Node::text(or_not_specified(&clinic.address)),
        Node::text(format!(
            "Tél. {} · {}",
            or_not_specified(&clinic.phone),
            or_not_specified(&clinic.email)
        )),
    ];

    let header = match &clinic.logo_url {
        Some(src) => Node::Row {
            children: vec![
                Node::Image {
                    src: src.clone(),
                    width: 60.0,
                    height: 60.0,
                },
                Node::Column { children: identity },
            ],
        },
        None => Node::Column { children: identity },
    };

    vec![header, Node::Divider]
}

/// Centered small print with the document reference.
pub(crate) fn footer_nodes(clinic: &ClinicIdentity, reference: &str) -> Vec<Node> {
    vec![
        Node::Spacer { height: 24.0 },
        Node::Divider,
        Node::styled(
            format!("{} · Réf. {}", or_not_specified(&clinic.name), reference),
            TextStyle {
                size: 8.0,
                align: Align::Center,
                color: Some("#666666".into()),
                ..TextStyle::default()
            },
        ),
    ]
}

/// Host renderer turning a page tree into PDF bytes.
pub trait PdfRenderer {
    fn render(&self, document: &PdfDocument) -> Result<Vec<u8>, String>;
}

/// State of a download link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DownloadState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<u8>),
    Failed(String),
}

/// A "download PDF" control: shows a loading state while rendering.
#[derive(Debug, Clone, Default)]
pub struct DownloadLink {
    state: DownloadState,
}

impl DownloadLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DownloadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == DownloadState::Loading
    }

    /// Mark the render as started.
    pub fn begin(&mut self) {
        self.state = DownloadState::Loading;
    }

    /// Store the renderer's result.
    pub fn finish(&mut self, result: Result<Vec<u8>, String>) {
        self.state = match result {
            Ok(bytes) => DownloadState::Ready(bytes),
            Err(message) => DownloadState::Failed(message),
        };
    }

    /// Render a document and keep the bytes for download.
    pub fn generate(
        &mut self,
        document: &PdfDocument,
        renderer: &dyn PdfRenderer,
    ) -> ExportResult<&[u8]> {
        self.begin();
        self.finish(renderer.render(document));

        match &self.state {
            DownloadState::Ready(bytes) => {
                debug!(file = %document.file_name, size = bytes.len(), "pdf rendered");
                Ok(bytes)
            }
            DownloadState::Failed(message) => {
                warn!(file = %document.file_name, %message, "pdf render failed");
                Err(ExportError::Renderer(message.clone()))
            }
            DownloadState::Idle | DownloadState::Loading => {
                Err(ExportError::Renderer("render did not complete".into()))
            }
        }
    }
}
