//! Pharmacy stock, suppliers and purchase orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::snapshot::refresh_optional;
use super::{date, snapshot, snapshot_source, sum_amounts, text, RecordKind, Snapshot};
use crate::registry::{Directory, Record};

// =========================================================================
// Articles
// =========================================================================

/// Stock level derived from quantity and reorder threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    InStock,
    Low,
    OutOfStock,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::InStock => "in_stock",
            StockLevel::Low => "low",
            StockLevel::OutOfStock => "out_of_stock",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::InStock => "En stock",
            StockLevel::Low => "Stock faible",
            StockLevel::OutOfStock => "Rupture",
        }
    }
}

/// A stocked pharmacy article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Article {
    /// Registry id
    pub id: String,
    pub name: String,
    /// Grouping (e.g., "Antibiotiques")
    pub category: String,
    /// Dispensing unit (e.g., "boîte", "flacon")
    pub unit: String,
    /// Units on hand; `None` until counted
    pub quantity: Option<u32>,
    /// At or below this quantity the article is low
    pub reorder_level: u32,
    pub unit_price: Option<u64>,
    /// Usual supplier, copied from the supplier registry
    pub supplier: Option<Snapshot>,
    pub expiry_date: Option<NaiveDate>,
    pub batch_number: Option<String>,
}

impl Article {
    pub fn stock_level(&self) -> StockLevel {
        match self.quantity.unwrap_or(0) {
            0 => StockLevel::OutOfStock,
            q if q <= self.reorder_level => StockLevel::Low,
            _ => StockLevel::InStock,
        }
    }

    /// Check if the article is past its expiry date on the given day.
    pub fn is_expired_on(&self, on: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < on)
    }
}

impl Record for Article {
    const KIND: RecordKind = RecordKind::Article;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "category" => text(&self.category),
            "unit" => text(&self.unit),
            "quantity" => self.quantity.map(|q| q.to_string()),
            "reorder_level" => Some(self.reorder_level.to_string()),
            "unit_price" => self.unit_price.map(|p| p.to_string()),
            "supplier_id" => snapshot_source(&self.supplier),
            "supplier_name" => snapshot(&self.supplier),
            "expiry_date" => date(&self.expiry_date),
            "batch_number" => self.batch_number.clone(),
            "stock_level" => text(self.stock_level().as_str()),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["name", "unit", "quantity"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "category", "supplier_name"]
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.supplier, RecordKind::Supplier, directory);
    }
}

// =========================================================================
// Suppliers
// =========================================================================

/// A pharmacy supplier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Supplier {
    /// Registry id
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Grouping (e.g., "Grossiste", "Laboratoire")
    pub category: String,
}

impl Record for Supplier {
    const KIND: RecordKind = RecordKind::Supplier;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "name" => text(&self.name),
            "contact_name" => self.contact_name.clone(),
            "phone" => text(&self.phone),
            "email" => self.email.clone(),
            "address" => self.address.clone(),
            "category" => text(&self.category),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["name", "phone"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "contact_name", "phone", "email"]
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

// =========================================================================
// Purchase orders
// =========================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Draft,
    Sent,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Sent => "sent",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Brouillon",
            OrderStatus::Sent => "Envoyée",
            OrderStatus::Received => "Reçue",
            OrderStatus::Cancelled => "Annulée",
        }
    }
}

/// One ordered article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderLine {
    /// Article name copied from the stock registry
    pub article: Snapshot,
    pub quantity: u32,
    pub unit_price: u64,
}

impl OrderLine {
    /// Line amount, `None` when it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        u64::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// A purchase order (bon de commande) sent to a supplier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PurchaseOrder {
    /// Registry id
    pub id: String,
    pub supplier: Option<Snapshot>,
    pub order_date: Option<NaiveDate>,
    pub expected_date: Option<NaiveDate>,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    pub notes: Option<String>,
}

impl PurchaseOrder {
    /// Sum of the lines, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        sum_amounts(self.lines.iter().map(OrderLine::total))
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

impl Record for PurchaseOrder {
    const KIND: RecordKind = RecordKind::PurchaseOrder;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => text(&self.id),
            "supplier_id" => snapshot_source(&self.supplier),
            "supplier_name" => snapshot(&self.supplier),
            "order_date" => date(&self.order_date),
            "expected_date" => date(&self.expected_date),
            "lines" => Some(
                self.lines
                    .iter()
                    .map(|line| line.article.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            "line_count" => Some(self.lines.len().to_string()),
            "total" => self.total().map(|v| v.to_string()),
            "status" => text(self.status.as_str()),
            "notes" => self.notes.clone(),
            _ => None,
        }
    }

    fn required_fields() -> &'static [&'static str] {
        &["supplier_name", "order_date", "lines"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["id", "supplier_name"]
    }

    fn invalid_fields(&self) -> Vec<&'static str> {
        if self.total().is_none() {
            vec!["total"]
        } else {
            Vec::new()
        }
    }

    fn display_name(&self) -> String {
        format!("Commande {}", self.id)
    }

    fn capture_snapshots(&mut self, directory: &dyn Directory) {
        refresh_optional(&mut self.supplier, RecordKind::Supplier, directory);
        for line in &mut self.lines {
            line.article.refresh(RecordKind::Article, directory);
        }
    }
}
