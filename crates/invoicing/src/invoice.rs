use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use ledgerly_core::{ClientId, DomainError, DomainResult, InvoiceId};

/// Invoice status lifecycle.
///
/// Transitions are unconstrained: any status may be overwritten with any
/// other status via an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(DomainError::validation(format!(
                "status must be one of: draft, sent, paid, overdue (got {other:?})"
            ))),
        }
    }
}

/// One entry of an invoice's itemized charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// `line_no` is 1-based, used only for error messages.
    fn validate(&self, line_no: usize) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "line item {line_no}: description cannot be empty"
            )));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(DomainError::validation(format!(
                "line item {line_no}: quantity must be positive"
            )));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(DomainError::validation(format!(
                "line item {line_no}: unit_price cannot be negative"
            )));
        }
        Ok(())
    }
}

/// Sum of quantity × unit_price over the given line items.
pub fn compute_total(line_items: &[LineItem]) -> f64 {
    line_items.iter().map(LineItem::amount).sum()
}

/// Invoice record.
///
/// `total` is derived from `line_items` when the invoice is created and is
/// never edited independently; it is always recomputable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub client_id: ClientId,
    pub line_items: Vec<LineItem>,
    pub total: f64,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new invoice.
///
/// The store assigns the ID and timestamp, computes the total, sets the
/// initial status to `draft` and checks that `client_id` resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub client_id: ClientId,
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl NewInvoice {
    pub fn validate(&self) -> DomainResult<()> {
        if self.line_items.is_empty() {
            return Err(DomainError::validation(
                "at least one line item is required",
            ));
        }
        for (i, item) in self.line_items.iter().enumerate() {
            item.validate(i + 1)?;
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        compute_total(&self.line_items)
    }

    /// Assemble the final record once the store has assigned an ID.
    pub fn into_invoice(self, id: InvoiceId, created_at: DateTime<Utc>) -> Invoice {
        let total = self.total();
        Invoice {
            id,
            client_id: self.client_id,
            line_items: self.line_items,
            total,
            status: InvoiceStatus::Draft,
            notes: self.notes,
            due_date: self.due_date,
            created_at,
        }
    }
}
