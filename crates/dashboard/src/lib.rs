//! Read-only aggregation over both record stores.
//!
//! Tracks headline numbers for the business: client and invoice counts,
//! recognized revenue, and the invoice status breakdown. Never mutates
//! either store.

use std::sync::Arc;

use serde::Serialize;

use ledgerly_invoicing::InvoiceStatus;
use ledgerly_store::{ClientStore, InvoiceStore, StoreResult};

/// Invoice count per status. Statuses with no invoices report zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub draft: usize,
    pub sent: usize,
    pub paid: usize,
    pub overdue: usize,
}

impl StatusBreakdown {
    fn bump(&mut self, status: InvoiceStatus) {
        match status {
            InvoiceStatus::Draft => self.draft += 1,
            InvoiceStatus::Sent => self.sent += 1,
            InvoiceStatus::Paid => self.paid += 1,
            InvoiceStatus::Overdue => self.overdue += 1,
        }
    }
}

/// Dashboard summary shape returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub total_invoices: usize,
    /// Sum of `total` over invoices with status `paid` only; unpaid work is
    /// not revenue yet.
    pub total_revenue: f64,
    pub invoices_by_status: StatusBreakdown,
}

/// Read-only view over both stores.
#[derive(Debug)]
pub struct Dashboard {
    clients: Arc<ClientStore>,
    invoices: Arc<InvoiceStore>,
}

impl Dashboard {
    pub fn new(clients: Arc<ClientStore>, invoices: Arc<InvoiceStore>) -> Self {
        Self { clients, invoices }
    }

    pub fn summary(&self) -> StoreResult<DashboardSummary> {
        let total_clients = self.clients.list_all_clients()?.len();
        let invoices = self.invoices.list_invoices(None, None)?;

        let mut invoices_by_status = StatusBreakdown::default();
        let mut total_revenue = 0.0;
        for invoice in &invoices {
            invoices_by_status.bump(invoice.status);
            if invoice.status == InvoiceStatus::Paid {
                total_revenue += invoice.total;
            }
        }

        Ok(DashboardSummary {
            total_clients,
            total_invoices: invoices.len(),
            total_revenue,
            invoices_by_status,
        })
    }
}
