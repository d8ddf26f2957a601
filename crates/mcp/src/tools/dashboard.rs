//! Dashboard tool: read-only statistics over both stores.

use ledgerly_dashboard::{Dashboard, DashboardSummary};

use crate::error::McpError;

/// Handle `dashboard` tool invocation. Takes no parameters.
pub fn handle_dashboard(dashboard: &Dashboard) -> Result<DashboardSummary, McpError> {
    Ok(dashboard.summary()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ledgerly_clients::NewClient;
    use ledgerly_invoicing::{InvoiceStatus, LineItem, NewInvoice};
    use ledgerly_store::{ClientStore, InvoiceStore};

    #[test]
    fn dashboard_reflects_paid_revenue() {
        let dir = tempfile::tempdir().unwrap();
        let clients = Arc::new(ClientStore::open_in(dir.path()));
        let invoices = Arc::new(InvoiceStore::open_in(dir.path(), clients.clone()));
        let dashboard = Dashboard::new(clients.clone(), invoices.clone());

        let client = clients
            .add_client(NewClient {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
                address: None,
                company: None,
            })
            .unwrap();
        let invoice = invoices
            .create_invoice(NewInvoice {
                client_id: client.id,
                line_items: vec![LineItem {
                    description: "Widget".to_string(),
                    quantity: 2.0,
                    unit_price: 10.0,
                }],
                notes: None,
                due_date: None,
            })
            .unwrap();
        invoices
            .update_invoice_status(invoice.id, InvoiceStatus::Paid)
            .unwrap();

        let summary = handle_dashboard(&dashboard).unwrap();
        assert_eq!(summary.total_clients, 1);
        assert_eq!(summary.total_invoices, 1);
        assert_eq!(summary.total_revenue, 20.0);
        assert_eq!(summary.invoices_by_status.paid, 1);
        assert_eq!(summary.invoices_by_status.draft, 0);
    }
}
