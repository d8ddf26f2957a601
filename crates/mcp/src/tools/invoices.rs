//! Invoice tools: create, get, list, update status.

use serde::{Deserialize, Serialize};

use ledgerly_clients::Client;
use ledgerly_core::{ClientId, InvoiceId};
use ledgerly_invoicing::{Invoice, InvoiceStatus, LineItem, NewInvoice};
use ledgerly_store::{ClientStore, InvoiceStore};

use crate::error::McpError;

/// Parameters for `create_invoice`.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceParams {
    pub client_id: u64,
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Parameters for `get_invoice`.
#[derive(Debug, Deserialize)]
pub struct GetInvoiceParams {
    pub invoice_id: u64,
}

/// Parameters for `list_invoices`.
#[derive(Debug, Deserialize)]
pub struct ListInvoicesParams {
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Parameters for `update_invoice_status`.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceStatusParams {
    pub invoice_id: u64,
    pub status: String,
}

/// Result of `get_invoice`: the invoice plus its referenced client.
#[derive(Debug, Serialize)]
pub struct InvoiceWithClient {
    pub invoice: Invoice,
    pub client: Client,
}

/// Result of `list_invoices`.
#[derive(Debug, Serialize)]
pub struct InvoiceListResult {
    pub count: usize,
    pub total_amount: f64,
    pub invoices: Vec<Invoice>,
}

/// Handle `create_invoice` tool invocation.
pub fn handle_create_invoice(
    store: &InvoiceStore,
    params: CreateInvoiceParams,
) -> Result<Invoice, McpError> {
    let invoice = store.create_invoice(NewInvoice {
        client_id: ClientId::new(params.client_id),
        line_items: params.line_items,
        notes: params.notes,
        due_date: params.due_date,
    })?;
    Ok(invoice)
}

/// Handle `get_invoice` tool invocation.
pub fn handle_get_invoice(
    invoices: &InvoiceStore,
    clients: &ClientStore,
    params: GetInvoiceParams,
) -> Result<InvoiceWithClient, McpError> {
    let invoice = invoices.get_invoice(InvoiceId::new(params.invoice_id))?;
    let client = clients.get_client(invoice.client_id)?;
    Ok(InvoiceWithClient { invoice, client })
}

/// Handle `list_invoices` tool invocation.
pub fn handle_list_invoices(
    store: &InvoiceStore,
    params: ListInvoicesParams,
) -> Result<InvoiceListResult, McpError> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<InvoiceStatus>)
        .transpose()?;

    let invoices = store.list_invoices(params.client_id.map(ClientId::new), status)?;
    let total_amount = invoices.iter().map(|inv| inv.total).sum();
    Ok(InvoiceListResult {
        count: invoices.len(),
        total_amount,
        invoices,
    })
}

/// Handle `update_invoice_status` tool invocation.
pub fn handle_update_invoice_status(
    store: &InvoiceStore,
    params: UpdateInvoiceStatusParams,
) -> Result<Invoice, McpError> {
    let status: InvoiceStatus = params.status.parse()?;
    Ok(store.update_invoice_status(InvoiceId::new(params.invoice_id), status)?)
}
