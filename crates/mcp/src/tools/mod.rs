//! MCP tool implementations.

mod clients;
mod dashboard;
mod invoices;

pub use clients::{
    handle_add_client, handle_get_client, handle_list_all_clients, handle_search_clients,
    AddClientParams, ClientListResult, GetClientParams, SearchClientsParams,
};
pub use dashboard::handle_dashboard;
pub use invoices::{
    handle_create_invoice, handle_get_invoice, handle_list_invoices,
    handle_update_invoice_status, CreateInvoiceParams, GetInvoiceParams, InvoiceListResult,
    InvoiceWithClient, ListInvoicesParams, UpdateInvoiceStatusParams,
};
