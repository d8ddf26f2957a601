//! Invoicing domain module.
//!
//! This crate contains the invoice record shape, line items, the status
//! enum and total computation, implemented purely as deterministic domain
//! logic (no IO, no storage).

pub mod invoice;

pub use invoice::{compute_total, Invoice, InvoiceStatus, LineItem, NewInvoice};
