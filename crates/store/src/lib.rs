//! File-backed record stores.
//!
//! Each store owns one JSON document on local disk and serializes every
//! operation as an atomic load→mutate→persist behind a per-store lock.
//! All mutation of the backing files funnels through this crate.

pub mod client_store;
pub mod collection;
pub mod error;
pub mod invoice_store;


pub use client_store::ClientStore;
pub use collection::{Collection, Record};
pub use error::{StoreError, StoreResult};
pub use invoice_store::InvoiceStore;
