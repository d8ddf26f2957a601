//! Clients domain module.
//!
//! This crate contains the client record shape and its field validation,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod client;

pub use client::{Client, NewClient};
