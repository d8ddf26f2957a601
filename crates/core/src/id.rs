//! Strongly-typed identifiers used across the domain.
//!
//! Record IDs are positive integers allocated sequentially by the owning
//! store (next ID = stored counter, never reused). The newtypes keep client
//! and invoice IDs from being mixed up at call sites.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a client record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

/// Identifier of an invoice record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(u64);

macro_rules! impl_record_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = u64::from_str(s).map_err(|e| {
                    DomainError::validation(format!("{}: {}", $name, e))
                })?;
                Ok(Self(value))
            }
        }
    };
}

impl_record_id!(ClientId, "ClientId");
impl_record_id!(InvoiceId, "InvoiceId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_u64() {
        let id = ClientId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(ClientId::from(42u64), id);
    }

    #[test]
    fn ids_display_as_plain_integers() {
        assert_eq!(InvoiceId::new(7).to_string(), "7");
    }

    #[test]
    fn ids_parse_from_strings() {
        let id: InvoiceId = "15".parse().unwrap();
        assert_eq!(id, InvoiceId::new(15));

        let err = "abc".parse::<ClientId>().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for unparseable ID"),
        }
    }

    #[test]
    fn client_and_invoice_ids_serialize_transparently() {
        let json = serde_json::to_string(&ClientId::new(3)).unwrap();
        assert_eq!(json, "3");
        let back: ClientId = serde_json::from_str("3").unwrap();
        assert_eq!(back, ClientId::new(3));
    }
}
