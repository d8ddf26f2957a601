use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerly_core::{ClientId, DomainError, DomainResult};

/// Client record.
///
/// `id` and `created_at` are assigned by the store on creation and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Case-insensitive substring match against `name`, `email` and
    /// `company`.
    ///
    /// `needle` must already be lowercased by the caller.
    pub fn matches(&self, needle: &str) -> bool {
        if self.name.to_lowercase().contains(needle) {
            return true;
        }
        if self.email.to_lowercase().contains(needle) {
            return true;
        }
        if let Some(company) = &self.company {
            if company.to_lowercase().contains(needle) {
                return true;
            }
        }
        false
    }
}

/// Input for registering a new client.
///
/// The store assigns the ID and timestamp; everything else is caller input
/// and must pass [`NewClient::validate`] before it becomes a [`Client`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl NewClient {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        validate_email(&self.email)?;
        Ok(())
    }

    /// Assemble the final record once the store has assigned an ID.
    pub fn into_client(self, id: ClientId, created_at: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            company: self.company,
            created_at,
        }
    }
}

/// Basic email shape check: one `@`, non-empty local part, domain with a dot,
/// no whitespace.
fn validate_email(email: &str) -> DomainResult<()> {
    let err = || DomainError::validation(format!("email is not a valid address: {email:?}"));

    if email.chars().any(char::is_whitespace) {
        return Err(err());
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(err());
    };
    if local.is_empty() || domain.is_empty() {
        return Err(err());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(err());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(name: &str, email: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
            company: None,
        }
    }

    #[test]
    fn valid_client_passes_validation() {
        let input = NewClient {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            address: Some("12 Analytical Way".to_string()),
            company: Some("Babbage & Co".to_string()),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = new_client("   ", "ada@example.com").validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "",
            "no-at-sign",
            "@example.com",
            "ada@",
            "ada@nodot",
            "ada@.com",
            "ada@example.",
            "ada@exa mple.com",
            "ada@@example.com",
        ] {
            let err = new_client("Ada", email).validate().unwrap_err();
            match err {
                DomainError::Validation(msg) => assert!(msg.contains("email")),
                _ => panic!("Expected Validation error for email {email:?}"),
            }
        }
    }

    #[test]
    fn plausible_emails_are_accepted() {
        for email in ["ada@example.com", "a.b+tag@sub.example.co.uk", "x@y.io"] {
            assert!(new_client("Ada", email).validate().is_ok(), "{email}");
        }
    }

    #[test]
    fn into_client_carries_all_fields() {
        let input = NewClient {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            address: None,
            company: Some("Babbage & Co".to_string()),
        };
        let now = Utc::now();
        let client = input.clone().into_client(ClientId::new(1), now);

        assert_eq!(client.id, ClientId::new(1));
        assert_eq!(client.name, input.name);
        assert_eq!(client.email, input.email);
        assert_eq!(client.phone, input.phone);
        assert_eq!(client.address, input.address);
        assert_eq!(client.company, input.company);
        assert_eq!(client.created_at, now);
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let client = Client {
            id: ClientId::new(1),
            name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: None,
            address: None,
            company: Some("Acme Corp".to_string()),
            created_at: Utc::now(),
        };

        assert!(client.matches("grace"));
        assert!(client.matches("navy"));
        assert!(client.matches("acme"));
        assert!(!client.matches("other"));
    }

    #[test]
    fn matches_skips_missing_company() {
        let client = Client {
            id: ClientId::new(2),
            name: "Solo Trader".to_string(),
            email: "solo@example.com".to_string(),
            phone: None,
            address: None,
            company: None,
            created_at: Utc::now(),
        };
        assert!(!client.matches("acme"));
    }

    #[test]
    fn optional_fields_default_when_absent_in_json() {
        let input: NewClient =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert_eq!(input.phone, None);
        assert_eq!(input.address, None);
        assert_eq!(input.company, None);
    }
}
