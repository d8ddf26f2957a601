//! Client tools: add, get, search, list.

use serde::{Deserialize, Serialize};

use ledgerly_clients::{Client, NewClient};
use ledgerly_core::ClientId;
use ledgerly_store::ClientStore;

use crate::error::McpError;

/// Parameters for `add_client`.
#[derive(Debug, Deserialize)]
pub struct AddClientParams {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Parameters for `get_client`.
#[derive(Debug, Deserialize)]
pub struct GetClientParams {
    pub client_id: u64,
}

/// Parameters for `search_clients`.
#[derive(Debug, Deserialize)]
pub struct SearchClientsParams {
    pub query: String,
}

/// Result of `search_clients` and `list_all_clients`.
#[derive(Debug, Serialize)]
pub struct ClientListResult {
    pub count: usize,
    pub clients: Vec<Client>,
}

/// Handle `add_client` tool invocation.
pub fn handle_add_client(store: &ClientStore, params: AddClientParams) -> Result<Client, McpError> {
    let client = store.add_client(NewClient {
        name: params.name,
        email: params.email,
        phone: params.phone,
        address: params.address,
        company: params.company,
    })?;
    Ok(client)
}

/// Handle `get_client` tool invocation.
pub fn handle_get_client(store: &ClientStore, params: GetClientParams) -> Result<Client, McpError> {
    Ok(store.get_client(ClientId::new(params.client_id))?)
}

/// Handle `search_clients` tool invocation.
///
/// An empty or whitespace-only query returns no matches; use
/// `list_all_clients` for the full collection.
pub fn handle_search_clients(
    store: &ClientStore,
    params: SearchClientsParams,
) -> Result<ClientListResult, McpError> {
    let clients = store.search_clients(&params.query)?;
    Ok(ClientListResult {
        count: clients.len(),
        clients,
    })
}

/// Handle `list_all_clients` tool invocation.
pub fn handle_list_all_clients(store: &ClientStore) -> Result<ClientListResult, McpError> {
    let clients = store.list_all_clients()?;
    Ok(ClientListResult {
        count: clients.len(),
        clients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ClientStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ClientStore::open_in(dir.path());
        (dir, store)
    }

    #[test]
    fn add_client_params_deserialize_with_defaults() {
        let params: AddClientParams =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
        assert_eq!(params.name, "Ada");
        assert_eq!(params.phone, None);
        assert_eq!(params.company, None);
    }

    #[test]
    fn add_client_params_reject_missing_required_fields() {
        assert!(serde_json::from_str::<AddClientParams>(r#"{"name":"Ada"}"#).is_err());
        assert!(serde_json::from_str::<AddClientParams>(r#"{"email":"a@b.io"}"#).is_err());
    }

    #[test]
    fn add_then_get_round_trips_through_handlers() {
        let (_dir, store) = store();
        let added = handle_add_client(
            &store,
            AddClientParams {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
                address: None,
                company: Some("Acme Corp".to_string()),
            },
        )
        .unwrap();

        let fetched = handle_get_client(
            &store,
            GetClientParams {
                client_id: added.id.value(),
            },
        )
        .unwrap();
        assert_eq!(fetched, added);
    }

    #[test]
    fn search_reports_count_alongside_matches() {
        let (_dir, store) = store();
        handle_add_client(
            &store,
            AddClientParams {
                name: "Wile E.".to_string(),
                email: "wile@example.com".to_string(),
                phone: None,
                address: None,
                company: Some("Acme Corp".to_string()),
            },
        )
        .unwrap();

        let result = handle_search_clients(
            &store,
            SearchClientsParams {
                query: "acme".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.clients[0].company.as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn get_unknown_client_maps_to_not_found_code() {
        let (_dir, store) = store();
        let err = handle_get_client(&store, GetClientParams { client_id: 9999 }).unwrap_err();
        assert_eq!(err.error_code(), -32001);
    }

    #[test]
    fn invalid_email_maps_to_validation_code() {
        let (_dir, store) = store();
        let err = handle_add_client(
            &store,
            AddClientParams {
                name: "Ada".to_string(),
                email: "not-an-email".to_string(),
                phone: None,
                address: None,
                company: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.error_code(), -32602);
    }
}
