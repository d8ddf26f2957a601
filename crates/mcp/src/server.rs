//! MCP server implementation.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, error, info};

use ledgerly_dashboard::Dashboard;
use ledgerly_store::{ClientStore, InvoiceStore};

use crate::error::McpError;
use crate::protocol::*;
use crate::tools;

/// MCP server.
///
/// Handles Model Context Protocol requests via stdio transport, mapping each
/// tool call onto a store operation.
pub struct McpServer {
    clients: Arc<ClientStore>,
    invoices: Arc<InvoiceStore>,
    dashboard: Dashboard,
}

impl McpServer {
    /// Create a new MCP server over the stores in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let clients = Arc::new(ClientStore::open_in(&data_dir));
        let invoices = Arc::new(InvoiceStore::open_in(&data_dir, clients.clone()));
        let dashboard = Dashboard::new(clients.clone(), invoices.clone());
        Self {
            clients,
            invoices,
            dashboard,
        }
    }

    /// Run the MCP server (stdio transport).
    ///
    /// Reads JSON-RPC requests from stdin and writes responses to stdout.
    pub fn run(&mut self) -> Result<(), McpError> {
        info!("MCP server started");

        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin);
        let mut stdout = std::io::stdout();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received request: {}", line);

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    error!("Failed to parse request: {}", e);
                    let error_response =
                        JsonRpcError::new(None, -32700, format!("Parse error: {}", e));
                    let error_value = serde_json::to_value(&error_response).unwrap();
                    self.write_response(&mut stdout, &error_value)?;
                    continue;
                }
            };

            let response = self.handle_request(request);
            self.write_response(&mut stdout, &response)?;
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle a JSON-RPC request.
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tool_call(id, request.params),
            _ => {
                let error = JsonRpcError::new(
                    id,
                    -32601,
                    format!("Method not found: {}", request.method),
                );
                serde_json::to_value(error).unwrap()
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>) -> Value {
        let response = InitializeResponse {
            protocol_version: "0.1.0".to_string(),
            server_info: ServerInfo {
                name: "ledgerly-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: Capabilities {
                tools: ToolsCapability { supported: true },
            },
        };

        let json_response = JsonRpcResponse::new(id, serde_json::to_value(response).unwrap());
        serde_json::to_value(json_response).unwrap()
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> Value {
        let tools = vec![
            self.tool_definition_add_client(),
            self.tool_definition_get_client(),
            self.tool_definition_search_clients(),
            self.tool_definition_list_all_clients(),
            self.tool_definition_create_invoice(),
            self.tool_definition_get_invoice(),
            self.tool_definition_list_invoices(),
            self.tool_definition_update_invoice_status(),
            self.tool_definition_dashboard(),
        ];

        let response = ToolListResponse { tools };
        let json_response = JsonRpcResponse::new(id, serde_json::to_value(response).unwrap());
        serde_json::to_value(json_response).unwrap()
    }

    /// Handle tools/call request.
    fn handle_tool_call(&mut self, id: Option<Value>, params: Value) -> Value {
        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => {
                let error = JsonRpcError::new(id, -32602, "Missing tool name".to_string());
                return serde_json::to_value(error).unwrap();
            }
        };

        let tool_params = match params.get("arguments") {
            Some(args) => args.clone(),
            None => json!({}),
        };

        let result = match tool_name {
            "add_client" => self.call_add_client(tool_params),
            "get_client" => self.call_get_client(tool_params),
            "search_clients" => self.call_search_clients(tool_params),
            "list_all_clients" => self.call_list_all_clients(),
            "create_invoice" => self.call_create_invoice(tool_params),
            "get_invoice" => self.call_get_invoice(tool_params),
            "list_invoices" => self.call_list_invoices(tool_params),
            "update_invoice_status" => self.call_update_invoice_status(tool_params),
            "dashboard" => self.call_dashboard(),
            _ => {
                let error =
                    JsonRpcError::new(id, -32601, format!("Tool not found: {}", tool_name));
                return serde_json::to_value(error).unwrap();
            }
        };

        match result {
            Ok(value) => {
                let response = JsonRpcResponse::new(id, value);
                serde_json::to_value(response).unwrap()
            }
            Err(e) => {
                let error = JsonRpcError::new(id, e.error_code(), e.to_string());
                serde_json::to_value(error).unwrap()
            }
        }
    }

    fn call_add_client(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::AddClientParams = serde_json::from_value(params)?;
        let result = tools::handle_add_client(&self.clients, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_get_client(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::GetClientParams = serde_json::from_value(params)?;
        let result = tools::handle_get_client(&self.clients, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_search_clients(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::SearchClientsParams = serde_json::from_value(params)?;
        let result = tools::handle_search_clients(&self.clients, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_list_all_clients(&mut self) -> Result<Value, McpError> {
        let result = tools::handle_list_all_clients(&self.clients)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_create_invoice(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::CreateInvoiceParams = serde_json::from_value(params)?;
        let result = tools::handle_create_invoice(&self.invoices, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_get_invoice(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::GetInvoiceParams = serde_json::from_value(params)?;
        let result = tools::handle_get_invoice(&self.invoices, &self.clients, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_list_invoices(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::ListInvoicesParams = serde_json::from_value(params)?;
        let result = tools::handle_list_invoices(&self.invoices, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_update_invoice_status(&mut self, params: Value) -> Result<Value, McpError> {
        let params: tools::UpdateInvoiceStatusParams = serde_json::from_value(params)?;
        let result = tools::handle_update_invoice_status(&self.invoices, params)?;
        Ok(serde_json::to_value(result)?)
    }

    fn call_dashboard(&mut self) -> Result<Value, McpError> {
        let result = tools::handle_dashboard(&self.dashboard)?;
        Ok(serde_json::to_value(result)?)
    }

    /// Write response to stdout.
    fn write_response<W: Write>(&self, writer: &mut W, response: &Value) -> Result<(), McpError> {
        let response_str = serde_json::to_string(response)?;
        writeln!(writer, "{}", response_str)?;
        writer.flush()?;
        debug!("Sent response: {}", response_str);
        Ok(())
    }

    // Tool definitions for tools/list response

    fn tool_definition_add_client(&self) -> ToolDefinition {
        ToolDefinition {
            name: "add_client".to_string(),
            description: "Add a new client. Name and email are required; email must be a valid address.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Client's full name"},
                    "email": {"type": "string", "description": "Client's email address"},
                    "phone": {"type": "string", "description": "Client's phone number"},
                    "address": {"type": "string", "description": "Client's address"},
                    "company": {"type": "string", "description": "Client's company name"}
                },
                "required": ["name", "email"]
            }),
        }
    }

    fn tool_definition_get_client(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_client".to_string(),
            description: "Get a client by ID".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "client_id": {"type": "integer", "description": "Unique ID of the client"}
                },
                "required": ["client_id"]
            }),
        }
    }

    fn tool_definition_search_clients(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search_clients".to_string(),
            description: "Search clients by case-insensitive substring match against name, email and company. An empty query matches nothing; use list_all_clients for the full collection.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search term"}
                },
                "required": ["query"]
            }),
        }
    }

    fn tool_definition_list_all_clients(&self) -> ToolDefinition {
        ToolDefinition {
            name: "list_all_clients".to_string(),
            description: "List all clients in insertion order".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    fn tool_definition_create_invoice(&self) -> ToolDefinition {
        ToolDefinition {
            name: "create_invoice".to_string(),
            description: "Create a draft invoice for an existing client. The total is computed from the line items.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "client_id": {"type": "integer", "description": "ID of the client to invoice"},
                    "line_items": {
                        "type": "array",
                        "description": "Itemized charges",
                        "items": {
                            "type": "object",
                            "properties": {
                                "description": {"type": "string"},
                                "quantity": {"type": "number", "exclusiveMinimum": 0},
                                "unit_price": {"type": "number", "minimum": 0}
                            },
                            "required": ["description", "quantity", "unit_price"]
                        },
                        "minItems": 1
                    },
                    "notes": {"type": "string", "description": "Additional notes"},
                    "due_date": {"type": "string", "description": "Due date in ISO format YYYY-MM-DD"}
                },
                "required": ["client_id", "line_items"]
            }),
        }
    }

    fn tool_definition_get_invoice(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_invoice".to_string(),
            description: "Get an invoice by ID, including the referenced client".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "invoice_id": {"type": "integer", "description": "Unique ID of the invoice"}
                },
                "required": ["invoice_id"]
            }),
        }
    }

    fn tool_definition_list_invoices(&self) -> ToolDefinition {
        ToolDefinition {
            name: "list_invoices".to_string(),
            description: "List invoices in insertion order with optional client and status filters (combined with AND)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "client_id": {"type": "integer", "description": "Filter by client ID"},
                    "status": {"type": "string", "enum": ["draft", "sent", "paid", "overdue"], "description": "Filter by status"}
                }
            }),
        }
    }

    fn tool_definition_update_invoice_status(&self) -> ToolDefinition {
        ToolDefinition {
            name: "update_invoice_status".to_string(),
            description: "Overwrite the status of an invoice. Any status may replace any other.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "invoice_id": {"type": "integer", "description": "ID of the invoice to update"},
                    "status": {"type": "string", "enum": ["draft", "sent", "paid", "overdue"], "description": "New status"}
                },
                "required": ["invoice_id", "status"]
            }),
        }
    }

    fn tool_definition_dashboard(&self) -> ToolDefinition {
        ToolDefinition {
            name: "dashboard".to_string(),
            description: "Get dashboard statistics: client and invoice counts, paid revenue, and invoice counts per status".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }
}
