#![forbid(unsafe_code)]

use crate::monitor::TrainingMonitor;
use crate::{JsonRpcRequest, McpServer, RpcError};
use serde_json::{Map, Value, json};

impl McpServer {
    pub(crate) fn new(monitor: TrainingMonitor) -> Self {
        Self { monitor }
    }

    /// Turns one input line into exactly one JSON-RPC response object.
    pub(crate) fn handle_line(&mut self, raw: &str) -> Value {
        let request = match crate::parse_request(raw) {
            Ok(request) => request,
            Err(resp) => {
                tracing::warn!("rejected malformed request line");
                return resp;
            }
        };

        let id = request.id.clone();
        tracing::debug!(method = %request.method, "request");

        match self.handle(request) {
            Ok(result) => crate::json_rpc_response(id, result),
            Err(err) => {
                if matches!(err, RpcError::Internal(_)) {
                    tracing::error!(error = %err, "request failed");
                } else {
                    tracing::debug!(error = %err, "request rejected");
                }
                crate::json_rpc_error(id, err.code(), &err.message())
            }
        }
    }

    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => Ok(crate::tools::server_descriptor()),
            "tools/list" => Ok(json!({ "tools": crate::tools::tool_definitions() })),
            "tools/call" => self.handle_tools_call(request.params),
            other => Err(RpcError::MethodNotFound(other.to_string())),
        }
    }

    fn handle_tools_call(&mut self, params: Option<Value>) -> Result<Value, RpcError> {
        let params = match params {
            None | Some(Value::Null) => return Err(RpcError::MissingArgument("name")),
            Some(Value::Object(obj)) => obj,
            Some(_) => return Err(RpcError::invalid("params", "must be an object")),
        };
        let tool_name = crate::require_string(&params, "name")?.to_string();
        let args = match params.get("arguments") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(obj)) => obj.clone(),
            Some(_) => return Err(RpcError::invalid("arguments", "must be an object")),
        };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            crate::tools::dispatch_tool(self, &tool_name, &args)
        }));
        match result {
            Ok(resp) => resp,
            Err(_) => Err(RpcError::Internal(format!(
                "panic while handling {tool_name}"
            ))),
        }
    }
}
