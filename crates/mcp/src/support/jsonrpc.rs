#![forbid(unsafe_code)]

use serde::Deserialize;
use serde_json::{Value, json};

pub(crate) const METHOD_NOT_FOUND: i64 = -32601;
pub(crate) const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug)]
pub(crate) struct JsonRpcRequest {
    pub(crate) method: String,
    pub(crate) id: Option<Value>,
    pub(crate) params: Option<Value>,
}

/// Protocol-level failure of one request. Application-level outcomes (job not found, a filtered
/// provider failing) are successful results and never pass through here.
#[derive(Debug)]
pub(crate) enum RpcError {
    MethodNotFound(String),
    UnknownTool(String),
    MissingArgument(&'static str),
    InvalidArgument { name: &'static str, message: String },
    Internal(String),
}

impl RpcError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    // Missing and invalid arguments keep the internal-error code clients already handle; only
    // the message tells them apart.
    pub(crate) fn code(&self) -> i64 {
        match self {
            Self::MethodNotFound(_) | Self::UnknownTool(_) => METHOD_NOT_FOUND,
            Self::MissingArgument(_) | Self::InvalidArgument { .. } | Self::Internal(_) => {
                INTERNAL_ERROR
            }
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            Self::MethodNotFound(method) => format!("Unknown method: {method}"),
            Self::UnknownTool(name) => format!("Unknown tool: {name}"),
            Self::MissingArgument(name) => {
                format!("Internal error: missing required argument: {name}")
            }
            Self::InvalidArgument { name, message } => {
                format!("Internal error: invalid argument {name}: {message}")
            }
            Self::Internal(detail) => format!("Internal error: {detail}"),
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for RpcError {}

impl From<tm_storage::StoreError> for RpcError {
    fn from(value: tm_storage::StoreError) -> Self {
        Self::Internal(value.to_string())
    }
}

pub(crate) fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub(crate) fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    method: Value,
    #[serde(default)]
    params: Option<Value>,
}

/// Parses one input line. On failure returns the complete error response to emit.
pub(crate) fn parse_request(raw: &str) -> Result<JsonRpcRequest, Value> {
    let data: Value = serde_json::from_str(raw).map_err(|e| {
        json_rpc_error(None, INTERNAL_ERROR, &format!("Internal error: parse error: {e}"))
    })?;
    if !data.is_object() {
        return Err(json_rpc_error(
            None,
            INTERNAL_ERROR,
            "Internal error: request must be a JSON object",
        ));
    }

    let envelope: Envelope = serde_json::from_value(data).map_err(|e| {
        json_rpc_error(None, INTERNAL_ERROR, &format!("Internal error: bad envelope: {e}"))
    })?;
    let method = match envelope.method {
        Value::String(method) => method,
        other => {
            return Err(json_rpc_error(
                envelope.id,
                METHOD_NOT_FOUND,
                &RpcError::MethodNotFound(other.to_string()).message(),
            ));
        }
    };

    Ok(JsonRpcRequest {
        method,
        id: envelope.id,
        params: envelope.params,
    })
}

pub(crate) fn tool_text_content(text: String) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

pub(crate) fn tool_json_content(payload: &Value) -> Value {
    tool_text_content(serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_line_is_internal_error_with_null_id() {
        let resp = parse_request("{not json").unwrap_err();
        assert_eq!(resp["error"]["code"], json!(INTERNAL_ERROR));
        assert_eq!(resp["id"], Value::Null);
        assert_eq!(resp["jsonrpc"], json!("2.0"));
        assert!(resp.get("result").is_none());
    }

    #[test]
    fn non_object_json_is_internal_error() {
        for raw in ["[1,2]", "42", "\"hi\"", "null"] {
            let resp = parse_request(raw).unwrap_err();
            assert_eq!(resp["error"]["code"], json!(INTERNAL_ERROR), "{raw}");
            assert_eq!(resp["id"], Value::Null);
        }
    }

    #[test]
    fn missing_method_keeps_the_id() {
        let resp = parse_request(r#"{"jsonrpc":"2.0","id":7}"#).unwrap_err();
        assert_eq!(resp["id"], json!(7));
        assert_eq!(resp["error"]["code"], json!(METHOD_NOT_FOUND));
        assert_eq!(resp["error"]["message"], json!("Unknown method: null"));
    }

    #[test]
    fn request_fields_are_extracted() {
        let req = parse_request(r#"{"id":"a","method":"tools/list","params":{}}"#).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.id, Some(json!("a")));
        assert_eq!(req.params, Some(json!({})));
    }

    #[test]
    fn error_codes_follow_the_taxonomy() {
        assert_eq!(RpcError::MethodNotFound("x".into()).code(), METHOD_NOT_FOUND);
        assert_eq!(RpcError::UnknownTool("x".into()).code(), METHOD_NOT_FOUND);
        assert_eq!(RpcError::MissingArgument("job_id").code(), INTERNAL_ERROR);
        assert_eq!(RpcError::invalid("status", "must be a string").code(), INTERNAL_ERROR);
        assert_eq!(
            RpcError::MissingArgument("job_id").message(),
            "Internal error: missing required argument: job_id"
        );
    }

    #[test]
    fn error_envelope_without_id_serializes_null() {
        let resp = json_rpc_error(None, METHOD_NOT_FOUND, "nope");
        assert_eq!(
            resp,
            json!({ "jsonrpc": "2.0", "id": null, "error": { "code": -32601, "message": "nope" } })
        );
    }
}
