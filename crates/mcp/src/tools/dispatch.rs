#![forbid(unsafe_code)]

use crate::{McpServer, RpcError};
use serde_json::{Map, Value};

use super::{CREATE_JOB_TOOL, STATUS_TOOL, create_job, status};

pub(crate) fn dispatch_tool(
    server: &mut McpServer,
    name: &str,
    args: &Map<String, Value>,
) -> Result<Value, RpcError> {
    match name {
        STATUS_TOOL => status::handle(server, args),
        CREATE_JOB_TOOL => create_job::handle(server, args),
        _ => Err(RpcError::UnknownTool(name.to_string())),
    }
}
