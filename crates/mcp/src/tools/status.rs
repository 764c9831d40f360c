#![forbid(unsafe_code)]

use crate::{McpServer, RpcError};
use serde_json::{Map, Value};
use tm_core::Platform;

pub(crate) fn handle(server: &mut McpServer, args: &Map<String, Value>) -> Result<Value, RpcError> {
    // Blank values mean "not given", same as omitting the key. Remote ids may be resource
    // paths, so the id is passed through as given.
    let job_id = crate::optional_nonblank_string(args, "job_id")?.map(str::trim);
    let platform = crate::optional_nonblank_string(args, "platform")?
        .map(|raw| Platform::parse(raw).map_err(|e| RpcError::invalid("platform", e.to_string())))
        .transpose()?;

    let report = server.monitor.get_status(job_id, platform);
    Ok(crate::tool_json_content(&report.to_json()))
}
