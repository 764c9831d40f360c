#![forbid(unsafe_code)]

use crate::monitor::DEFAULT_JOB_STATUS;
use crate::{McpServer, RpcError};
use serde_json::{Map, Value};
use tm_core::ids::JobId;

pub(crate) fn handle(server: &mut McpServer, args: &Map<String, Value>) -> Result<Value, RpcError> {
    let raw_job_id = crate::require_string(args, "job_id")?;
    let job_id =
        JobId::try_new(raw_job_id).map_err(|e| RpcError::invalid("job_id", e.message()))?;
    // Any non-empty status is stored as given; the schema enum documents the usual values.
    let status = crate::optional_nonblank_string(args, "status")?.unwrap_or(DEFAULT_JOB_STATUS);

    let record = server.monitor.create_example_job(job_id, status)?;
    tracing::info!(job_id = %record.job_id, status = %record.status, "example job written");

    let pretty = serde_json::to_string_pretty(&record)
        .map_err(|e| RpcError::Internal(format!("failed to render job: {e}")))?;
    Ok(crate::tool_text_content(format!(
        "Created example training job: {pretty}"
    )))
}
