#![forbid(unsafe_code)]

use serde_json::{Value, json};
use tm_core::Platform;

pub(crate) const STATUS_TOOL: &str = "run_training_monitor";
pub(crate) const CREATE_JOB_TOOL: &str = "create_example_training_job";

pub(crate) const JOB_STATUSES: [&str; 3] = ["running", "completed", "failed"];

pub(crate) fn server_descriptor() -> Value {
    json!({
        "protocolVersion": crate::MCP_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": { "name": crate::SERVER_NAME, "version": crate::SERVER_VERSION }
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": STATUS_TOOL,
            "description": "Check the status of training jobs across multiple platforms (SageMaker, Vertex AI, local). Queries every configured platform unless a platform filter is given.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "job_id": {
                        "type": "string",
                        "description": "Optional job ID to check a specific job. If omitted, returns all jobs."
                    },
                    "platform": {
                        "type": "string",
                        "description": "Optional platform filter. If omitted, queries all available platforms.",
                        "enum": Platform::tags()
                    }
                }
            }
        }),
        json!({
            "name": CREATE_JOB_TOOL,
            "description": "Create an example training job for demonstration purposes.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "job_id": {
                        "type": "string",
                        "description": "Job ID to create"
                    },
                    "status": {
                        "type": "string",
                        "description": "Initial status (running, completed, failed)",
                        "enum": JOB_STATUSES
                    }
                },
                "required": ["job_id"]
            }
        }),
    ]
}
