#![forbid(unsafe_code)]

use serde_json::Number;
use std::collections::BTreeMap;
use tm_core::ids::JobId;

#[derive(Clone, Debug, PartialEq)]
pub struct CreateJobRequest {
    pub job_id: JobId,
    pub status: String,
    pub created_at: String,
    pub model: Option<String>,
    pub metrics: Option<BTreeMap<String, Number>>,
    pub progress: Option<String>,
}

pub const EXAMPLE_MODEL: &str = "example-model";
pub const EXAMPLE_PROGRESS: &str = "75%";

/// Demo payload used by `create_example_training_job` and the startup seed job.
pub fn example_job_request(job_id: JobId, status: &str, created_at: String) -> CreateJobRequest {
    let mut metrics = BTreeMap::new();
    if let Some(loss) = Number::from_f64(0.123) {
        metrics.insert("loss".to_string(), loss);
    }
    if let Some(accuracy) = Number::from_f64(0.95) {
        metrics.insert("accuracy".to_string(), accuracy);
    }
    metrics.insert("epoch".to_string(), Number::from(10));

    CreateJobRequest {
        job_id,
        status: status.to_string(),
        created_at,
        model: Some(EXAMPLE_MODEL.to_string()),
        metrics: Some(metrics),
        progress: Some(EXAMPLE_PROGRESS.to_string()),
    }
}
