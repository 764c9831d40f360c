#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tm_core::Platform;

/// One training job as persisted by the local store. Remote providers produce the same shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BTreeMap<String, Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Fields this build does not model, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of reading the whole store: every record that parsed, plus the files that did not.
#[derive(Debug, Default)]
pub struct JobListing {
    pub records: Vec<JobRecord>,
    pub skipped: Vec<crate::StoreError>,
}

impl JobRecord {
    pub fn on(self, platform: Platform) -> PlatformJob {
        PlatformJob {
            record: self,
            platform,
        }
    }
}

/// A record stamped with the provider that returned it. The tag is never written to disk.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlatformJob {
    #[serde(flatten)]
    pub record: JobRecord,
    #[serde(serialize_with = "serialize_platform")]
    pub platform: Platform,
}

fn serialize_platform<S: serde::Serializer>(
    platform: &Platform,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(platform.tag())
}
