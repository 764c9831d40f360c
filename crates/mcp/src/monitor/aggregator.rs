#![forbid(unsafe_code)]

use crate::providers::JobProvider;
use serde_json::{Map, Value, json};
use tm_core::Platform;
use tm_storage::PlatformJob;

/// Answers "what is the status of job X (or of all jobs)" across every provider.
pub(crate) struct StatusAggregator {
    providers: Vec<Box<dyn JobProvider>>,
}

#[derive(Debug)]
pub(crate) enum StatusReport {
    Job(PlatformJob),
    NotFound {
        job_id: String,
        errors: Vec<String>,
    },
    ProviderFailed {
        platform: Platform,
        job_id: Option<String>,
        error: String,
    },
    Summary {
        jobs: Vec<PlatformJob>,
        platforms: Vec<(Platform, bool)>,
        warnings: Vec<String>,
    },
}

impl StatusAggregator {
    /// Providers are kept in [`Platform::ALL`] order regardless of the order given here, so
    /// short-circuit precedence never depends on construction order.
    pub(crate) fn new(mut providers: Vec<Box<dyn JobProvider>>) -> Self {
        providers.sort_by_key(|p| p.platform());
        Self { providers }
    }

    fn provider(&self, platform: Platform) -> Option<&dyn JobProvider> {
        self.providers
            .iter()
            .find(|p| p.platform() == platform)
            .map(|p| p.as_ref())
    }

    fn candidates(&self, filter: Option<Platform>) -> Vec<&dyn JobProvider> {
        match filter {
            Some(platform) => self.provider(platform).into_iter().collect(),
            None => self
                .providers
                .iter()
                .filter(|p| p.platform() == Platform::Local || p.is_configured())
                .map(|p| p.as_ref())
                .collect(),
        }
    }

    pub(crate) fn platforms(&self) -> Vec<(Platform, bool)> {
        self.providers
            .iter()
            .map(|p| (p.platform(), p.is_configured()))
            .collect()
    }

    pub(crate) fn get_status(
        &self,
        job_id: Option<&str>,
        filter: Option<Platform>,
    ) -> StatusReport {
        let mut jobs = Vec::new();
        let mut warnings = Vec::new();

        for provider in self.candidates(filter) {
            let platform = provider.platform();
            let explicit = filter == Some(platform);

            let outcome = match job_id {
                Some(job_id) => provider.get(job_id).map(|job| vec![job]),
                None => provider.list(),
            };
            match outcome {
                Ok(found) => {
                    if job_id.is_some() {
                        if let Some(job) = found.into_iter().next() {
                            return StatusReport::Job(job);
                        }
                        continue;
                    }
                    jobs.extend(found);
                }
                // A local miss is expected while sweeping every platform; it only matters when
                // the caller asked the local store specifically.
                Err(err) if err.is_not_found() => {
                    if platform.is_remote() || explicit {
                        warnings.push(err.to_string());
                    }
                }
                Err(err) if explicit => {
                    tracing::warn!(platform = %platform, error = %err, "status query failed");
                    return StatusReport::ProviderFailed {
                        platform,
                        job_id: job_id.map(|id| id.to_string()),
                        error: err.to_string(),
                    };
                }
                Err(err) => {
                    tracing::warn!(platform = %platform, error = %err, "provider skipped");
                    warnings.push(err.to_string());
                }
            }
        }

        if let Some(job_id) = job_id {
            return StatusReport::NotFound {
                job_id: job_id.to_string(),
                errors: warnings,
            };
        }

        StatusReport::Summary {
            jobs,
            platforms: self.platforms(),
            warnings,
        }
    }
}

impl StatusReport {
    pub(crate) fn to_json(&self) -> Value {
        match self {
            Self::Job(job) => serde_json::to_value(job).unwrap_or(Value::Null),
            Self::NotFound { job_id, errors } => {
                let mut out = Map::new();
                out.insert(
                    "error".to_string(),
                    Value::String(format!("Job {job_id} not found on any platform")),
                );
                out.insert("job_id".to_string(), Value::String(job_id.clone()));
                if !errors.is_empty() {
                    out.insert("errors".to_string(), json!(errors));
                }
                Value::Object(out)
            }
            Self::ProviderFailed {
                platform,
                job_id,
                error,
            } => {
                let mut out = Map::new();
                out.insert("error".to_string(), Value::String(error.clone()));
                out.insert("platform".to_string(), Value::String(platform.tag().to_string()));
                if let Some(job_id) = job_id {
                    out.insert("job_id".to_string(), Value::String(job_id.clone()));
                }
                Value::Object(out)
            }
            Self::Summary {
                jobs,
                platforms,
                warnings,
            } => {
                let mut platform_map = Map::new();
                for (platform, enabled) in platforms {
                    platform_map.insert(platform.tag().to_string(), Value::Bool(*enabled));
                }
                let mut out = Map::new();
                out.insert("total_jobs".to_string(), json!(jobs.len()));
                out.insert(
                    "jobs".to_string(),
                    serde_json::to_value(jobs).unwrap_or_else(|_| json!([])),
                );
                out.insert("platforms".to_string(), Value::Object(platform_map));
                if !warnings.is_empty() {
                    out.insert("warnings".to_string(), json!(warnings));
                }
                Value::Object(out)
            }
        }
    }
}
