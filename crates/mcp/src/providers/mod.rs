#![forbid(unsafe_code)]

mod local;
mod remote;

pub(crate) use local::LocalProvider;
pub(crate) use remote::{
    ClientError, REMOTE_LIST_LIMIT, RemoteProvider, TrainingJobClient, UnavailableClient,
};

use tm_core::Platform;
use tm_storage::{PlatformJob, StoreError};

/// Uniform capability every status source exposes to the aggregator.
pub(crate) trait JobProvider {
    fn platform(&self) -> Platform;

    /// Whether the prerequisites (credentials, config) for this provider are present.
    fn is_configured(&self) -> bool;

    /// Job ids are the caller's raw strings; each provider decides what it can look up.
    fn get(&self, job_id: &str) -> Result<PlatformJob, ProviderError>;

    fn list(&self) -> Result<Vec<PlatformJob>, ProviderError>;
}

#[derive(Debug)]
pub(crate) enum ProviderError {
    NotFound { platform: Platform, job_id: String },
    NotConfigured { platform: Platform, detail: String },
    Unavailable { platform: Platform, detail: String },
    Remote { platform: Platform, detail: String },
    Store(StoreError),
}

impl ProviderError {
    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound {
                platform: Platform::Local,
                job_id,
            } => write!(f, "Job {job_id} not found"),
            Self::NotFound { platform, job_id } => {
                write!(f, "Job {job_id} not found on {}", platform.display_name())
            }
            Self::NotConfigured { platform, detail } => {
                write!(f, "{} not configured: {detail}", platform.display_name())
            }
            Self::Unavailable { platform, detail } => {
                write!(f, "{} unavailable: {detail}", platform.display_name())
            }
            Self::Remote { platform, detail } => {
                write!(f, "{} error: {detail}", platform.display_name())
            }
            Self::Store(err) => write!(f, "Local store error: {err}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ProviderError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
