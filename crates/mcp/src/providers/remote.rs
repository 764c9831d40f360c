#![forbid(unsafe_code)]

use super::{JobProvider, ProviderError};
use crate::{SageMakerSettings, VertexSettings};
use tm_core::Platform;
use tm_storage::{JobRecord, PlatformJob};

/// Remote listings report at most this many of the most recent jobs.
pub(crate) const REMOTE_LIST_LIMIT: usize = 10;

#[derive(Debug)]
pub(crate) enum ClientError {
    Unavailable,
    /// The platform answered with an error. Only SDK-backed clients produce this.
    #[cfg_attr(not(test), allow(dead_code))]
    Failed(String),
}

/// The cloud SDK seam. Implementations translate the platform's own job description into a
/// [`JobRecord`]; `Ok(None)` means the platform does not know the job.
pub(crate) trait TrainingJobClient {
    fn describe(&self, job_id: &str) -> Result<Option<JobRecord>, ClientError>;

    fn list_recent(&self, limit: usize) -> Result<Vec<JobRecord>, ClientError>;
}

/// Client used when this build carries no SDK for the platform.
pub(crate) struct UnavailableClient;

impl TrainingJobClient for UnavailableClient {
    fn describe(&self, _job_id: &str) -> Result<Option<JobRecord>, ClientError> {
        Err(ClientError::Unavailable)
    }

    fn list_recent(&self, _limit: usize) -> Result<Vec<JobRecord>, ClientError> {
        Err(ClientError::Unavailable)
    }
}

enum Credentials {
    SageMaker(SageMakerSettings),
    Vertex(VertexSettings),
}

pub(crate) struct RemoteProvider {
    platform: Platform,
    credentials: Credentials,
    client: Box<dyn TrainingJobClient>,
}

impl RemoteProvider {
    pub(crate) fn sagemaker(
        settings: SageMakerSettings,
        client: Box<dyn TrainingJobClient>,
    ) -> Self {
        Self {
            platform: Platform::SageMaker,
            credentials: Credentials::SageMaker(settings),
            client,
        }
    }

    pub(crate) fn vertex(settings: VertexSettings, client: Box<dyn TrainingJobClient>) -> Self {
        Self {
            platform: Platform::VertexAi,
            credentials: Credentials::Vertex(settings),
            client,
        }
    }

    fn ensure_ready(&self) -> Result<(), ProviderError> {
        match &self.credentials {
            Credentials::SageMaker(settings) => {
                let missing = settings.missing();
                if !missing.is_empty() {
                    return Err(ProviderError::NotConfigured {
                        platform: self.platform,
                        detail: format!("missing {}", missing.join(", ")),
                    });
                }
                tracing::debug!(region = settings.region(), "querying SageMaker");
            }
            Credentials::Vertex(settings) => {
                if !settings.is_configured() {
                    return Err(ProviderError::NotConfigured {
                        platform: self.platform,
                        detail: "missing GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_CLOUD_PROJECT"
                            .to_string(),
                    });
                }
                let Some(project) = settings.project.as_deref() else {
                    return Err(ProviderError::NotConfigured {
                        platform: self.platform,
                        detail: "GOOGLE_CLOUD_PROJECT not set".to_string(),
                    });
                };
                tracing::debug!(project, location = settings.location(), "querying Vertex AI");
            }
        }
        Ok(())
    }

    fn client_error(&self, err: ClientError) -> ProviderError {
        match err {
            ClientError::Unavailable => ProviderError::Unavailable {
                platform: self.platform,
                detail: "client is not available in this build".to_string(),
            },
            ClientError::Failed(detail) => ProviderError::Remote {
                platform: self.platform,
                detail,
            },
        }
    }

    fn stamp(&self, mut record: JobRecord) -> PlatformJob {
        record.status = record.status.to_ascii_lowercase();
        record.on(self.platform)
    }
}

impl JobProvider for RemoteProvider {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn is_configured(&self) -> bool {
        match &self.credentials {
            Credentials::SageMaker(settings) => settings.is_configured(),
            Credentials::Vertex(settings) => settings.is_configured(),
        }
    }

    fn get(&self, job_id: &str) -> Result<PlatformJob, ProviderError> {
        self.ensure_ready()?;
        match self.client.describe(job_id) {
            Ok(Some(record)) => Ok(self.stamp(record)),
            Ok(None) => Err(ProviderError::NotFound {
                platform: self.platform,
                job_id: job_id.to_string(),
            }),
            Err(err) => Err(self.client_error(err)),
        }
    }

    fn list(&self) -> Result<Vec<PlatformJob>, ProviderError> {
        self.ensure_ready()?;
        let records = self
            .client
            .list_recent(REMOTE_LIST_LIMIT)
            .map_err(|err| self.client_error(err))?;
        Ok(records
            .into_iter()
            .take(REMOTE_LIST_LIMIT)
            .map(|record| self.stamp(record))
            .collect())
    }
}
