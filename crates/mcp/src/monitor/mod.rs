#![forbid(unsafe_code)]

mod aggregator;

pub(crate) use aggregator::{StatusAggregator, StatusReport};

use crate::MonitorConfig;
use crate::providers::{JobProvider, LocalProvider, RemoteProvider, UnavailableClient};
use tm_core::Platform;
use tm_core::ids::JobId;
use tm_storage::{JobRecord, JsonJobStore, StoreError, example_job_request};

pub(crate) const DEMO_JOB_ID: &str = "demo-001";
pub(crate) const DEFAULT_JOB_STATUS: &str = "running";

/// Long-lived request context: the local store plus the aggregator over every provider.
pub(crate) struct TrainingMonitor {
    store: JsonJobStore,
    aggregator: StatusAggregator,
}

impl TrainingMonitor {
    pub(crate) fn open(config: &MonitorConfig) -> Result<Self, StoreError> {
        let store = JsonJobStore::open(&config.log_dir)?;
        let providers: Vec<Box<dyn JobProvider>> = vec![
            Box::new(RemoteProvider::sagemaker(
                config.sagemaker.clone(),
                Box::new(UnavailableClient),
            )),
            Box::new(RemoteProvider::vertex(
                config.vertex.clone(),
                Box::new(UnavailableClient),
            )),
            Box::new(LocalProvider::new(store.clone())),
        ];
        Ok(Self::with_providers(store, providers))
    }

    pub(crate) fn with_providers(store: JsonJobStore, providers: Vec<Box<dyn JobProvider>>) -> Self {
        Self {
            store,
            aggregator: StatusAggregator::new(providers),
        }
    }

    pub(crate) fn store(&self) -> &JsonJobStore {
        &self.store
    }

    pub(crate) fn get_status(
        &self,
        job_id: Option<&str>,
        platform: Option<Platform>,
    ) -> StatusReport {
        self.aggregator.get_status(job_id, platform)
    }

    pub(crate) fn create_example_job(
        &self,
        job_id: JobId,
        status: &str,
    ) -> Result<JobRecord, StoreError> {
        self.store
            .put(example_job_request(job_id, status, crate::now_rfc3339()))
    }

    pub(crate) fn seed_demo_job(&self) -> Result<JobRecord, StoreError> {
        let job_id = JobId::try_new(DEMO_JOB_ID)?;
        self.create_example_job(job_id, DEFAULT_JOB_STATUS)
    }

    pub(crate) fn configured_platforms(&self) -> Vec<(Platform, bool)> {
        self.aggregator.platforms()
    }
}
