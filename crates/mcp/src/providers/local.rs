#![forbid(unsafe_code)]

use super::{JobProvider, ProviderError};
use tm_core::Platform;
use tm_core::ids::JobId;
use tm_storage::{JsonJobStore, PlatformJob};

pub(crate) struct LocalProvider {
    store: JsonJobStore,
}

impl LocalProvider {
    pub(crate) fn new(store: JsonJobStore) -> Self {
        Self { store }
    }
}

impl JobProvider for LocalProvider {
    fn platform(&self) -> Platform {
        Platform::Local
    }

    fn is_configured(&self) -> bool {
        true
    }

    fn get(&self, job_id: &str) -> Result<PlatformJob, ProviderError> {
        // An id that cannot name a store file cannot have been created locally.
        let record = match JobId::try_new(job_id) {
            Ok(id) => self.store.get(&id)?,
            Err(_) => None,
        };
        match record {
            Some(record) => Ok(record.on(Platform::Local)),
            None => Err(ProviderError::NotFound {
                platform: Platform::Local,
                job_id: job_id.to_string(),
            }),
        }
    }

    fn list(&self) -> Result<Vec<PlatformJob>, ProviderError> {
        let listing = self.store.list()?;
        for err in &listing.skipped {
            tracing::warn!(error = %err, "skipping unreadable job document");
        }
        Ok(listing
            .records
            .into_iter()
            .map(|record| record.on(Platform::Local))
            .collect())
    }
}
