#![forbid(unsafe_code)]

use super::*;
use tm_core::ids::JobId;

const JOB_FILE_PREFIX: &str = "job_";
const JOB_FILE_SUFFIX: &str = ".json";

pub(crate) fn job_file_name(job_id: &JobId) -> String {
    format!("{JOB_FILE_PREFIX}{}{JOB_FILE_SUFFIX}", job_id.as_str())
}

fn is_job_file_name(name: &str) -> bool {
    name.len() > JOB_FILE_PREFIX.len() + JOB_FILE_SUFFIX.len()
        && name.starts_with(JOB_FILE_PREFIX)
        && name.ends_with(JOB_FILE_SUFFIX)
}

impl JsonJobStore {
    pub fn job_path(&self, job_id: &JobId) -> PathBuf {
        self.storage_dir.join(job_file_name(job_id))
    }

    pub fn get(&self, job_id: &JobId) -> Result<Option<JobRecord>, StoreError> {
        let path = self.job_path(job_id);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        parse_record(&path, &text).map(Some)
    }

    /// All stored records, ordered by file name. A file that cannot be read or parsed is
    /// reported in `skipped` and does not hide the others.
    pub fn list(&self) -> Result<JobListing, StoreError> {
        let entries = match std::fs::read_dir(&self.storage_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(JobListing::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !is_job_file_name(name) || !entry.file_type()?.is_file() {
                continue;
            }
            paths.push(entry.path());
        }
        paths.sort();

        let mut listing = JobListing::default();
        for path in paths {
            let parsed = std::fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|text| parse_record(&path, &text));
            match parsed {
                Ok(record) => listing.records.push(record),
                Err(err) => listing.skipped.push(err),
            }
        }
        Ok(listing)
    }

    pub fn put(&self, request: CreateJobRequest) -> Result<JobRecord, StoreError> {
        if request.status.trim().is_empty() {
            return Err(StoreError::InvalidInput("status must not be empty"));
        }

        let path = self.job_path(&request.job_id);
        let record = JobRecord {
            job_id: request.job_id.into_string(),
            status: request.status,
            created_at: Some(request.created_at),
            model: request.model,
            metrics: request.metrics,
            progress: request.progress,
            extra: serde_json::Map::new(),
        };

        let text = serde_json::to_string_pretty(&record).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        std::fs::create_dir_all(&self.storage_dir)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &path)?;
        Ok(record)
    }
}

fn parse_record(path: &Path, text: &str) -> Result<JobRecord, StoreError> {
    let mut record =
        serde_json::from_str::<JobRecord>(text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    // The platform tag is stamped on the way out, never read back from disk.
    record.extra.remove("platform");
    Ok(record)
}
