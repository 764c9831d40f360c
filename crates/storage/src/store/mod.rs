#![forbid(unsafe_code)]

mod error;
mod jobs;
mod requests;
mod types;

pub use error::StoreError;
pub use requests::*;
pub use types::*;

use std::path::{Path, PathBuf};

/// Directory-of-files job store: one pretty-printed JSON document per job, last write wins.
#[derive(Clone, Debug)]
pub struct JsonJobStore {
    storage_dir: PathBuf,
}

impl JsonJobStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;
        Ok(Self { storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}
