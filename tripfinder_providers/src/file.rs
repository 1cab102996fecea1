use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;
use tripfinder_core::{Dataset, DatasetProvider, Result};

/// Reads the dataset from a JSON file on disk.
pub struct FileDatasetProvider {
    path: PathBuf,
}

impl FileDatasetProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetProvider for FileDatasetProvider {
    async fn fetch(&self) -> Result<Dataset> {
        info!("Reading dataset from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        Dataset::from_slice(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
