#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Dataset providers: local JSON files and HTTP(S) documents.

use std::time::Duration;

use tripfinder_core::{DatasetProvider, Error, Result};
use url::Url;

mod file;
mod http;

pub use file::FileDatasetProvider;
pub use http::HttpDatasetProvider;

/// Pick a provider for a dataset source string.
///
/// `http` and `https` URLs are fetched over the network, `file` URLs and
/// anything that is not a URL are read from disk.
pub fn provider_for_source(source: &str, timeout: Duration) -> Result<Box<dyn DatasetProvider>> {
    match Url::parse(source) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(Box::new(HttpDatasetProvider::new(url, timeout)?)),
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| Error::UnsupportedSource(source.to_string()))?;
                Ok(Box::new(FileDatasetProvider::new(path)))
            }
            // Windows drive letters parse as a one-letter scheme.
            scheme if scheme.len() == 1 => Ok(Box::new(FileDatasetProvider::new(source))),
            _ => Err(Error::UnsupportedSource(source.to_string())),
        },
        Err(_) => Ok(Box::new(FileDatasetProvider::new(source))),
    }
}
