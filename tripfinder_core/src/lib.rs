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

//! Travel recommendation search primitives.
//!
//! Holds the dataset model, keyword normalization and the three-rule matcher
//! that turns a canonical key into an ordered list of [`MatchCard`]s.

use async_trait::async_trait;

pub mod dataset;
pub mod error;
pub mod keyword;
pub mod matcher;

pub use dataset::{City, Country, Dataset, Place};
pub use error::{Error, Result};
pub use keyword::normalize_keyword;
pub use matcher::{MatchCard, MatchLimits, match_keyword};

/// Source of the travel dataset.
///
/// Implementations perform a single fetch; callers decide what to do with a
/// failure (the widget records it and keeps serving a "not loaded" notice).
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    async fn fetch(&self) -> Result<Dataset>;

    /// Human readable location of the dataset, used in logs.
    fn describe(&self) -> String;
}
