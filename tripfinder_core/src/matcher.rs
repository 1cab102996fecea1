//! Keyword matching against the dataset.
//!
//! Three independent rules run in a fixed order and each appends its cards:
//! beaches, temples, then the first country whose name contains the key.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Country, Dataset, Place};

const BEACH_KEYWORD: &str = "beach";
const TEMPLE_KEYWORD: &str = "temple";

/// One renderable search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCard {
    pub title: String,
    pub img: String,
    pub desc: String,
    pub time_zone: Option<String>,
}

impl MatchCard {
    /// Whether this card needs a live clock.
    #[must_use]
    pub const fn is_time_bearing(&self) -> bool {
        self.time_zone.is_some()
    }

    fn from_place(place: &Place) -> Self {
        Self {
            title: place.name.clone(),
            img: place.image_url.clone(),
            desc: place.description.clone(),
            time_zone: place.time_zone.clone(),
        }
    }
}

/// Result caps per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLimits {
    /// Cards taken from `beaches` or `temples` when their rule fires.
    pub per_category: usize,
    /// Cities taken from the matched country.
    pub cities_per_country: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            per_category: 2,
            cities_per_country: 2,
        }
    }
}

/// Match a canonical key against the dataset.
///
/// Pure function of its inputs. An empty result means nothing matched.
#[must_use]
pub fn match_keyword(key: &str, dataset: &Dataset, limits: MatchLimits) -> Vec<MatchCard> {
    let mut out = Vec::new();

    if key.contains(BEACH_KEYWORD) {
        out.extend(
            dataset
                .beaches
                .iter()
                .take(limits.per_category)
                .map(MatchCard::from_place),
        );
    }

    if key.contains(TEMPLE_KEYWORD) {
        out.extend(
            dataset
                .temples
                .iter()
                .take(limits.per_category)
                .map(MatchCard::from_place),
        );
    }

    if let Some(country) = find_country(key, &dataset.countries) {
        debug!("Key {key:?} matched country {}", country.name);
        out.extend(
            country
                .cities
                .iter()
                .take(limits.cities_per_country)
                .map(|city| MatchCard {
                    title: format!("{}, {}", city.name, country.name),
                    img: city.image_url.clone(),
                    desc: city.description.clone(),
                    time_zone: country.time_zone.clone(),
                }),
        );
    }

    out
}

/// First country, in collection order, whose lower-cased name equals or
/// contains the key. An earlier partial match wins over a later exact one.
fn find_country<'a>(key: &str, countries: &'a [Country]) -> Option<&'a Country> {
    countries.iter().find(|c| {
        let name = c.name.to_lowercase();
        name == key || name.contains(key)
    })
}
