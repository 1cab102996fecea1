//! In-memory travel dataset.
//!
//! The JSON document has three top-level collections: `beaches`, `temples`
//! and `countries` (each country carrying its own `cities`). Every field other
//! than the collections themselves is optional on the wire and falls back to
//! an empty value, so a sparse record still renders.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;

/// Read-only dataset shared by every search for the lifetime of the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub beaches: Vec<Place>,
    #[serde(default)]
    pub temples: Vec<Place>,
    #[serde(default)]
    pub countries: Vec<Country>,
}

/// A beach or temple entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub cities: Vec<City>,
}

/// A city inside a [`Country`]. Cities inherit the country's time zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

impl Dataset {
    /// Parse a dataset from its JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a dataset from raw bytes, as returned by a file read or HTTP body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.countries.iter().map(|c| c.cities.len()).sum()
    }
}

/// Treat `""` and `null` the same as a missing field.
fn non_empty_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_shape() {
        let json = r#"{
            "countries": [
                {
                    "id": 1,
                    "name": "Japan",
                    "timeZone": "Asia/Tokyo",
                    "cities": [
                        { "name": "Kyoto, Japan", "imageUrl": "kyoto.jpg", "description": "Temples." }
                    ]
                }
            ],
            "temples": [
                { "id": 1, "name": "Angkor Wat", "imageUrl": "angkor.jpg", "description": "Khmer." }
            ],
            "beaches": []
        }"#;

        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.countries.len(), 1);
        assert_eq!(dataset.countries[0].time_zone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(dataset.countries[0].cities[0].image_url, "kyoto.jpg");
        assert_eq!(dataset.temples[0].time_zone, None);
        assert_eq!(dataset.city_count(), 1);
    }

    #[test]
    fn missing_fields_become_empty() {
        let json = r#"{ "beaches": [ { "name": "Bora Bora" } ], "countries": [ { "name": "Chile" } ] }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert_eq!(dataset.beaches[0].description, "");
        assert_eq!(dataset.beaches[0].image_url, "");
        assert!(dataset.temples.is_empty());
        assert!(dataset.countries[0].cities.is_empty());
    }

    #[test]
    fn empty_time_zone_is_absent() {
        let json = r#"{ "beaches": [ { "name": "Copacabana", "timeZone": "" }, { "name": "Bondi", "timeZone": null } ] }"#;
        let dataset = Dataset::from_json(json).unwrap();

        assert!(dataset.beaches.iter().all(|b| b.time_zone.is_none()));
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(Dataset::from_json("{ \"beaches\": [").is_err());
        assert!(Dataset::from_json("42").is_err());
    }
}
