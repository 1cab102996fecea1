use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;
use tripfinder_core::{Dataset, DatasetProvider, Error, Result};
use url::Url;

/// Fetches the dataset document over HTTP(S). One attempt, no retries.
pub struct HttpDatasetProvider {
    client: Client,
    url: Url,
}

impl HttpDatasetProvider {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tripfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Fetch {
                location: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { client, url })
    }

    fn fetch_error(&self, e: &reqwest::Error) -> Error {
        Error::Fetch {
            location: self.url.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl DatasetProvider for HttpDatasetProvider {
    async fn fetch(&self) -> Result<Dataset> {
        info!("Fetching dataset from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.fetch_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                location: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.fetch_error(&e))?;
        Dataset::from_slice(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const BODY: &str = r#"{
        "beaches": [ { "name": "Bora Bora", "imageUrl": "bora.jpg", "description": "Lagoon." } ],
        "temples": [],
        "countries": [ { "name": "Japan", "timeZone": "Asia/Tokyo", "cities": [ { "name": "Kyoto" } ] } ]
    }"#;

    fn provider(server: &MockServer, path: &str) -> HttpDatasetProvider {
        let url = Url::parse(&server.url(path)).unwrap();
        HttpDatasetProvider::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_parses_document() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/travel.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(BODY);
            })
            .await;

        let dataset = provider(&server, "/travel.json").fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(dataset.beaches[0].name, "Bora Bora");
        assert_eq!(dataset.countries[0].time_zone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(dataset.city_count(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.json");
                then.status(404);
            })
            .await;

        let err = provider(&server, "/missing.json").fetch().await.unwrap_err();

        match err {
            Error::Status { location, status } => {
                assert_eq!(status, 404);
                assert!(location.ends_with("/missing.json"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/travel.json");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = provider(&server, "/travel.json").fetch().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{port}/travel.json")).unwrap();
        let provider = HttpDatasetProvider::new(url, Duration::from_secs(5)).unwrap();

        let err = provider.fetch().await.unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }), "got {err:?}");
        assert_eq!(provider.describe(), format!("http://127.0.0.1:{port}/travel.json"));
    }
}
