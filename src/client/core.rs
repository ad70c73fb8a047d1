// File: src/client/core.rs

use crate::client::error::SearchError;
use crate::config::Config;
use crate::model::PlantList;

use http::{Request, Uri, header};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::future::Future;
use std::time::Duration;
use url::Url;

type HttpsClient = Client<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    String,
>;

/// Anything that can answer a species-name query.
pub trait PlantSearch: Send + Sync {
    fn fetch_plants(
        &self,
        species_name: &str,
    ) -> impl Future<Output = Result<PlantList, SearchError>> + Send;
}

#[derive(Clone, Debug)]
pub struct SearchClient {
    http: HttpsClient,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl SearchClient {
    /// Builds the HTTPS client. The key and endpoint are only validated when a
    /// request is made, so a bad config surfaces as a search error.
    pub fn new(config: &Config) -> Self {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            log::warn!("No valid system certificates found, HTTPS requests will fail.");
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();
        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http = Client::builder(TokioExecutor::new()).build(https_connector);
        Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base_url>?key=<api_key>&q=<species_name>`, percent-encoded.
    pub fn request_uri(&self, species_name: &str) -> Result<Uri, SearchError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SearchError::Configuration("no Perenual API key configured".to_string())
            })?;

        let url = Url::parse_with_params(&self.base_url, &[("key", key), ("q", species_name)])
            .map_err(|e| {
                SearchError::Configuration(format!("invalid base URL '{}': {}", self.base_url, e))
            })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SearchError::Configuration(format!(
                "unsupported URL scheme '{}', expected http or https",
                url.scheme()
            )));
        }

        url.as_str()
            .parse::<Uri>()
            .map_err(|e| SearchError::Configuration(format!("invalid request URI: {}", e)))
    }
}

impl PlantSearch for SearchClient {
    async fn fetch_plants(&self, species_name: &str) -> Result<PlantList, SearchError> {
        if self.timeout.is_zero() {
            return Err(SearchError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        let uri = self.request_uri(species_name)?;
        let request = Request::get(uri)
            .header(header::ACCEPT, "application/json")
            .body(String::new())
            .map_err(|e| SearchError::Configuration(e.to_string()))?;

        // Never log the URI itself, it carries the key
        log::debug!("GET {} q={:?}", self.base_url, species_name);

        let exchange = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| SearchError::network(&e))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| SearchError::network(&e))?
                .to_bytes();
            Ok::<_, SearchError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| SearchError::Network("request timed out".to_string()))??;

        if !status.is_success() {
            log::warn!("Plant search failed with HTTP {}", status);
            return Err(SearchError::Status(status.as_u16()));
        }

        let plants: PlantList =
            serde_json::from_slice(&body).map_err(|e| SearchError::Decode(e.to_string()))?;
        log::debug!("Plant search for {:?} returned {} results", species_name, plants.len());
        Ok(plants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use tokio::net::TcpListener;

    const CACTUS_BODY: &str = r#"{
        "data": [
            {"id": 0, "common_name": "Cactus", "scientific_name": ["Cactaceae"], "sunlight": ["full sun"]},
            {"id": 12, "common_name": "Barrel Cactus", "scientific_name": ["Ferocactus"], "default_image": null}
        ],
        "current_page": 1,
        "last_page": 1
    }"#;

    fn config_for(base_url: String) -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            base_url,
            ..Config::default()
        }
    }

    #[test]
    fn test_request_uri_encodes_query() {
        let client = SearchClient::new(&config_for(
            "https://perenual.com/api/species-list".to_string(),
        ));
        let uri = client.request_uri("snake plant & co").unwrap();
        assert_eq!(uri.host(), Some("perenual.com"));
        assert_eq!(uri.path(), "/api/species-list");
        assert_eq!(uri.query(), Some("key=test-key&q=snake+plant+%26+co"));
    }

    #[test]
    fn test_request_uri_allows_empty_query() {
        let client = SearchClient::new(&config_for(
            "https://perenual.com/api/species-list".to_string(),
        ));
        let uri = client.request_uri("").unwrap();
        assert_eq!(uri.query(), Some("key=test-key&q="));
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let mut config = config_for("https://perenual.com/api/species-list".to_string());
        config.api_key = None;
        let client = SearchClient::new(&config);

        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_configuration_error() {
        let client = SearchClient::new(&config_for("not a url".to_string()));
        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_configuration_error() {
        let client = SearchClient::new(&config_for("ftp://example.org/api".to_string()));
        assert!(matches!(
            client.request_uri("cactus"),
            Err(SearchError::Configuration(ref m)) if m.contains("ftp")
        ));
        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert!(matches!(err, SearchError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_is_configuration_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/species-list")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .expect(0)
            .create_async()
            .await;

        let config = Config {
            timeout_secs: 0,
            ..config_for(format!("{}/api/species-list", server.url()))
        };
        let client = SearchClient::new(&config);
        let err = client.fetch_plants("x").await.unwrap_err();

        assert_eq!(
            err,
            SearchError::Configuration("timeout must be greater than zero".to_string())
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_plants_sends_key_query_and_accept_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/species-list")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("q".into(), "cactus".into()),
            ]))
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CACTUS_BODY)
            .create_async()
            .await;

        let client = SearchClient::new(&config_for(format!("{}/api/species-list", server.url())));
        let plants = client.fetch_plants("cactus").await.unwrap();

        mock.assert_async().await;
        assert_eq!(plants.len(), 2);
        assert_eq!(plants.data[0].common_name, "Cactus");
        assert_eq!(plants.data[0].sunlight, Some(vec!["full sun".to_string()]));
        assert_eq!(plants.data[1].id, 12);
        assert_eq!(plants.data[1].default_image, None);
    }

    #[tokio::test]
    async fn test_http_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/species-list")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message": "Invalid API key"}"#)
            .create_async()
            .await;

        let client = SearchClient::new(&config_for(format!("{}/api/species-list", server.url())));
        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert_eq!(err, SearchError::Status(401));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/species-list")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = SearchClient::new(&config_for(format!("{}/api/species-list", server.url())));
        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/species-list")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data": [{"id": 1, "scientific_name": ["Rosa"]}]}"#)
            .create_async()
            .await;

        let client = SearchClient::new(&config_for(format!("{}/api/species-list", server.url())));
        let err = client.fetch_plants("rose").await.unwrap_err();
        match err {
            SearchError::Decode(msg) => assert!(msg.contains("common_name")),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SearchClient::new(&config_for(format!("http://{}/api/species-list", addr)));
        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering
        let _server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = SearchClient::new(&config_for(format!("http://{}/api/species-list", addr)))
            .with_timeout(Duration::from_millis(200));
        let err = client.fetch_plants("cactus").await.unwrap_err();
        assert_eq!(err, SearchError::Network("request timed out".to_string()));
    }
}
