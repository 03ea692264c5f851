use crate::config::toml_config::ProviderConfig;
use crate::core::provider::ProviderKind;
use crate::domain::model::VacancyPage;
use crate::domain::ports::PageSource;
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("salary-stats/", env!("CARGO_PKG_VERSION"));
const SUPERJOB_KEY_HEADER: &str = "X-Api-App-Id";

/// Page source backed by a provider's public REST API.
pub struct HttpPageSource {
    client: Client,
    provider: ProviderConfig,
    timeout: Option<Duration>,
}

impl HttpPageSource {
    pub fn new(provider: ProviderConfig, timeout_seconds: Option<u64>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            provider,
            timeout: timeout_seconds.map(Duration::from_secs),
        })
    }

    fn build_request(&self, term: &str, page: u64) -> reqwest::RequestBuilder {
        let kind = self.provider.kind;
        let mut request = self
            .client
            .get(self.provider.endpoint())
            .query(&[(kind.term_param(), term)])
            .query(&[("page", page)]);

        if kind == ProviderKind::SuperJob {
            request = request.query(&[("count", self.provider.count())]);
            if let Some(key) = &self.provider.api_key {
                request = request.header(SUPERJOB_KEY_HEADER, key);
            }
        }

        if let Some(params) = &self.provider.parameters {
            for (key, value) in params {
                request = request.query(&[(key, value)]);
            }
        }

        if let Some(headers) = &self.provider.headers {
            for (key, value) in headers {
                request = request.header(key, value);
            }
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        request
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    fn label(&self) -> &str {
        self.provider.label()
    }

    fn kind(&self) -> ProviderKind {
        self.provider.kind
    }

    async fn fetch_page(&self, term: &str, page: u64) -> Result<VacancyPage> {
        tracing::debug!("Requesting {} page {} for '{}'", self.label(), page, term);

        let response = self.build_request(term, page).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::HttpStatus {
                provider: self.label().to_string(),
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        self.provider.kind.parse_page(self.label(), page, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn provider(kind: ProviderKind, endpoint: String) -> ProviderConfig {
        let mut provider = ProviderConfig::new(kind);
        provider.endpoint = Some(endpoint);
        provider
    }

    #[tokio::test]
    async fn test_headhunter_request_shape() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/vacancies")
                .query_param("text", "Python")
                .query_param("page", "3")
                .query_param("area", "1");
            then.status(200).json_body(json!({
                "found": 250,
                "per_page": 20,
                "pages": 13,
                "items": [{"salary": {"from": 100, "to": 200, "currency": "RUR"}}]
            }));
        });

        let mut config = provider(ProviderKind::HeadHunter, server.url("/vacancies"));
        config.parameters = Some(BTreeMap::from([("area".to_string(), "1".to_string())]));
        let source = HttpPageSource::new(config, Some(5)).unwrap();

        let page = source.fetch_page("Python", 3).await.unwrap();

        api_mock.assert();
        assert_eq!(page.index, 3);
        assert_eq!(page.found, 250);
        assert_eq!(page.page_bound, 20);
        assert_eq!(page.has_more, Some(true));
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_superjob_sends_key_and_count() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/2.0/vacancies/")
                .header("x-api-app-id", "secret")
                .query_param("keywords", "Java")
                .query_param("page", "0")
                .query_param("count", "100");
            then.status(200)
                .json_body(json!({"total": 0, "more": false, "objects": []}));
        });

        let mut config = provider(ProviderKind::SuperJob, server.url("/2.0/vacancies/"));
        config.api_key = Some("secret".to_string());
        let source = HttpPageSource::new(config, None).unwrap();

        let page = source.fetch_page("Java", 0).await.unwrap();

        api_mock.assert();
        assert_eq!(page.found, 0);
        assert_eq!(page.has_more, Some(false));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/vacancies");
            then.status(503);
        });

        let source = HttpPageSource::new(
            provider(ProviderKind::HeadHunter, server.url("/vacancies")),
            None,
        )
        .unwrap();

        let err = source.fetch_page("Ruby", 0).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, StatsError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/vacancies");
            then.status(200).json_body(json!({"per_page": 20, "items": []}));
        });

        let source = HttpPageSource::new(
            provider(ProviderKind::HeadHunter, server.url("/vacancies")),
            None,
        )
        .unwrap();

        let err = source.fetch_page("Ruby", 0).await.unwrap_err();
        assert!(matches!(err, StatsError::MalformedPage { ref field, .. } if field == "found"));
    }
}
