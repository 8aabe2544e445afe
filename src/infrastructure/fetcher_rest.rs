use std::time::Duration;

use anyhow::Context;
use log::debug;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;
use tokio::time::timeout;

use crate::{
    ApiRateLimit, FetchError, FetchResult, PageRequest, PageResponse, RepositoryPageFetcher,
    RepositoryRecord, StdResult,
};

const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Deserialize, Debug)]
struct RepositoryItem {
    name: String,
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
    owner: Option<Owner>,
}

#[derive(Deserialize, Debug)]
struct Owner {
    login: String,
}

impl From<RepositoryItem> for RepositoryRecord {
    fn from(item: RepositoryItem) -> Self {
        RepositoryRecord::new(
            &item.name,
            item.stargazers_count.unwrap_or_default(),
            item.forks_count.unwrap_or_default(),
            item.owner.as_ref().map(|owner| owner.login.as_str()),
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

/// Fetches the repository listing of an account from the GitHub REST API.
pub struct RestPageFetcher {
    client: Client,
    listing_url: String,
    token: Option<String>,
    request_timeout: Duration,
}

impl RestPageFetcher {
    /// Creates a new `RestPageFetcher` for the repositories of `username`.
    ///
    /// An empty token is treated as no token.
    pub fn try_new(
        api_base_url: &str,
        username: &str,
        token: Option<String>,
        request_timeout: Duration,
    ) -> StdResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            listing_url: format!(
                "{}/users/{username}/repos",
                api_base_url.trim_end_matches('/')
            ),
            token: token.filter(|token| !token.is_empty()),
            request_timeout,
        })
    }

    async fn send(&self, request: &PageRequest) -> FetchResult<PageResponse> {
        let mut query = vec![("per_page", request.per_page.to_string())];
        if let Some(page) = request.page {
            query.push(("page", page.to_string()));
        }
        query.push(("sort", "updated".to_string()));
        query.push(("direction", "desc".to_string()));

        let mut builder = self
            .client
            .get(&self.listing_url)
            .query(&query)
            .header("Cache-Control", "no-store");
        if request.authenticated {
            if let Some(token) = &self.token {
                builder = builder.bearer_auth(token);
            }
        }

        let response = builder.send().await?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(FetchError::Unauthorized),
            StatusCode::FORBIDDEN => return Err(FetchError::Forbidden),
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status => return Err(FetchError::Status(status.as_u16())),
        }
        let rate_limit = parse_rate_limit(response.headers());
        let items = response.json::<Vec<RepositoryItem>>().await?;

        Ok(PageResponse::new(
            items.into_iter().map(RepositoryRecord::from).collect(),
            rate_limit,
        ))
    }
}

fn parse_rate_limit(headers: &HeaderMap) -> Option<ApiRateLimit> {
    let read = |name: &str| headers.get(name)?.to_str().ok()?.parse::<i64>().ok();

    Some(ApiRateLimit {
        limit: u32::try_from(read("x-ratelimit-limit")?).ok()?,
        remaining: u32::try_from(read("x-ratelimit-remaining")?).ok()?,
        reset_at: read("x-ratelimit-reset")?,
    })
}

#[async_trait::async_trait]
impl RepositoryPageFetcher for RestPageFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> FetchResult<PageResponse> {
        debug!("Fetching {request}");
        // Dropping the request future on expiry cancels it.
        match timeout(self.request_timeout, self.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }

    fn has_credentials(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    fn mock_json_value() -> serde_json::Value {
        json!([
            {
                "name": "repository-1",
                "stargazers_count": 10,
                "forks_count": 2,
                "owner": { "login": "octo" }
            },
            {
                "name": "repository-2",
                "stargazers_count": null,
                "owner": { "login": "octo" }
            }
        ])
    }

    fn build_fetcher(server: &MockServer, token: Option<&str>) -> RestPageFetcher {
        RestPageFetcher::try_new(
            &server.base_url(),
            "octo",
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/octo/repos")
                .query_param("per_page", "100")
                .query_param("page", "2")
                .query_param("sort", "updated")
                .query_param("direction", "desc")
                .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
            then.status(200)
                .header("Content-Type", "application/json")
                .header("x-ratelimit-limit", "60")
                .header("x-ratelimit-remaining", "58")
                .header("x-ratelimit-reset", "1735689600")
                .json_body(mock_json_value());
        });
        let fetcher = build_fetcher(&server, None);

        let response = fetcher
            .fetch_page(&PageRequest::new(2, 100, false))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(
            PageResponse::new(
                vec![
                    RepositoryRecord::new("repository-1", 10, 2, Some("octo")),
                    RepositoryRecord::new("repository-2", 0, 0, Some("octo")),
                ],
                Some(ApiRateLimit {
                    limit: 60,
                    remaining: 58,
                    reset_at: 1735689600,
                })
            ),
            response
        );
    }

    #[tokio::test]
    async fn test_fetch_page_with_credentials() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/octo/repos")
                .header("Authorization", "Bearer secret");
            then.status(200).json_body(json!([]));
        });
        let fetcher = build_fetcher(&server, Some("secret"));

        let response = fetcher
            .fetch_page(&PageRequest::new(1, 100, true))
            .await
            .unwrap();

        mock.assert();
        assert!(response.repositories().is_empty());
        assert!(fetcher.has_credentials());
    }

    #[tokio::test]
    async fn test_fetch_page_anonymous_request_omits_credentials() {
        let server = MockServer::start();
        let authorized_mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/octo/repos")
                .header_exists("Authorization");
            then.status(401);
        });
        let mock = server.mock(|when, then| {
            when.method("GET").path("/users/octo/repos");
            then.status(200).json_body(json!([]));
        });
        let fetcher = build_fetcher(&server, Some("secret"));

        fetcher
            .fetch_page(&PageRequest::new(1, 100, false))
            .await
            .unwrap();

        authorized_mock.assert_hits(0);
        mock.assert();
    }

    #[tokio::test]
    async fn test_fallback_request_is_unpaginated() {
        let server = MockServer::start();
        let paginated_mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/octo/repos")
                .query_param_exists("page");
            then.status(500);
        });
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/users/octo/repos")
                .query_param("per_page", "100");
            then.status(200).json_body(json!([]));
        });
        let fetcher = build_fetcher(&server, None);

        fetcher
            .fetch_page(&PageRequest::fallback(100))
            .await
            .unwrap();

        paginated_mock.assert_hits(0);
        mock.assert();
    }

    #[tokio::test]
    async fn test_empty_token_is_no_credentials() {
        let server = MockServer::start();
        let fetcher = build_fetcher(&server, Some(""));

        assert!(!fetcher.has_credentials());
    }

    #[tokio::test]
    async fn test_fetch_page_classifies_statuses() {
        for (status, expected) in [
            (401, FetchError::Unauthorized),
            (403, FetchError::Forbidden),
            (404, FetchError::NotFound),
            (502, FetchError::Status(502)),
        ] {
            let server = MockServer::start();
            server.mock(|when, then| {
                when.method("GET").path("/users/octo/repos");
                then.status(status);
            });
            let fetcher = build_fetcher(&server, None);

            let error = fetcher
                .fetch_page(&PageRequest::new(1, 100, false))
                .await
                .expect_err("Expected a failure");

            assert_eq!(expected, error);
        }
    }

    #[tokio::test]
    async fn test_fetch_page_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/octo/repos");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!([]));
        });
        let fetcher = RestPageFetcher::try_new(
            &server.base_url(),
            "octo",
            None,
            Duration::from_millis(50),
        )
        .unwrap();

        let error = fetcher
            .fetch_page(&PageRequest::new(1, 100, false))
            .await
            .expect_err("Expected a timeout");

        assert_eq!(FetchError::Timeout, error);
    }

    #[tokio::test]
    async fn test_fetch_page_invalid_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/users/octo/repos");
            then.status(200).body("not json");
        });
        let fetcher = build_fetcher(&server, None);

        let error = fetcher
            .fetch_page(&PageRequest::new(1, 100, false))
            .await
            .expect_err("Expected a decode failure");

        assert!(matches!(error, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_unreachable_endpoint() {
        let fetcher = RestPageFetcher::try_new(
            "http://127.0.0.1:1",
            "octo",
            None,
            Duration::from_secs(5),
        )
        .unwrap();

        let error = fetcher
            .fetch_page(&PageRequest::new(1, 100, false))
            .await
            .expect_err("Expected a transport failure");

        assert!(matches!(error, FetchError::Transport(_)));
    }
}
