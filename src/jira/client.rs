//! JIRA REST search client.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::{IssueTracker, JiraError};
use crate::audit::IssueId;

/// Apache JIRA instance hosting the HBase project.
pub const DEFAULT_JIRA_URL: &str = "https://issues.apache.org/jira";

/// Project searched when none is configured.
pub const DEFAULT_PROJECT: &str = "HBase";

/// Issues requested per search page.
const PAGE_SIZE: usize = 50;

/// Search API endpoint, relative to the instance base URL.
const SEARCH_ENDPOINT: &str = "rest/api/2/search";

/// JIRA search response page.
#[derive(Deserialize)]
struct SearchResponse {
    total: usize,
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

/// Issue entry of a search page; only the key is requested.
#[derive(Deserialize)]
struct SearchIssue {
    key: String,
}

/// Builds the JQL query for issues fixed in any of the given versions.
pub fn build_jql(project: &str, fix_versions: &[String]) -> Result<String, JiraError> {
    let versions: Vec<&str> = fix_versions
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if versions.is_empty() {
        return Err(JiraError::NoFixVersions);
    }

    Ok(format!(
        "project = {project} AND resolution = Fixed AND fixVersion IN ({})",
        versions.join(",")
    ))
}

/// JIRA search client.
pub struct JiraClient {
    /// HTTP client for API requests.
    client: Client,
    /// Search endpoint URL.
    search_url: Url,
    /// Project key used in queries.
    project: String,
    /// Basic auth (username, API token), if configured.
    credentials: Option<(String, String)>,
}

impl JiraClient {
    /// Creates a client for the JIRA instance at `base_url`.
    pub fn new(base_url: &str, project: impl Into<String>) -> Result<Self> {
        let mut base =
            Url::parse(base_url).map_err(|e| JiraError::InvalidUrl(format!("{base_url}: {e}")))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let search_url = base
            .join(SEARCH_ENDPOINT)
            .map_err(|e| JiraError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .user_agent(concat!("release-audit/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            search_url,
            project: project.into(),
            credentials: None,
        })
    }

    /// Authenticates requests with a username and API token.
    pub fn with_credentials(mut self, username: String, api_token: String) -> Self {
        self.credentials = Some((username, api_token));
        self
    }

    /// Returns the search endpoint URL.
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Fetches one page of search results starting at `start_at`.
    async fn fetch_page(&self, jql: &str, start_at: usize) -> Result<SearchResponse> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("jql", jql)
            .append_pair("startAt", &start_at.to_string())
            .append_pair("maxResults", &PAGE_SIZE.to_string())
            .append_pair("fields", "key");

        debug!(url = %url, start_at, "Requesting JIRA search page");

        let mut builder = self.client.get(url);
        if let Some((ref username, ref api_token)) = self.credentials {
            builder = builder.basic_auth(username, Some(api_token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| JiraError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|e| {
                tracing::debug!("Failed to read error response body: {e}");
                String::new()
            });
            return Err(JiraError::ApiRequestFailed(format!("HTTP {status}: {error_text}")).into());
        }

        let page: SearchResponse = response
            .json()
            .await
            .map_err(|e| JiraError::InvalidResponseFormat(e.to_string()))?;

        Ok(page)
    }
}

impl IssueTracker for JiraClient {
    fn fetch_fixed_issues<'a>(
        &'a self,
        fix_versions: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<BTreeSet<IssueId>>> + Send + 'a>> {
        Box::pin(async move {
            let jql = build_jql(&self.project, fix_versions)?;
            info!(jql = %jql, "Searching JIRA for fixed issues");

            let mut issues = BTreeSet::new();
            let mut start_at = 0;
            loop {
                let page = self.fetch_page(&jql, start_at).await?;
                let page_len = page.issues.len();
                issues.extend(page.issues.iter().map(|issue| IssueId::normalize(&issue.key)));
                start_at += page_len;

                if page_len == 0 || start_at >= page.total {
                    break;
                }
            }

            info!(count = issues.len(), "Fetched fixed issues from JIRA");

            Ok(issues)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn versions(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| (*v).to_string()).collect()
    }

    fn keys(issues: &BTreeSet<IssueId>) -> Vec<&str> {
        issues.iter().map(IssueId::as_str).collect()
    }

    #[test]
    fn jql_lists_versions() {
        let jql = build_jql("HBase", &versions(&["2.4.0", " 2.4.1 "])).unwrap();
        assert_eq!(
            jql,
            "project = HBase AND resolution = Fixed AND fixVersion IN (2.4.0,2.4.1)"
        );
    }

    #[test]
    fn jql_requires_a_version() {
        let err = build_jql("HBase", &versions(&["", "  "])).unwrap_err();
        assert!(matches!(err, JiraError::NoFixVersions));
    }

    #[test]
    fn search_url_keeps_base_path() {
        let client = JiraClient::new("https://issues.apache.org/jira", DEFAULT_PROJECT).unwrap();
        assert_eq!(
            client.search_url().as_str(),
            "https://issues.apache.org/jira/rest/api/2/search"
        );

        let client = JiraClient::new("https://jira.example.org/", DEFAULT_PROJECT).unwrap();
        assert_eq!(
            client.search_url().as_str(),
            "https://jira.example.org/rest/api/2/search"
        );
    }

    #[test]
    fn invalid_url_rejected() {
        assert!(JiraClient::new("not a url", DEFAULT_PROJECT).is_err());
    }

    #[tokio::test]
    async fn paginates_until_total() {
        let server = MockServer::start().await;
        let jql = "project = HBase AND resolution = Fixed AND fixVersion IN (2.4.0)";

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("jql", jql))
            .and(query_param("startAt", "0"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 50,
                "total": 3,
                "issues": [{"key": "HBASE-2"}, {"key": "HBASE-1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param("startAt", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 2,
                "maxResults": 50,
                "total": 3,
                "issues": [{"key": "HBASE-30"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri(), DEFAULT_PROJECT).unwrap();
        let issues = client
            .fetch_fixed_issues(&versions(&["2.4.0"]))
            .await
            .unwrap();

        assert_eq!(keys(&issues), ["HBASE-1", "HBASE-2", "HBASE-30"]);
    }

    #[tokio::test]
    async fn empty_page_stops_pagination() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 50,
                "total": 10,
                "issues": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri(), DEFAULT_PROJECT).unwrap();
        let issues = client
            .fetch_fixed_issues(&versions(&["3.0.0"]))
            .await
            .unwrap();

        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn http_error_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad jql"))
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri(), DEFAULT_PROJECT).unwrap();
        let err = client
            .fetch_fixed_issues(&versions(&["2.4.0"]))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("HTTP 400"), "unexpected error: {message}");
        assert!(message.contains("bad jql"), "unexpected error: {message}");
    }

    #[tokio::test]
    async fn malformed_body_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri(), DEFAULT_PROJECT).unwrap();
        let err = client
            .fetch_fixed_issues(&versions(&["2.4.0"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<JiraError>(),
            Some(JiraError::InvalidResponseFormat(_))
        ));
    }

    #[tokio::test]
    async fn sends_basic_auth_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            // base64("user:token")
            .and(header("authorization", "Basic dXNlcjp0b2tlbg=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "issues": [{"key": "hbase-7"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri(), DEFAULT_PROJECT)
            .unwrap()
            .with_credentials("user".to_string(), "token".to_string());
        let issues = client
            .fetch_fixed_issues(&versions(&["2.4.0"]))
            .await
            .unwrap();

        assert_eq!(keys(&issues), ["HBASE-7"]);
    }
}
