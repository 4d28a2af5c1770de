//! Dynamic DNS update client.

use crate::config::Credentials;
use crate::error::{DynipError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Something that can point a set of hostnames at the caller's address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsUpdater: Send + Sync {
    /// Endpoint description for log lines.
    fn name(&self) -> String;

    /// Push the update for `hosts` and return the provider's response body.
    async fn update(&self, hosts: &[String]) -> Result<String>;
}

/// dyndns2-style updater: `GET <url>?hostname=a,b` with HTTP basic auth.
///
/// The provider infers the new address from the request's source IP.
pub struct DynDnsUpdater {
    client: reqwest::Client,
    update_url: String,
    credentials: Credentials,
}

impl DynDnsUpdater {
    pub fn new(update_url: String, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            update_url,
            credentials,
        })
    }
}

#[async_trait]
impl DnsUpdater for DynDnsUpdater {
    fn name(&self) -> String {
        self.update_url.clone()
    }

    async fn update(&self, hosts: &[String]) -> Result<String> {
        if hosts.is_empty() {
            return Err(DynipError::Config("no hostnames to update".to_string()));
        }

        let request = self
            .client
            .get(&self.update_url)
            .query(&[("hostname", hosts.join(","))]);

        let request = match &self.credentials {
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::Token(token) => request.basic_auth(token, None::<&str>),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DynipError::Update {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!("Result from {}: {}", self.update_url, body.trim());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|h| h.to_string()).collect()
    }

    fn updater(url: String, auth: &str) -> DynDnsUpdater {
        DynDnsUpdater::new(url, Credentials::parse(auth), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_update_success() {
        let mock_server = MockServer::start().await;

        // "user:pass"
        Mock::given(method("GET"))
            .and(path("/nic/update"))
            .and(query_param("hostname", "home.example.com,vpn.example.com"))
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_string("good 1.2.3.4"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let updater = updater(format!("{}/nic/update", mock_server.uri()), "user:pass");
        let body = updater
            .update(&hosts(&["home.example.com", "vpn.example.com"]))
            .await
            .unwrap();

        assert_eq!(body, "good 1.2.3.4");
    }

    #[tokio::test]
    async fn test_update_with_token() {
        let mock_server = MockServer::start().await;

        // "s3cret:"
        Mock::given(method("GET"))
            .and(path("/update"))
            .and(query_param("hostname", "home.example.com"))
            .and(header("Authorization", "Basic czNjcmV0Og=="))
            .respond_with(ResponseTemplate::new(200).set_body_string("nochg"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let updater = updater(format!("{}/update", mock_server.uri()), "s3cret");
        assert!(updater.update(&hosts(&["home.example.com"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_keeps_existing_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .and(query_param("system", "dyndns"))
            .and(query_param("hostname", "a.example.com"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let updater = updater(
            format!("{}/update?system=dyndns", mock_server.uri()),
            "user:pass",
        );
        assert!(updater.update(&hosts(&["a.example.com"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .respond_with(ResponseTemplate::new(500).set_body_string("911"))
            .mount(&mock_server)
            .await;

        let updater = updater(format!("{}/update", mock_server.uri()), "user:pass");
        let err = updater.update(&hosts(&["a.example.com"])).await.unwrap_err();

        match err {
            DynipError::Update { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "911");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_times_out_slow_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("good")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let updater = DynDnsUpdater::new(
            format!("{}/update", mock_server.uri()),
            Credentials::parse("user:pass"),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = updater.update(&hosts(&["a.example.com"])).await.unwrap_err();
        assert!(matches!(err, DynipError::Network(_)));
    }

    #[tokio::test]
    async fn test_update_unreachable() {
        let updater = updater("http://127.0.0.1:1/update".to_string(), "user:pass");
        let err = updater.update(&hosts(&["a.example.com"])).await.unwrap_err();
        assert!(matches!(err, DynipError::Network(_)));
    }

    #[tokio::test]
    async fn test_update_requires_hosts() {
        let updater = updater("http://127.0.0.1:1/update".to_string(), "user:pass");
        assert!(matches!(
            updater.update(&[]).await,
            Err(DynipError::Config(_))
        ));
    }
}
