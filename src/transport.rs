//! HTTP transport for the CCP webservice.
//!
//! Every API call is a JSON POST of `{"action", "param"}` against a single
//! fixed endpoint. The transport performs exactly one attempt per call;
//! retry policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CcpError, Result};
use crate::utils::log::truncate_body;

/// Production endpoint of the CCP JSON webservice.
pub const CCP_ENDPOINT: &str =
    "https://ccp.netcup.net/run/webservice/servers/endpoint.php?JSON";

/// Total per-request timeout (connect + transfer).
const REQUEST_TIMEOUT_SECS: u64 = 10;

const DEFAULT_USER_AGENT: &str = concat!("netcup-ccp-dns/", env!("CARGO_PKG_VERSION"));

/// Issues a single authenticated action request and returns the raw
/// response body.
///
/// Implemented by [`HttpTransport`] for production use; test code supplies
/// scripted implementations to exercise the client without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, action: &str, param: Value) -> Result<String>;
}

#[derive(Serialize)]
struct ActionRequest<'a> {
    action: &'a str,
    param: Value,
}

/// `reqwest`-backed [`Transport`] with a bounded per-request timeout.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl HttpTransport {
    /// Transport against the production endpoint with the default user agent.
    #[must_use]
    pub fn new() -> Self {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Transport against the production endpoint with a custom user agent
    /// (e.g. the name of the consuming IaC plugin).
    #[must_use]
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self::with_endpoint(CCP_ENDPOINT, user_agent)
    }

    /// Transport against an arbitrary endpoint. Intended for tests and
    /// staging deployments.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        #[allow(clippy::expect_used)]
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, action: &str, param: Value) -> Result<String> {
        log::debug!("POST {action}");

        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", &self.user_agent)
            .json(&ActionRequest { action, param })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CcpError::Timeout {
                        detail: e.to_string(),
                    }
                } else {
                    CcpError::Network {
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        log::debug!("Response Status: {status}");

        let body = response.text().await.map_err(|e| CcpError::Network {
            detail: format!("Failed to read response body: {e}"),
        })?;

        if status != 200 {
            log::warn!("'{action}' answered with HTTP {status}");
            return Err(CcpError::HttpStatus { status, body });
        }

        log::debug!("Response Body: {}", truncate_body(&body));
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_request_wire_shape() {
        let req = ActionRequest {
            action: "infoDnsRecords",
            param: serde_json::json!({ "domainname": "example.com" }),
        };
        let json_res = serde_json::to_string(&req);
        assert!(json_res.is_ok(), "serialize failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert_eq!(
            json,
            r#"{"action":"infoDnsRecords","param":{"domainname":"example.com"}}"#
        );
    }

    #[test]
    fn default_user_agent_carries_crate_version() {
        let transport = HttpTransport::new();
        assert!(transport.user_agent.starts_with("netcup-ccp-dns/"));
        assert_eq!(transport.endpoint, CCP_ENDPOINT);
    }
}
