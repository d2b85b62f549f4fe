//! Shared test helpers: scripted transport and response builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use netcup_ccp_dns::{CcpClient, CcpError, Credentials, DnsRecord, Transport};

/// Skip a test when required environment variables are missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Scripted [`Transport`]: pops pre-loaded response bodies in order and
/// records every call for later inspection.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the next response body.
    pub fn push_response(&self, body: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(body.into());
        }
    }

    /// All calls made so far, as `(action, param)` pairs.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls issued for one action.
    pub fn call_count(&self, action: &str) -> usize {
        self.calls().iter().filter(|(a, _)| a == action).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, action: &str, param: Value) -> Result<String, CcpError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((action.to_string(), param));
        }
        let next = self.responses.lock().ok().and_then(|mut r| r.pop_front());
        next.ok_or_else(|| CcpError::Network {
            detail: format!("no scripted response for '{action}'"),
        })
    }
}

/// Session id handed out by [`login_ok`].
pub const MOCK_SESSION_ID: &str = "mock-session-0001";

/// A successful `login` envelope.
pub fn login_ok() -> String {
    json!({
        "serverrequestid": "REQ-LOGIN",
        "action": "login",
        "status": "success",
        "statuscode": 2000,
        "shortmessage": "Login successful",
        "longmessage": "Session has been created successful.",
        "responsedata": { "apisessionid": MOCK_SESSION_ID }
    })
    .to_string()
}

/// A successful envelope carrying a `dnsrecords` payload.
pub fn records_ok(action: &str, records: &[DnsRecord]) -> String {
    json!({
        "serverrequestid": "REQ-RECORDS",
        "action": action,
        "status": "success",
        "statuscode": 2000,
        "shortmessage": "DNS records found",
        "longmessage": "DNS Records for this zone were found.",
        "responsedata": { "dnsrecords": records }
    })
    .to_string()
}

/// An error envelope with the given status code.
pub fn api_error(statuscode: i64, longmessage: &str) -> String {
    json!({
        "serverrequestid": "REQ-ERROR",
        "action": "unknown",
        "status": "error",
        "statuscode": statuscode,
        "shortmessage": "Error",
        "longmessage": longmessage,
        "responsedata": ""
    })
    .to_string()
}

/// Shorthand record constructor for fixtures.
pub fn record(id: &str, hostname: &str, record_type: &str, destination: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        hostname: hostname.to_string(),
        record_type: record_type.to_string(),
        priority: "0".to_string(),
        destination: destination.to_string(),
        delete_record: false,
        state: "yes".to_string(),
    }
}

/// Logs a client in against the mock transport (queues the login response).
pub async fn logged_in_client(transport: &Arc<MockTransport>) -> Result<CcpClient, CcpError> {
    transport.push_response(login_ok());
    let credentials = Credentials::new("123456", "test-key", "test-password");
    CcpClient::with_transport(transport.clone() as Arc<dyn Transport>, &credentials).await
}
