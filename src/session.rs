//! Credentials and session management.
//!
//! A session is obtained once via the `login` action and reused for the
//! lifetime of the client. There is no logout and no renewal; when the
//! remote side invalidates the session, dependent calls fail with
//! [`CcpError::SessionExpired`](crate::CcpError::SessionExpired) and the
//! caller must construct a new client.

use serde::Serialize;

use crate::error::{CcpError, Result};
use crate::transport::Transport;
use crate::types::{ApiEnvelope, SessionData};
use crate::utils::log::mask_token;

/// Environment variable consulted by [`Credentials::from_env`].
pub const ENV_CUSTOMER_NUMBER: &str = "NETCUP_CUSTOMER_NUMBER";
/// Environment variable consulted by [`Credentials::from_env`].
pub const ENV_API_KEY: &str = "NETCUP_API_KEY";
/// Environment variable consulted by [`Credentials::from_env`].
pub const ENV_API_PASSWORD: &str = "NETCUP_API_PASSWORD";

/// Login credentials for the CCP webservice.
///
/// The password is consumed by the login request and is not retained by
/// the client afterwards.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Netcup customer number.
    pub customer_number: String,
    /// CCP API key.
    pub api_key: String,
    /// CCP API password.
    pub api_password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(
        customer_number: impl Into<String>,
        api_key: impl Into<String>,
        api_password: impl Into<String>,
    ) -> Self {
        Self {
            customer_number: customer_number.into(),
            api_key: api_key.into(),
            api_password: api_password.into(),
        }
    }

    /// Reads credentials from `NETCUP_CUSTOMER_NUMBER`, `NETCUP_API_KEY`
    /// and `NETCUP_API_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns [`CcpError::MissingCredential`] when a variable is unset or
    /// empty after trimming.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            customer_number: required(std::env::var(ENV_CUSTOMER_NUMBER).ok(), ENV_CUSTOMER_NUMBER)?,
            api_key: required(std::env::var(ENV_API_KEY).ok(), ENV_API_KEY)?,
            api_password: required(std::env::var(ENV_API_PASSWORD).ok(), ENV_API_PASSWORD)?,
        })
    }
}

/// 校验凭证字段非空（env 值为 None 或空白均视为缺失）。
fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CcpError::MissingCredential {
            field: field.to_string(),
        }),
    }
}

/// The authentication triple sent with every request after login.
///
/// Serializes to the wire auth fields (`customernumber`, `apikey`,
/// `apisessionid`); request param structs embed it via `#[serde(flatten)]`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Session {
    #[serde(rename = "customernumber")]
    pub customer_number: String,
    #[serde(rename = "apikey")]
    pub api_key: String,
    #[serde(rename = "apisessionid")]
    pub api_session_id: String,
}

impl Session {
    /// Performs the `login` action and captures the session id.
    ///
    /// Remote rejection and undecodable login responses both surface as
    /// [`CcpError::InvalidCredentials`]; transport failures pass through
    /// unchanged.
    pub(crate) async fn login(
        transport: &dyn Transport,
        credentials: &Credentials,
    ) -> Result<Self> {
        #[derive(Serialize)]
        struct LoginParam<'a> {
            customernumber: &'a str,
            apikey: &'a str,
            apipassword: &'a str,
        }

        let param = serde_json::to_value(LoginParam {
            customernumber: &credentials.customer_number,
            apikey: &credentials.api_key,
            apipassword: &credentials.api_password,
        })
        .map_err(|e| CcpError::Parse {
            detail: e.to_string(),
        })?;

        let body = transport.send("login", param).await?;

        let envelope: ApiEnvelope =
            serde_json::from_str(&body).map_err(|e| CcpError::InvalidCredentials {
                raw_message: Some(format!("undecodable login response: {e}")),
            })?;

        if envelope.status != "success" {
            log::warn!(
                "Login rejected for customer {} ({}, {})",
                credentials.customer_number,
                envelope.status,
                envelope.statuscode
            );
            return Err(CcpError::InvalidCredentials {
                raw_message: non_empty(envelope.longmessage),
            });
        }

        let data: SessionData = serde_json::from_value(envelope.responsedata).map_err(|e| {
            CcpError::InvalidCredentials {
                raw_message: Some(format!("undecodable login response: {e}")),
            }
        })?;

        log::debug!(
            "Logged in customer {} (session {})",
            credentials.customer_number,
            mask_token(&data.api_session_id)
        );

        Ok(Self {
            customer_number: credentials.customer_number.clone(),
            api_key: credentials.api_key.clone(),
            api_session_id: data.api_session_id,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
