use serde::{Deserialize, Serialize};

/// Unified error type for all CCP client operations.
///
/// Each variant carries structured context (status code, body, domain, record id)
/// so callers can branch on kind instead of parsing human strings. All variants
/// are serializable for structured error reporting.
///
/// No variant is retried internally: every error is fatal for the single
/// operation that produced it, and retry policy belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum CcpError {
    /// A network-level error occurred (DNS resolution failure, connection refused, TLS, etc.).
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request exceeded the transport timeout.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The webservice answered with a non-200 HTTP status.
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Login was rejected or the login response could not be decoded.
    InvalidCredentials {
        /// Original message from the CCP API, if available.
        raw_message: Option<String>,
    },

    /// The API session id was rejected (expired or invalidated remotely).
    ///
    /// The client never re-logs-in; callers must construct a new client.
    SessionExpired {
        /// Original message from the CCP API, if available.
        raw_message: Option<String>,
    },

    /// The response envelope was not valid JSON or was missing its payload.
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// No record with the requested id exists in the domain's record set.
    RecordNotFound {
        /// Domain the record was looked up in.
        domain: String,
        /// Record id that was not found.
        record_id: String,
    },

    /// The record set returned after a create contained no structural match
    /// for the submitted record.
    CreatedRecordNotFound {
        /// Domain the record was created in.
        domain: String,
    },

    /// The record set returned after a create contained more than one
    /// structural match, so the new record's id cannot be determined.
    AmbiguousRecordMatch {
        /// Domain the record was created in.
        domain: String,
        /// Number of matching candidates in the response.
        candidates: usize,
    },

    /// The CCP API reported a failure inside a well-formed envelope.
    Api {
        /// Action that failed (e.g. `"updateDnsRecords"`).
        action: String,
        /// Envelope `status` field (`"error"`, `"warning"`, ...).
        status: String,
        /// Envelope `statuscode` field (e.g. 4013).
        status_code: i64,
        /// Envelope `longmessage` field.
        long_message: String,
    },

    /// A credential field sourced from the environment was missing or empty.
    MissingCredential {
        /// Environment variable / field name.
        field: String,
    },
}

impl CcpError {
    /// 是否为预期行为（凭证问题、记录不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::SessionExpired { .. }
                | Self::RecordNotFound { .. }
                | Self::CreatedRecordNotFound { .. }
                | Self::AmbiguousRecordMatch { .. }
                | Self::MissingCredential { .. }
        )
    }
}

impl std::fmt::Display for CcpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::HttpStatus { status, body } => {
                write!(f, "Unexpected HTTP status {status}: {body}")
            }
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::SessionExpired { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "API session rejected: {msg}")
                } else {
                    write!(f, "API session rejected")
                }
            }
            Self::Parse { detail } => write!(f, "Parse error: {detail}"),
            Self::RecordNotFound { domain, record_id } => {
                write!(f, "No DNS record with id '{record_id}' in domain '{domain}'")
            }
            Self::CreatedRecordNotFound { domain } => {
                write!(f, "Could not locate the newly created DNS record in domain '{domain}'")
            }
            Self::AmbiguousRecordMatch { domain, candidates } => {
                write!(
                    f,
                    "Ambiguous match for the newly created DNS record in domain '{domain}': {candidates} candidates"
                )
            }
            Self::Api {
                action,
                status,
                status_code,
                long_message,
            } => {
                write!(f, "CCP API error on '{action}' ({status}, {status_code}): {long_message}")
            }
            Self::MissingCredential { field } => {
                write!(f, "Missing or empty credential: {field}")
            }
        }
    }
}

impl std::error::Error for CcpError {}

/// Convenience type alias for `Result<T, CcpError>`.
pub type Result<T> = std::result::Result<T, CcpError>;
