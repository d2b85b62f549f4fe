//! # netcup-ccp-dns
//!
//! An async client for the [netcup CCP](https://www.netcup.de/) DNS
//! webservice, built to back declarative infrastructure-as-code plugins.
//!
//! The client logs in once at construction, authenticates every call with
//! the resulting session triple (customer number, API key, session id) and
//! keeps a per-domain record cache that is invalidated before any mutating
//! call — reads stay cheap during plan/apply cycles while writes are never
//! served stale data afterwards.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netcup_ccp_dns::{CcpClient, Credentials, NewDnsRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Log in (or use Credentials::from_env())
//!     let credentials = Credentials::new("123456", "api-key", "api-password");
//!     let client = CcpClient::new(&credentials).await?;
//!
//!     // 2. List records (cached after the first call)
//!     for record in client.get_dns_records("example.com").await? {
//!         println!("{} {} -> {}", record.hostname, record.record_type, record.destination);
//!     }
//!
//!     // 3. Create a record
//!     let created = client
//!         .create_dns_record(
//!             "example.com",
//!             &NewDnsRecord {
//!                 hostname: "www".to_string(),
//!                 record_type: "A".to_string(),
//!                 priority: String::new(),
//!                 destination: "1.2.3.4".to_string(),
//!             },
//!         )
//!         .await?;
//!     println!("created record id {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, CcpError>`](CcpError). The error enum
//! provides structured variants for the failure modes callers branch on:
//!
//! - [`CcpError::InvalidCredentials`] — login rejected
//! - [`CcpError::SessionExpired`] — the session id was invalidated remotely;
//!   construct a new client
//! - [`CcpError::RecordNotFound`] — record id not present in the domain
//! - [`CcpError::AmbiguousRecordMatch`] — a freshly created record could not
//!   be told apart from duplicates in the response
//!
//! Nothing is retried internally; every error is fatal for the single
//! operation that produced it.

mod cache;
mod client;
mod error;
mod session;
mod transport;
mod types;
mod utils;

pub use client::CcpClient;
pub use error::{CcpError, Result};
pub use session::{Credentials, ENV_API_KEY, ENV_API_PASSWORD, ENV_CUSTOMER_NUMBER};
pub use transport::{CCP_ENDPOINT, HttpTransport, Transport};
pub use types::{ApiEnvelope, DnsRecord, DnsRecordSet, DnsZone, NewDnsRecord, SessionData};
