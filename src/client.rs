//! The CCP DNS client.
//!
//! Composes transport, session and cache into the five record operations
//! plus zone info. Every mutating call invalidates the domain's cache
//! entry *before* the request goes out, so a reader racing with the write
//! either sees the old complete snapshot or is forced to refetch.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::RecordCache;
use crate::error::{CcpError, Result};
use crate::session::{Credentials, Session};
use crate::transport::{HttpTransport, Transport};
use crate::types::{ApiEnvelope, DnsRecord, DnsRecordSet, DnsZone, NewDnsRecord, NewDnsRecordSet};

/// CCP status code reported when the supplied api session id is rejected
/// (expired or malformed).
const STATUS_CODE_SESSION_INVALID: i64 = 4001;

/// Async client for the netcup CCP DNS webservice.
///
/// Construction performs the login; the resulting session is reused for
/// every call and never renewed. All operations take `&self` and are safe
/// to invoke concurrently; per-domain read-your-writes consistency is
/// guaranteed on a single client instance.
pub struct CcpClient {
    transport: Arc<dyn Transport>,
    session: Session,
    cache: RecordCache,
}

impl std::fmt::Debug for CcpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CcpClient")
            .field("session", &self.session)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// 通用请求参数：认证三元组 + 域名。
#[derive(Serialize)]
struct DomainParam<'a> {
    #[serde(flatten)]
    session: &'a Session,
    domainname: &'a str,
}

/// `updateDnsRecords` 请求参数；`S` 为带/不带 id 的记录集。
#[derive(Serialize)]
struct UpdateRecordsParam<'a, S: Serialize> {
    #[serde(flatten)]
    session: &'a Session,
    domainname: &'a str,
    dnsrecordset: S,
}

impl CcpClient {
    /// Logs in over the default HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns [`CcpError::InvalidCredentials`] when the remote side
    /// rejects the login, or a transport error when the endpoint is
    /// unreachable.
    pub async fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_transport(Arc::new(HttpTransport::new()), credentials).await
    }

    /// Logs in over a caller-supplied transport (custom user agent,
    /// staging endpoint, test double).
    pub async fn with_transport(
        transport: Arc<dyn Transport>,
        credentials: &Credentials,
    ) -> Result<Self> {
        let session = Session::login(transport.as_ref(), credentials).await?;
        Ok(Self {
            transport,
            session,
            cache: RecordCache::new(),
        })
    }

    /// Fetches zone metadata via `infoDnsZone`. Uncached.
    pub async fn get_dns_zone(&self, domain: &str) -> Result<DnsZone> {
        let envelope = self
            .request(
                "infoDnsZone",
                DomainParam {
                    session: &self.session,
                    domainname: domain,
                },
            )
            .await?;
        decode_payload("infoDnsZone", envelope)
    }

    /// Returns all DNS records of `domain`.
    ///
    /// Serves the cached list when present; otherwise issues one
    /// `infoDnsRecords` call and caches the result.
    pub async fn get_dns_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        if let Some(records) = self.cache.get(domain).await {
            log::debug!("Serving {} records for '{domain}' from cache", records.len());
            return Ok(records);
        }

        let envelope = self
            .request(
                "infoDnsRecords",
                DomainParam {
                    session: &self.session,
                    domainname: domain,
                },
            )
            .await?;
        let set: DnsRecordSet = decode_payload("infoDnsRecords", envelope)?;

        self.cache.put(domain, set.dns_records.clone()).await;
        Ok(set.dns_records)
    }

    /// Returns the record of `domain` whose id equals `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CcpError::RecordNotFound`] when no record carries that id.
    pub async fn get_dns_record_by_id(&self, domain: &str, id: &str) -> Result<DnsRecord> {
        let records = self.get_dns_records(domain).await?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CcpError::RecordNotFound {
                domain: domain.to_string(),
                record_id: id.to_string(),
            })
    }

    /// Creates a record and returns it with its remote-assigned id.
    ///
    /// The API has no dedicated create action: the record is submitted via
    /// `updateDnsRecords` and located in the returned record set by
    /// structural match ([`NewDnsRecord::matches`]).
    ///
    /// # Errors
    ///
    /// Returns [`CcpError::CreatedRecordNotFound`] when no returned record
    /// matches, and [`CcpError::AmbiguousRecordMatch`] when more than one
    /// does (identical hostname/type/destination/priority).
    pub async fn create_dns_record(
        &self,
        domain: &str,
        record: &NewDnsRecord,
    ) -> Result<DnsRecord> {
        self.cache.invalidate(domain).await;

        let envelope = self
            .request(
                "updateDnsRecords",
                UpdateRecordsParam {
                    session: &self.session,
                    domainname: domain,
                    dnsrecordset: NewDnsRecordSet {
                        dns_records: vec![record.clone()],
                    },
                },
            )
            .await?;
        let set: DnsRecordSet = decode_payload("updateDnsRecords", envelope)?;

        let mut matches = set.dns_records.into_iter().filter(|r| record.matches(r));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (None, _) => Err(CcpError::CreatedRecordNotFound {
                domain: domain.to_string(),
            }),
            (Some(_), Some(_)) => Err(CcpError::AmbiguousRecordMatch {
                domain: domain.to_string(),
                candidates: 2 + matches.count(),
            }),
        }
    }

    /// Replaces an existing record (identified by its id) and returns the
    /// state reported back by the API.
    ///
    /// # Errors
    ///
    /// Returns [`CcpError::RecordNotFound`] when the returned record set
    /// no longer contains the record's id.
    pub async fn update_dns_record(&self, domain: &str, record: &DnsRecord) -> Result<DnsRecord> {
        self.cache.invalidate(domain).await;

        let mut submitted = record.clone();
        submitted.delete_record = false;

        let envelope = self
            .request(
                "updateDnsRecords",
                UpdateRecordsParam {
                    session: &self.session,
                    domainname: domain,
                    dnsrecordset: DnsRecordSet {
                        dns_records: vec![submitted],
                    },
                },
            )
            .await?;
        let set: DnsRecordSet = decode_payload("updateDnsRecords", envelope)?;

        set.dns_records
            .into_iter()
            .find(|r| r.id == record.id)
            .ok_or_else(|| CcpError::RecordNotFound {
                domain: domain.to_string(),
                record_id: record.id.clone(),
            })
    }

    /// Deletes a record by resubmitting it with the `deleterecord` flag.
    ///
    /// Success is any decodable success envelope; the response body is not
    /// inspected further.
    pub async fn delete_dns_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        self.cache.invalidate(domain).await;

        let mut doomed = record.clone();
        doomed.delete_record = true;

        self.request(
            "updateDnsRecords",
            UpdateRecordsParam {
                session: &self.session,
                domainname: domain,
                dnsrecordset: DnsRecordSet {
                    dns_records: vec![doomed],
                },
            },
        )
        .await?;
        Ok(())
    }

    // ---- request plumbing ----

    /// Sends one action request and returns the envelope after checking
    /// its status.
    async fn request(&self, action: &str, param: impl Serialize) -> Result<ApiEnvelope> {
        let param = serde_json::to_value(param).map_err(|e| CcpError::Parse {
            detail: e.to_string(),
        })?;

        let body = self.transport.send(action, param).await?;

        let envelope: ApiEnvelope = serde_json::from_str(&body).map_err(|e| {
            log::error!("JSON parse failed for '{action}': {e}");
            CcpError::Parse {
                detail: e.to_string(),
            }
        })?;

        if envelope.status == "success" {
            Ok(envelope)
        } else {
            let err = map_api_failure(action, &envelope);
            if err.is_expected() {
                log::warn!("{err}");
            } else {
                log::error!("{err}");
            }
            Err(err)
        }
    }
}

/// Decodes the action-specific payload of a success envelope.
fn decode_payload<T: DeserializeOwned>(action: &str, envelope: ApiEnvelope) -> Result<T> {
    serde_json::from_value(envelope.responsedata).map_err(|e| CcpError::Parse {
        detail: format!("invalid '{action}' payload: {e}"),
    })
}

/// 将非 success 信封映射为结构化错误。
///
/// 4001 表示会话 id 被拒绝；其余状态码原样带回 [`CcpError::Api`]。
fn map_api_failure(action: &str, envelope: &ApiEnvelope) -> CcpError {
    if envelope.statuscode == STATUS_CODE_SESSION_INVALID {
        let msg = envelope.longmessage.clone();
        CcpError::SessionExpired {
            raw_message: if msg.is_empty() { None } else { Some(msg) },
        }
    } else {
        CcpError::Api {
            action: action.to_string(),
            status: envelope.status.clone(),
            status_code: envelope.statuscode,
            long_message: envelope.longmessage.clone(),
        }
    }
}
