//! CCP webservice wire types.
//!
//! Field names follow the JSON protocol of the netcup CCP endpoint exactly
//! (all lowercase, e.g. `deleterecord`, `dnssecstatus`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common response envelope wrapping every CCP action result.
///
/// `responsedata` is kept as a raw [`Value`] because the API returns an
/// action-specific object on success but an empty string on failure; the
/// payload is only decoded after the envelope status has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub serverrequestid: String,
    #[serde(default)]
    pub action: String,
    /// `"success"`, `"error"`, `"started"`, `"pending"` or `"warning"`.
    pub status: String,
    /// Numeric status, e.g. 2000 on success.
    #[serde(default)]
    pub statuscode: i64,
    #[serde(default)]
    pub shortmessage: String,
    #[serde(default)]
    pub longmessage: String,
    #[serde(default)]
    pub responsedata: Value,
}

/// Session payload of a successful `login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    #[serde(rename = "apisessionid")]
    pub api_session_id: String,
}

/// DNS zone metadata returned by `infoDnsZone`.
///
/// All numeric fields are transported as strings by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsZone {
    #[serde(rename = "domainname")]
    pub name: String,
    pub ttl: String,
    pub serial: String,
    pub refresh: String,
    pub retry: String,
    pub expire: String,
    #[serde(rename = "dnssecstatus")]
    pub dnssec_status: bool,
}

/// A single DNS record within a zone.
///
/// Identity is the `(domain, id)` pair; the id is assigned by the remote
/// system and is empty until the record has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Remote-assigned record id. Empty for records not yet created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Host part relative to the zone (`"@"` for the apex, `"*"` for wildcard).
    pub hostname: String,
    /// Record type (`"A"`, `"MX"`, `"CNAME"`, ...), uppercase on the wire.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Priority as a string; only meaningful for types that use it (MX),
    /// empty means "not set".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub priority: String,
    pub destination: String,
    /// Transient deletion flag, set only when requesting a delete.
    #[serde(rename = "deleterecord", default, skip_serializing_if = "std::ops::Not::not")]
    pub delete_record: bool,
    /// Remote state marker (e.g. `"yes"` once the record is live).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
}

/// Identifier-less precursor for record creation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDnsRecord {
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub priority: String,
    pub destination: String,
}

impl NewDnsRecord {
    /// Structural match against a record returned by the API.
    ///
    /// Hostname, type and destination must be equal; priority is compared
    /// only when this precursor carries one.
    #[must_use]
    pub fn matches(&self, record: &DnsRecord) -> bool {
        let base = self.hostname == record.hostname
            && self.record_type == record.record_type
            && self.destination == record.destination;

        if self.priority.is_empty() {
            base
        } else {
            base && self.priority == record.priority
        }
    }
}

/// Record set as carried in `infoDnsRecords` / `updateDnsRecords` payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnsRecordSet {
    #[serde(rename = "dnsrecords", default)]
    pub dns_records: Vec<DnsRecord>,
}

/// Record set variant for creation requests (records without ids).
#[derive(Debug, Clone, Serialize)]
pub struct NewDnsRecordSet {
    #[serde(rename = "dnsrecords")]
    pub dns_records: Vec<NewDnsRecord>,
}
