//! Registry record lookups (WHOIS over TCP/43, RDAP over HTTPS)
//!
//! A lookup only fetches the record; deciding whether the record means
//! "registered" happens in [`RegistryRecord::classify`] so both protocols
//! share one classification step.

#[cfg(feature = "rdap")]
pub mod rdap;
#[cfg(feature = "whois")]
pub mod whois;

#[cfg(feature = "rdap")]
pub use rdap::RdapClient;
#[cfg(feature = "whois")]
pub use whois::WhoisClient;

use crate::error::{DomainForgeError, Result};
use crate::types::RecordSource;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Shape of a fetched record body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    WhoisText,
    RdapJson,
}

/// Record body exactly as the registry returned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub format: RecordFormat,
    pub body: String,
}

impl RawRecord {
    pub fn whois(body: impl Into<String>) -> Self {
        Self {
            format: RecordFormat::WhoisText,
            body: body.into(),
        }
    }

    pub fn rdap(body: impl Into<String>) -> Self {
        Self {
            format: RecordFormat::RdapJson,
            body: body.into(),
        }
    }
}

/// Result of a successful registry round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryRecord {
    Found(RawRecord),
    /// The registry answered that it has no such object (e.g. RDAP 404)
    NotFound,
}

/// What a record says about registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordClass {
    Registered { registrar: Option<String> },
    NotRegistered,
    Inconclusive,
}

impl RegistryRecord {
    pub fn classify(&self) -> RecordClass {
        match self {
            RegistryRecord::NotFound => RecordClass::NotRegistered,
            RegistryRecord::Found(raw) => match raw.format {
                RecordFormat::WhoisText => classify_whois_text(&raw.body),
                RecordFormat::RdapJson => classify_rdap_json(&raw.body),
            },
        }
    }
}

/// Fetches the registry record for a fully-qualified domain
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord>;

    fn protocol(&self) -> RecordSource;
}

/// Build the lookup client for a configured source; `None` disables registry checks
pub fn lookup_for(source: RecordSource, timeout: Duration) -> Result<Option<Arc<dyn RegistryLookup>>> {
    match source {
        RecordSource::Off => Ok(None),
        #[cfg(feature = "whois")]
        RecordSource::Whois => Ok(Some(Arc::new(WhoisClient::new(timeout)))),
        #[cfg(feature = "rdap")]
        RecordSource::Rdap => Ok(Some(Arc::new(RdapClient::new(timeout)?))),
        #[allow(unreachable_patterns)]
        other => Err(DomainForgeError::config(format!(
            "record source '{}' is not compiled into this build",
            other
        ))),
    }
}

const NO_MATCH_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "no data found",
    "no matching record",
    "domain not found",
    "not registered",
    "available for registration",
    "status: free",
    "status: available",
];

const REGISTERED_FIELDS: &[&str] = &[
    "registrar:",
    "registrar name:",
    "sponsoring registrar:",
    "creation date:",
    "created:",
    "registered:",
    "registered on:",
    "name server:",
    "nameserver:",
    "nserver:",
];

fn classify_whois_text(body: &str) -> RecordClass {
    if body.trim().is_empty() {
        return RecordClass::NotRegistered;
    }

    let lower = body.to_lowercase();
    let has_fields = lower
        .lines()
        .map(str::trim)
        .any(|line| REGISTERED_FIELDS.iter().any(|field| line.starts_with(field)));

    if has_fields {
        let registrar = extract_field(body, &["registrar:", "registrar name:", "sponsoring registrar:"]);
        return RecordClass::Registered { registrar };
    }

    if NO_MATCH_PATTERNS.iter().any(|pattern| lower.contains(pattern)) {
        RecordClass::NotRegistered
    } else {
        RecordClass::Inconclusive
    }
}

fn extract_field(body: &str, patterns: &[&str]) -> Option<String> {
    body.lines().map(str::trim).find_map(|line| {
        let lower = line.to_lowercase();
        patterns
            .iter()
            .find(|p| lower.starts_with(*p))
            .and_then(|_| line.splitn(2, ':').nth(1))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn classify_rdap_json(body: &str) -> RecordClass {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Unparseable RDAP body");
            return RecordClass::Inconclusive;
        }
    };

    let non_empty = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_array())
            .map(|a| !a.is_empty())
            .unwrap_or(false)
    };

    if ["status", "entities", "events", "nameservers"]
        .iter()
        .any(|key| non_empty(*key))
    {
        RecordClass::Registered {
            registrar: rdap_registrar(&value),
        }
    } else {
        RecordClass::NotRegistered
    }
}

/// Registrar display name from the `registrar` entity's vCard `fn` entry
fn rdap_registrar(value: &serde_json::Value) -> Option<String> {
    value
        .get("entities")?
        .as_array()?
        .iter()
        .find(|entity| {
            entity
                .get("roles")
                .and_then(|r| r.as_array())
                .map(|roles| roles.iter().any(|r| r.as_str() == Some("registrar")))
                .unwrap_or(false)
        })?
        .get("vcardArray")?
        .get(1)?
        .as_array()?
        .iter()
        .filter_map(|prop| prop.as_array())
        .find(|prop| prop.first().and_then(|k| k.as_str()) == Some("fn"))?
        .get(3)?
        .as_str()
        .map(str::to_string)
}
