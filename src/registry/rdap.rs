//! RDAP client over HTTPS
//!
//! Well-known registries come from a static table. Any other TLD is resolved
//! through the IANA bootstrap file, fetched once per client.

use super::{RawRecord, RegistryLookup, RegistryRecord};
use crate::error::{DomainForgeError, Result};
use crate::types::RecordSource;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::OnceCell;

const IANA_BOOTSTRAP_URL: &str = "https://data.iana.org/rdap/dns.json";

/// Domain endpoint for a TLD (lowercase, without leading dot), ending in `domain/`
pub fn rdap_endpoint(tld: &str) -> Option<&'static str> {
    match tld {
        "com" => Some("https://rdap.verisign.com/com/v1/domain/"),
        "net" => Some("https://rdap.verisign.com/net/v1/domain/"),
        "org" => Some("https://rdap.publicinterestregistry.org/rdap/domain/"),
        "info" | "ai" | "io" | "me" | "zone" | "digital" => {
            Some("https://rdap.identitydigital.services/rdap/domain/")
        }
        "biz" => Some("https://rdap.nic.biz/domain/"),
        "app" | "dev" | "page" => Some("https://pubapi.registry.google/rdap/domain/"),
        "xyz" => Some("https://rdap.centralnic.com/xyz/domain/"),
        "tech" => Some("https://rdap.centralnic.com/tech/domain/"),
        "online" => Some("https://rdap.centralnic.com/online/domain/"),
        "site" => Some("https://rdap.centralnic.com/site/domain/"),
        "shop" => Some("https://rdap.gmoregistry.net/rdap/domain/"),
        "cloud" => Some("https://rdap.registry.cloud/rdap/domain/"),
        "us" => Some("https://rdap.nic.us/domain/"),
        "uk" => Some("https://rdap.nominet.uk/domain/"),
        "de" => Some("https://rdap.denic.de/domain/"),
        "fr" => Some("https://rdap.nic.fr/domain/"),
        "nl" => Some("https://rdap.sidn.nl/domain/"),
        "tv" => Some("https://rdap.nic.tv/domain/"),
        "cc" => Some("https://tld-rdap.verisign.com/cc/v1/domain/"),
        _ => None,
    }
}

/// TLD -> domain endpoint map from an IANA `dns.json` bootstrap document
pub fn parse_bootstrap(json: &str) -> Result<HashMap<String, String>> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let services = document
        .get("services")
        .and_then(|s| s.as_array())
        .ok_or_else(|| DomainForgeError::parse("RDAP bootstrap has no services array", None))?;

    let mut endpoints = HashMap::new();
    for service in services {
        let Some([tlds, urls, ..]) = service.as_array().map(Vec::as_slice) else {
            continue;
        };
        // Prefer https when a service lists several base URLs
        let urls: Vec<&str> = urls.as_array().into_iter().flatten().filter_map(|u| u.as_str()).collect();
        let Some(base) = urls.iter().find(|u| u.starts_with("https://")).or(urls.first()) else {
            continue;
        };
        let endpoint = format!("{}/domain/", base.trim_end_matches('/'));
        for tld in tlds.as_array().into_iter().flatten().filter_map(|t| t.as_str()) {
            endpoints.insert(tld.to_lowercase(), endpoint.clone());
        }
    }
    Ok(endpoints)
}

pub struct RdapClient {
    client: Client,
    timeout: Duration,
    bootstrap_url: String,
    bootstrap: OnceCell<HashMap<String, String>>,
}

impl RdapClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("domain-forge/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| DomainForgeError::config(format!("Failed to build RDAP HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout,
            bootstrap_url: IANA_BOOTSTRAP_URL.to_string(),
            bootstrap: OnceCell::new(),
        })
    }

    /// Domain query URL for a fully-qualified domain, e.g. `zenly.com`
    pub async fn domain_url(&self, domain: &str) -> Result<String> {
        let tld = domain.rsplit('.').next().unwrap_or_default().to_lowercase();
        if let Some(endpoint) = rdap_endpoint(&tld) {
            return Ok(format!("{endpoint}{domain}"));
        }

        let bootstrap = self.bootstrap.get_or_try_init(|| self.fetch_bootstrap()).await?;
        bootstrap
            .get(&tld)
            .map(|endpoint| format!("{endpoint}{domain}"))
            .ok_or_else(|| {
                DomainForgeError::domain_check(
                    domain,
                    format!("No RDAP server known for .{}", tld),
                    Some("rdap".to_string()),
                )
            })
    }

    async fn fetch_bootstrap(&self) -> Result<HashMap<String, String>> {
        tracing::debug!(url = %self.bootstrap_url, "Fetching RDAP bootstrap registry");
        let body = self
            .client
            .get(&self.bootstrap_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DomainForgeError::network(e.to_string(), None, Some(self.bootstrap_url.clone())))?
            .text()
            .await
            .map_err(|e| DomainForgeError::network(e.to_string(), None, Some(self.bootstrap_url.clone())))?;

        let endpoints = parse_bootstrap(&body)?;
        tracing::info!(tlds = endpoints.len(), "RDAP bootstrap loaded");
        Ok(endpoints)
    }

    async fn fetch(&self, url: &str) -> Result<RegistryRecord> {
        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| DomainForgeError::timeout("RDAP request", self.timeout))?
            .map_err(|e| DomainForgeError::network(e.to_string(), None, Some(url.to_string())))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(RegistryRecord::NotFound);
        }

        if !status.is_success() {
            return Err(DomainForgeError::network(
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
                Some(url.to_string()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainForgeError::network(e.to_string(), None, Some(url.to_string())))?;

        Ok(RegistryRecord::Found(RawRecord::rdap(body)))
    }
}

#[async_trait]
impl RegistryLookup for RdapClient {
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
        let url = self.domain_url(domain).await?;
        tracing::debug!(domain = %domain, url = %url, "RDAP lookup");
        self.fetch(&url).await
    }

    fn protocol(&self) -> RecordSource {
        RecordSource::Rdap
    }
}
