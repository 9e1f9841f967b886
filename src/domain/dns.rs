//! DNS presence probe

use crate::error::{DomainForgeError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Answers whether a name currently resolves to any address
///
/// `Ok(false)` means the resolver answered and found nothing; `Err` means
/// the lookup itself did not complete.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> Result<bool>;
}

/// Resolver backed by the operating system's stub resolver
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Resolver answers that mean "no such name" rather than "could not ask"
///
/// getaddrinfo only surfaces its `EAI_*` code through the message text, so
/// the NXDOMAIN / NODATA wordings of glibc, musl, macOS and Windows are
/// matched here. Anything else (`EAI_AGAIN`, `EAI_FAIL`, ...) is a failure.
const NOT_FOUND_MESSAGES: &[&str] = &[
    "name or service not known",
    "no address associated with hostname",
    "nodename nor servname provided",
    "no such host is known",
    "no data of the requested type",
    "name does not resolve",
];

// WSAHOST_NOT_FOUND, WSANO_DATA
const WINDOWS_NOT_FOUND_CODES: &[i32] = &[11001, 11004];

fn is_name_not_found(err: &std::io::Error) -> bool {
    if err
        .raw_os_error()
        .is_some_and(|code| WINDOWS_NOT_FOUND_CODES.contains(&code))
    {
        return true;
    }
    let message = err.to_string().to_lowercase();
    NOT_FOUND_MESSAGES.iter().any(|m| message.contains(m))
}

#[async_trait]
impl DnsResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Result<bool> {
        match tokio::time::timeout(self.timeout, tokio::net::lookup_host((domain, 80))).await {
            Err(_) => Err(DomainForgeError::timeout("DNS lookup", self.timeout)),
            Ok(Ok(mut addrs)) => Ok(addrs.next().is_some()),
            Ok(Err(e)) if is_name_not_found(&e) => {
                tracing::trace!(domain = %domain, error = %e, "DNS lookup returned no addresses");
                Ok(false)
            }
            Ok(Err(e)) => {
                tracing::debug!(domain = %domain, error = %e, "DNS lookup failed");
                Err(DomainForgeError::network(format!("DNS lookup failed: {}", e), None, None))
            }
        }
    }
}
