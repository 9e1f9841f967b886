//! Domain availability checker

use crate::batch::WhoisThrottle;
use crate::domain::arbitration::{arbitrate, DnsOutcome, RegistryOutcome};
use crate::domain::dns::{DnsResolver, SystemResolver};
use crate::error::{DomainForgeError, Result};
use crate::metrics::{MetricsSnapshot, PerformanceMetrics};
use crate::registry::{self, RecordClass, RegistryLookup};
use crate::types::{CheckConfig, DomainQuery, VerificationParts, VerificationResult};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;

/// Two-stage availability checker: DNS first, registry record second
pub struct DomainChecker {
    config: CheckConfig,
    resolver: Arc<dyn DnsResolver>,
    registry: Option<Arc<dyn RegistryLookup>>,
    metrics: Arc<PerformanceMetrics>,
}

impl DomainChecker {
    /// Create a checker with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with the system resolver and the configured record source
    pub fn with_config(config: CheckConfig) -> Result<Self> {
        let resolver = Arc::new(SystemResolver::new(config.dns_timeout));
        let registry = registry::lookup_for(config.record_source, config.whois_timeout)?;
        Ok(Self::with_components(config, resolver, registry))
    }

    /// Create a checker from explicit components
    pub fn with_components(
        config: CheckConfig,
        resolver: Arc<dyn DnsResolver>,
        registry: Option<Arc<dyn RegistryLookup>>,
    ) -> Self {
        Self {
            config,
            resolver,
            registry,
            metrics: Arc::new(PerformanceMetrics::new()),
        }
    }

    /// Check one query. Never fails; problems lower the confidence instead.
    pub async fn check(&self, query: &DomainQuery) -> VerificationResult {
        self.run(query, None).await
    }

    /// Check one query, waiting on `throttle` before any registry call
    pub async fn check_throttled(&self, query: &DomainQuery, throttle: &WhoisThrottle) -> VerificationResult {
        self.run(query, Some(throttle)).await
    }

    async fn run(&self, query: &DomainQuery, throttle: Option<&WhoisThrottle>) -> VerificationResult {
        let start_time = Instant::now();
        let domain = query.full_domain();
        let mut errors = Vec::new();

        self.metrics.increment_dns_lookups();
        let dns = match self.resolver.resolve(&domain).await {
            Ok(true) => DnsOutcome::Resolved,
            Ok(false) => DnsOutcome::NotFound,
            Err(e) => {
                tracing::debug!(domain = %domain, method = "dns", error = %e, "DNS lookup failed");
                errors.push(format!("dns: {}", e));
                DnsOutcome::Failed
            }
        };

        let registry = if dns.resolved() && !self.config.force_double_verification {
            RegistryOutcome::Skipped
        } else {
            match &self.registry {
                Some(lookup) => {
                    if let Some(throttle) = throttle {
                        throttle.acquire().await;
                    }
                    self.lookup_registry(lookup.as_ref(), &domain).await
                }
                None => RegistryOutcome::Skipped,
            }
        };

        if let RegistryOutcome::Failed(message) = &registry {
            errors.push(message.clone());
        }
        if !errors.is_empty() {
            self.metrics.increment_errors();
        }

        let verdict = arbitrate(dns, &registry, self.config.optimistic_fallback);
        let duration = start_time.elapsed();
        self.metrics.increment_domains_checked();
        self.metrics.add_check_time(duration.as_millis() as u64);

        tracing::debug!(
            domain = %domain,
            dns = ?dns,
            registry = ?registry,
            status = %verdict.availability,
            confidence = %verdict.confidence,
            duration_ms = %duration.as_millis(),
            "Domain check completed"
        );

        VerificationResult::from_parts(VerificationParts {
            query: query.clone(),
            dns_resolved: dns.resolved(),
            whois_checked: registry.checked(),
            whois_registered: registry.registered(),
            availability: verdict.availability,
            confidence: verdict.confidence,
            registrar: registry.registrar().map(str::to_string),
            check_duration: Some(duration),
            error_message: if errors.is_empty() { None } else { Some(errors.join("; ")) },
        })
    }

    async fn lookup_registry(&self, lookup: &dyn RegistryLookup, domain: &str) -> RegistryOutcome {
        self.metrics.increment_registry_lookups();
        let method = lookup.protocol();

        let result = match timeout(self.config.whois_timeout, lookup.lookup(domain)).await {
            Ok(result) => result,
            Err(_) => Err(DomainForgeError::timeout(
                format!("{} lookup", method),
                self.config.whois_timeout,
            )),
        };

        match result {
            Ok(record) => match record.classify() {
                RecordClass::Registered { registrar } => RegistryOutcome::Registered { registrar },
                RecordClass::NotRegistered => RegistryOutcome::NotRegistered,
                RecordClass::Inconclusive => {
                    tracing::debug!(domain = %domain, method = %method, "Registry record inconclusive");
                    RegistryOutcome::Inconclusive
                }
            },
            Err(e) => {
                tracing::debug!(domain = %domain, method = %method, error = %e, "Registry lookup failed");
                RegistryOutcome::Failed(format!("{}: {}", method, e))
            }
        }
    }

    /// Get checker configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Get performance metrics
    pub fn get_metrics(&self) -> Arc<PerformanceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Get current metrics snapshot
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_stats()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::registry::{RawRecord, RegistryRecord};
    use crate::types::RecordSource;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Resolves exactly the names it was given
    pub struct StaticResolver {
        pub resolving: HashSet<String>,
        pub fail: bool,
    }

    impl StaticResolver {
        pub fn new<I, S>(names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                resolving: names.into_iter().map(Into::into).collect(),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                resolving: HashSet::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl DnsResolver for StaticResolver {
        async fn resolve(&self, domain: &str) -> Result<bool> {
            if self.fail {
                return Err(DomainForgeError::network("resolver unreachable", None, None));
            }
            Ok(self.resolving.contains(domain))
        }
    }

    /// Returns a canned WHOIS body for every domain and counts calls
    pub struct StaticRegistry {
        pub body: Option<String>,
        pub calls: AtomicUsize,
    }

    impl StaticRegistry {
        pub fn answering(body: &str) -> Self {
            Self {
                body: Some(body.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn broken() -> Self {
            Self {
                body: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RegistryLookup for StaticRegistry {
        async fn lookup(&self, _domain: &str) -> Result<RegistryRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Some(body) => Ok(RegistryRecord::Found(RawRecord::whois(body.clone()))),
                None => Err(DomainForgeError::network("connection refused", None, None)),
            }
        }

        fn protocol(&self) -> RecordSource {
            RecordSource::Whois
        }
    }

    pub const TAKEN_BODY: &str = "Domain Name: ZENLY.COM\nRegistrar: Example Registrar LLC\nCreation Date: 2014-02-01\n";
    pub const FREE_BODY: &str = "No match for \"ZENLY.COM\".\n";
}
