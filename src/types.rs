//! Core types and structures for domain-forge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a candidate name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Combined,
    Ai,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateSource::Combined => write!(f, "combined"),
            CandidateSource::Ai => write!(f, "ai"),
        }
    }
}

/// A generated base name (without TLD) eligible for verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub base_name: String,
    pub source: CandidateSource,
    pub compulsory_satisfied: bool,
}

impl Candidate {
    pub fn combined(base_name: impl Into<String>, compulsory_satisfied: bool) -> Self {
        Self {
            base_name: base_name.into(),
            source: CandidateSource::Combined,
            compulsory_satisfied,
        }
    }

    pub fn ai(base_name: impl Into<String>, compulsory_satisfied: bool) -> Self {
        Self {
            base_name: base_name.into(),
            source: CandidateSource::Ai,
            compulsory_satisfied,
        }
    }

    /// Case-insensitive key used for deduplication
    pub fn normalized_key(&self) -> String {
        self.base_name.trim().to_lowercase()
    }
}

/// The unit of verification work: one candidate under one TLD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainQuery {
    pub candidate: Candidate,
    pub tld: String,
}

impl DomainQuery {
    pub fn new(candidate: Candidate, tld: impl Into<String>) -> Self {
        let tld = tld.into();
        Self {
            candidate,
            tld: tld.trim().trim_start_matches('.').to_lowercase(),
        }
    }

    /// `base_name.tld`
    pub fn full_domain(&self) -> String {
        format!("{}.{}", self.candidate.base_name, self.tld)
    }

    /// Expand candidates over TLDs, candidate-major
    pub fn expand(candidates: &[Candidate], tlds: &[String]) -> Vec<DomainQuery> {
        candidates
            .iter()
            .flat_map(|candidate| {
                tlds.iter()
                    .map(move |tld| DomainQuery::new(candidate.clone(), tld.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for DomainQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.candidate.base_name, self.tld)
    }
}

/// Domain availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// How the availability verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// A registry record (WHOIS or RDAP) decided the verdict
    WhoisConfirmed,
    /// Only name resolution informed the verdict
    DnsOnly,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::WhoisConfirmed => write!(f, "whois-confirmed"),
            Confidence::DnsOnly => write!(f, "dns-only"),
        }
    }
}

/// Registry record protocol used for the second check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    #[default]
    Whois,
    Rdap,
    /// Skip registry lookups entirely; verdicts are DNS-only
    Off,
}

impl std::str::FromStr for RecordSource {
    type Err = crate::error::DomainForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whois" => Ok(RecordSource::Whois),
            "rdap" => Ok(RecordSource::Rdap),
            "none" | "off" => Ok(RecordSource::Off),
            other => Err(crate::error::DomainForgeError::config(format!(
                "unknown record source '{}' (expected whois, rdap or off)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Whois => write!(f, "whois"),
            RecordSource::Rdap => write!(f, "rdap"),
            RecordSource::Off => write!(f, "off"),
        }
    }
}

/// Outcome of verifying one DomainQuery. Built once, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    query: DomainQuery,
    dns_resolved: bool,
    whois_checked: bool,
    whois_registered: Option<bool>,
    availability: AvailabilityStatus,
    confidence: Confidence,
    attempted: bool,
    registrar: Option<String>,
    checked_at: DateTime<Utc>,
    check_duration: Option<Duration>,
    error_message: Option<String>,
}

/// Field bag for assembling a [`VerificationResult`]
#[derive(Debug, Clone)]
pub(crate) struct VerificationParts {
    pub query: DomainQuery,
    pub dns_resolved: bool,
    pub whois_checked: bool,
    pub whois_registered: Option<bool>,
    pub availability: AvailabilityStatus,
    pub confidence: Confidence,
    pub registrar: Option<String>,
    pub check_duration: Option<Duration>,
    pub error_message: Option<String>,
}

impl VerificationResult {
    pub(crate) fn from_parts(parts: VerificationParts) -> Self {
        Self {
            query: parts.query,
            dns_resolved: parts.dns_resolved,
            whois_checked: parts.whois_checked,
            whois_registered: parts.whois_registered,
            availability: parts.availability,
            confidence: parts.confidence,
            attempted: true,
            registrar: parts.registrar,
            checked_at: Utc::now(),
            check_duration: parts.check_duration,
            error_message: parts.error_message,
        }
    }

    /// Placeholder for a query that was never checked (cancelled batch or crashed worker)
    pub fn unattempted(query: DomainQuery, reason: impl Into<String>) -> Self {
        Self {
            query,
            dns_resolved: false,
            whois_checked: false,
            whois_registered: None,
            availability: AvailabilityStatus::Unknown,
            confidence: Confidence::DnsOnly,
            attempted: false,
            registrar: None,
            checked_at: Utc::now(),
            check_duration: None,
            error_message: Some(reason.into()),
        }
    }

    pub fn query(&self) -> &DomainQuery {
        &self.query
    }

    pub fn full_domain(&self) -> String {
        self.query.full_domain()
    }

    pub fn dns_resolved(&self) -> bool {
        self.dns_resolved
    }

    pub fn whois_checked(&self) -> bool {
        self.whois_checked
    }

    pub fn whois_registered(&self) -> Option<bool> {
        self.whois_registered
    }

    pub fn availability(&self) -> AvailabilityStatus {
        self.availability
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// False when the batch stopped before this query was checked
    pub fn attempted(&self) -> bool {
        self.attempted
    }

    pub fn registrar(&self) -> Option<&str> {
        self.registrar.as_deref()
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    pub fn check_duration(&self) -> Option<Duration> {
        self.check_duration
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Aggregate counts over a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub available: usize,
    pub taken: usize,
    pub unknown: usize,
    pub whois_confirmed: usize,
    pub unattempted: usize,
}

/// Ordered verification results, one per input query
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    results: Vec<VerificationResult>,
    interrupted: bool,
}

impl Report {
    pub fn new(results: Vec<VerificationResult>, interrupted: bool) -> Self {
        Self {
            results,
            interrupted,
        }
    }

    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when the batch was cancelled before every query ran
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn available(&self) -> impl Iterator<Item = &VerificationResult> {
        self.with_status(AvailabilityStatus::Available)
    }

    pub fn taken(&self) -> impl Iterator<Item = &VerificationResult> {
        self.with_status(AvailabilityStatus::Taken)
    }

    pub fn unknown(&self) -> impl Iterator<Item = &VerificationResult> {
        self.with_status(AvailabilityStatus::Unknown)
    }

    /// Available entries confirmed by a registry record, safe to act on
    pub fn actionable(&self) -> impl Iterator<Item = &VerificationResult> {
        self.available()
            .filter(|r| r.confidence() == Confidence::WhoisConfirmed)
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total: self.results.len(),
            ..Default::default()
        };
        for result in &self.results {
            match result.availability() {
                AvailabilityStatus::Available => summary.available += 1,
                AvailabilityStatus::Taken => summary.taken += 1,
                AvailabilityStatus::Unknown => summary.unknown += 1,
            }
            if result.confidence() == Confidence::WhoisConfirmed {
                summary.whois_confirmed += 1;
            }
            if !result.attempted() {
                summary.unattempted += 1;
            }
        }
        summary
    }

    fn with_status(&self, status: AvailabilityStatus) -> impl Iterator<Item = &VerificationResult> {
        self.results
            .iter()
            .filter(move |r| r.availability() == status)
    }
}

/// Configuration for availability checking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Checks in flight at once
    pub concurrency: usize,
    /// Minimum spacing between registry lookups, across all workers
    pub whois_delay: Duration,
    pub dns_timeout: Duration,
    pub whois_timeout: Duration,
    /// Query the registry even when DNS already resolved
    pub force_double_verification: bool,
    /// Report unresolvable names as available when no registry record was obtained
    pub optimistic_fallback: bool,
    pub record_source: RecordSource,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            whois_delay: Duration::from_millis(500),
            dns_timeout: Duration::from_secs(5),
            whois_timeout: Duration::from_secs(10),
            force_double_verification: false,
            optimistic_fallback: true,
            record_source: RecordSource::Whois,
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.7,
        }
    }
}
