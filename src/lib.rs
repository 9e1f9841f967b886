//! Domain Forge - combinatorial and AI-assisted domain name generation with
//! DNS + WHOIS availability checking
//!
//! Word lists (and optionally an AI provider) produce candidate base names,
//! every candidate is expanded over the configured TLDs, and each query is
//! verified by a DNS probe followed, when needed, by a registry lookup.

pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod generate;
pub mod lexicon;
pub mod llm;
pub mod metrics;
pub mod pipeline;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use error::{DomainForgeError, Result};
pub use types::{
    AvailabilityStatus, Candidate, CandidateSource, CheckConfig, Confidence, DomainQuery, LlmConfig,
    RecordSource, Report, ReportSummary, VerificationResult,
};

// Re-export main functionality
pub use batch::{BatchConfig, BatchOrchestrator, BatchProgress, WhoisThrottle};
pub use config::ForgeConfig;
pub use domain::{DomainChecker, Registrar};
pub use generate::{CombinationRules, Combinator};
pub use lexicon::{Category, WordSet};
pub use llm::SuggestionAdapter;
pub use metrics::{MetricsSnapshot, PerformanceMetrics};
pub use pipeline::Pipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
