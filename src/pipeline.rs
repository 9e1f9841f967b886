//! End-to-end run: words (+ AI) -> candidates -> queries -> report

use crate::batch::{BatchConfig, BatchOrchestrator, ProgressCallback};
use crate::config::ForgeConfig;
use crate::domain::{validate_tlds, DomainChecker};
use crate::error::{DomainForgeError, Result};
use crate::generate::{CandidateLimit, CandidateSet, CombinationRules, Combinator};
use crate::lexicon::WordSet;
use crate::llm::SuggestionAdapter;
use crate::types::{Candidate, CandidateSource, DomainQuery, Report};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Pipeline {
    words: WordSet,
    rules: CombinationRules,
    tlds: Vec<String>,
    limit: CandidateLimit,
    ai: Option<SuggestionAdapter>,
    ai_count: usize,
    checker: Arc<DomainChecker>,
    orchestrator: BatchOrchestrator,
}

impl Pipeline {
    pub fn new(
        words: WordSet,
        rules: CombinationRules,
        tlds: &[String],
        checker: Arc<DomainChecker>,
        batch: BatchConfig,
    ) -> Result<Self> {
        let tlds = validate_tlds(tlds)?;
        let orchestrator = BatchOrchestrator::new(Arc::clone(&checker), batch);
        Ok(Self {
            words,
            rules,
            tlds,
            limit: CandidateLimit::default(),
            ai: None,
            ai_count: 0,
            checker,
            orchestrator,
        })
    }

    /// Wire everything from a loaded configuration. A provider that cannot be
    /// built is logged and skipped.
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let check = config.check_config();
        let checker = Arc::new(DomainChecker::with_config(check.clone())?);
        let pipeline = Self::new(
            config.word_set()?,
            config.rules,
            &config.tlds,
            checker,
            BatchConfig::from(&check),
        )?
        .with_limit(config.candidate_limit());

        let adapter = match config.llm_config() {
            Some(llm) => match SuggestionAdapter::from_config(&llm) {
                Ok(adapter) => Some(adapter),
                Err(e) => {
                    tracing::warn!(provider = %llm.provider, error = %e, "AI provider unavailable, using word combinations only");
                    None
                }
            },
            None => None,
        };

        Ok(match adapter {
            Some(adapter) => pipeline.with_ai(adapter, config.ai.count),
            None => pipeline,
        })
    }

    pub fn with_ai(mut self, adapter: SuggestionAdapter, count: usize) -> Self {
        self.ai = Some(adapter.with_metrics(self.checker.get_metrics()));
        self.ai_count = count;
        self
    }

    pub fn with_limit(mut self, limit: CandidateLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn tlds(&self) -> &[String] {
        &self.tlds
    }

    pub fn words(&self) -> &WordSet {
        &self.words
    }

    pub fn checker(&self) -> &Arc<DomainChecker> {
        &self.checker
    }

    /// Name of the AI provider in use, if any
    pub fn ai_provider(&self) -> Option<&'static str> {
        self.ai.as_ref().map(SuggestionAdapter::provider_name)
    }

    /// Combinator output merged with AI suggestions, then capped
    ///
    /// Missing word input is tolerated when an AI description is available;
    /// an empty final set is `EmptyInput`.
    pub async fn generate_candidates(&self, description: Option<&str>) -> Result<Vec<Candidate>> {
        let description = description.map(str::trim).filter(|d| !d.is_empty());
        let ai = self.ai.as_ref().zip(description);

        let mut set: CandidateSet = match Combinator::new(&self.words, self.rules).generate() {
            Ok(candidates) => candidates.into_iter().collect(),
            Err(DomainForgeError::EmptyInput { message }) if ai.is_some() => {
                tracing::debug!(reason = %message, "No word input, relying on AI suggestions");
                CandidateSet::new()
            }
            Err(e) => return Err(e),
        };

        if let Some((adapter, description)) = ai {
            let raw = adapter.generate(description, self.ai_count).await;
            let stats = set.merge_ai(&raw, &self.words);
            tracing::info!(
                accepted = stats.accepted,
                duplicates = stats.duplicates,
                rejected = stats.rejected,
                "Merged AI suggestions"
            );
        }

        tracing::info!(
            combined = set.count_by_source(CandidateSource::Combined),
            ai = set.count_by_source(CandidateSource::Ai),
            "Candidates generated"
        );

        let candidates = self.limit.apply(set.into_vec());
        if candidates.is_empty() {
            return Err(DomainForgeError::empty_input(
                "no valid candidate survived generation, filtering and limits",
            ));
        }
        Ok(candidates)
    }

    /// Every candidate against every TLD, candidate-major
    pub fn queries(&self, candidates: &[Candidate]) -> Vec<DomainQuery> {
        DomainQuery::expand(candidates, &self.tlds)
    }

    pub async fn verify(
        &self,
        queries: Vec<DomainQuery>,
        cancel: &CancellationToken,
        progress: Option<ProgressCallback>,
    ) -> Report {
        match progress {
            Some(progress) => {
                self.orchestrator
                    .run_batch_with_progress(queries, cancel, progress)
                    .await
            }
            None => self.orchestrator.run_batch(queries, cancel).await,
        }
    }

    /// Generate, expand and verify. Only `EmptyInput` stops the run.
    pub async fn run(
        &self,
        description: Option<&str>,
        cancel: &CancellationToken,
        progress: Option<ProgressCallback>,
    ) -> Result<Report> {
        let candidates = self.generate_candidates(description).await?;
        let queries = self.queries(&candidates);
        Ok(self.verify(queries, cancel, progress).await)
    }
}
