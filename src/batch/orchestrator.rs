//! Bounded worker pool over a list of queries

use super::WhoisThrottle;
use crate::domain::DomainChecker;
use crate::types::{AvailabilityStatus, CheckConfig, DomainQuery, Report, VerificationResult};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Worker pool sizing and registry spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub concurrency: usize,
    pub whois_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from(&CheckConfig::default())
    }
}

impl From<&CheckConfig> for BatchConfig {
    fn from(config: &CheckConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            whois_delay: config.whois_delay,
        }
    }
}

/// Running totals handed to the progress callback after every finished check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub available: usize,
    pub taken: usize,
    pub unknown: usize,
}

impl BatchProgress {
    fn record(&mut self, status: AvailabilityStatus) {
        self.completed += 1;
        match status {
            AvailabilityStatus::Available => self.available += 1,
            AvailabilityStatus::Taken => self.taken += 1,
            AvailabilityStatus::Unknown => self.unknown += 1,
        }
    }
}

/// Called synchronously from worker tasks; keep it short
pub type ProgressCallback = Arc<dyn Fn(&BatchProgress) + Send + Sync>;

struct BatchState {
    slots: Vec<Option<VerificationResult>>,
    progress: BatchProgress,
}

impl BatchState {
    fn store(&mut self, index: usize, result: VerificationResult) -> BatchProgress {
        if self.slots[index].is_none() {
            self.progress.record(result.availability());
            self.slots[index] = Some(result);
        }
        self.progress
    }
}

/// Runs availability checks for a whole query list, preserving input order
pub struct BatchOrchestrator {
    checker: Arc<DomainChecker>,
    throttle: Arc<WhoisThrottle>,
    concurrency: usize,
}

impl BatchOrchestrator {
    pub fn new(checker: Arc<DomainChecker>, config: BatchConfig) -> Self {
        Self::with_throttle(
            checker,
            config.concurrency,
            Arc::new(WhoisThrottle::new(config.whois_delay)),
        )
    }

    /// Share one throttle between several orchestrators
    pub fn with_throttle(checker: Arc<DomainChecker>, concurrency: usize, throttle: Arc<WhoisThrottle>) -> Self {
        Self {
            checker,
            throttle,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run_batch(&self, queries: Vec<DomainQuery>, cancel: &CancellationToken) -> Report {
        self.execute(queries, cancel, None).await
    }

    pub async fn run_batch_with_progress(
        &self,
        queries: Vec<DomainQuery>,
        cancel: &CancellationToken,
        progress: ProgressCallback,
    ) -> Report {
        self.execute(queries, cancel, Some(progress)).await
    }

    async fn execute(
        &self,
        queries: Vec<DomainQuery>,
        cancel: &CancellationToken,
        progress: Option<ProgressCallback>,
    ) -> Report {
        let total = queries.len();
        if total == 0 {
            return Report::new(Vec::new(), false);
        }

        let batch_start = Instant::now();
        let workers = self.concurrency.min(total);
        let queries = Arc::new(queries);
        let cursor = Arc::new(AtomicUsize::new(0));
        let state = Arc::new(Mutex::new(BatchState {
            slots: vec![None; total],
            progress: BatchProgress {
                total,
                ..BatchProgress::default()
            },
        }));

        tracing::info!(queries = total, workers, "Starting availability batch");

        let mut join_set = JoinSet::new();
        for worker in 0..workers {
            let queries = Arc::clone(&queries);
            let cursor = Arc::clone(&cursor);
            let state = Arc::clone(&state);
            let checker = Arc::clone(&self.checker);
            let throttle = Arc::clone(&self.throttle);
            let cancel = cancel.clone();
            let progress = progress.clone();

            join_set.spawn(async move {
                loop {
                    if cancel.is_cancelled() {
                        tracing::debug!(worker, "Worker stopping on cancellation");
                        break;
                    }
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    let Some(query) = queries.get(index) else {
                        break;
                    };

                    let result = checker.check_throttled(query, &throttle).await;
                    let snapshot = state.lock().store(index, result);
                    if let Some(callback) = &progress {
                        callback(&snapshot);
                    }
                }
            });
        }

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                tracing::warn!(error = %e, "Batch worker terminated abnormally");
            }
        }

        let cancelled = cancel.is_cancelled();
        let slots = std::mem::take(&mut state.lock().slots);
        let mut unattempted = 0usize;
        let results: Vec<VerificationResult> = slots
            .into_iter()
            .zip(queries.iter())
            .map(|(slot, query)| {
                slot.unwrap_or_else(|| {
                    unattempted += 1;
                    let reason = if cancelled { "batch cancelled before check" } else { "worker aborted before check" };
                    VerificationResult::unattempted(query.clone(), reason)
                })
            })
            .collect();

        let report = Report::new(results, cancelled && unattempted > 0);
        let summary = report.summary();

        tracing::info!(
            total = summary.total,
            available = summary.available,
            taken = summary.taken,
            unknown = summary.unknown,
            unattempted = summary.unattempted,
            interrupted = report.interrupted(),
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Availability batch finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checker::test_support::*;
    use crate::domain::DnsResolver;
    use crate::registry::RegistryLookup;
    use crate::types::{Candidate, Confidence};
    use async_trait::async_trait;

    fn queries(n: usize) -> Vec<DomainQuery> {
        (0..n)
            .map(|i| DomainQuery::new(Candidate::combined(format!("name{:02}", i), true), "com"))
            .collect()
    }

    fn instant_checker(resolving: &[&str]) -> Arc<DomainChecker> {
        Arc::new(DomainChecker::with_components(
            CheckConfig::default(),
            Arc::new(StaticResolver::new(resolving.iter().copied())),
            None,
        ))
    }

    /// Later queries answer sooner, so completion order is the reverse of input
    struct ReverseDelayResolver;

    #[async_trait]
    impl DnsResolver for ReverseDelayResolver {
        async fn resolve(&self, domain: &str) -> crate::error::Result<bool> {
            let n: u64 = domain[4..6].parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(100 - n * 10)).await;
            Ok(n % 2 == 0)
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let orchestrator = BatchOrchestrator::new(instant_checker(&[]), BatchConfig::default());
        let report = orchestrator.run_batch(Vec::new(), &CancellationToken::new()).await;
        assert!(report.is_empty());
        assert!(!report.interrupted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_preserved_regardless_of_completion_order() {
        let checker = Arc::new(DomainChecker::with_components(
            CheckConfig::default(),
            Arc::new(ReverseDelayResolver),
            None,
        ));
        let orchestrator = BatchOrchestrator::new(
            checker,
            BatchConfig {
                concurrency: 10,
                whois_delay: Duration::ZERO,
            },
        );

        let input = queries(10);
        let report = orchestrator.run_batch(input.clone(), &CancellationToken::new()).await;

        assert_eq!(report.len(), input.len());
        for (i, (result, query)) in report.results().iter().zip(&input).enumerate() {
            assert_eq!(result.query(), query);
            let expected = if i % 2 == 0 { AvailabilityStatus::Taken } else { AvailabilityStatus::Available };
            assert_eq!(result.availability(), expected);
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_cancellation_marks_remaining_unattempted() {
        let orchestrator = BatchOrchestrator::new(
            instant_checker(&["name00.com"]),
            BatchConfig {
                concurrency: 2,
                whois_delay: Duration::ZERO,
            },
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let progress: ProgressCallback = Arc::new(move |p: &BatchProgress| {
            if p.completed == 4 {
                trigger.cancel();
            }
        });

        let report = orchestrator
            .run_batch_with_progress(queries(10), &cancel, progress)
            .await;

        assert_eq!(report.len(), 10);
        assert!(report.interrupted());
        let attempted = report.results().iter().filter(|r| r.attempted()).count();
        assert_eq!(attempted, 4);
        for result in report.results().iter().filter(|r| !r.attempted()) {
            assert_eq!(result.availability(), AvailabilityStatus::Unknown);
            assert!(!result.whois_checked());
            assert_eq!(result.confidence(), Confidence::DnsOnly);
        }
        assert_eq!(report.summary().unattempted, 6);
    }

    #[tokio::test]
    async fn test_progress_reaches_total() {
        let orchestrator = BatchOrchestrator::new(instant_checker(&["name01.com"]), BatchConfig::default());
        let last = Arc::new(Mutex::new(BatchProgress::default()));
        let sink = Arc::clone(&last);
        let progress: ProgressCallback = Arc::new(move |p: &BatchProgress| {
            *sink.lock() = *p;
        });

        orchestrator
            .run_batch_with_progress(queries(5), &CancellationToken::new(), progress)
            .await;

        let last = *last.lock();
        assert_eq!(last.completed, 5);
        assert_eq!(last.total, 5);
        assert_eq!(last.taken, 1);
        assert_eq!(last.available, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registry_calls_are_spaced_across_workers() {
        let registry = Arc::new(StaticRegistry::answering(FREE_BODY));
        let checker = Arc::new(DomainChecker::with_components(
            CheckConfig::default(),
            Arc::new(StaticResolver::new(Vec::<String>::new())),
            Some(Arc::clone(&registry) as Arc<dyn RegistryLookup>),
        ));
        let orchestrator = BatchOrchestrator::new(
            checker,
            BatchConfig {
                concurrency: 4,
                whois_delay: Duration::from_millis(500),
            },
        );

        let start = tokio::time::Instant::now();
        let report = orchestrator.run_batch(queries(5), &CancellationToken::new()).await;

        assert_eq!(registry.calls(), 5);
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert!(report.results().iter().all(|r| r.confidence() == Confidence::WhoisConfirmed));
    }
}
