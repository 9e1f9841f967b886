//! One-shot AI suggestion adapter

use crate::error::Result;
use crate::llm::{create_provider, LlmProvider};
use crate::metrics::PerformanceMetrics;
use crate::types::LlmConfig;
use std::sync::Arc;
use std::time::Instant;

/// Wraps a provider so that AI failures never stop a run
#[derive(Clone)]
pub struct SuggestionAdapter {
    provider: Arc<dyn LlmProvider>,
    metrics: Arc<PerformanceMetrics>,
}

impl SuggestionAdapter {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            metrics: Arc::new(PerformanceMetrics::new()),
        }
    }

    /// Build the provider named in `config`
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        Ok(Self::new(Arc::from(create_provider(config)?)))
    }

    pub fn with_metrics(mut self, metrics: Arc<PerformanceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Call the provider once. Errors and empty replies yield an empty list.
    pub async fn generate(&self, description: &str, count: usize) -> Vec<String> {
        if description.trim().is_empty() || count == 0 {
            return Vec::new();
        }
        if !self.provider.is_ready() {
            tracing::warn!(provider = %self.provider.name(), "AI provider not ready, skipping suggestions");
            return Vec::new();
        }

        let start_time = Instant::now();
        self.metrics.increment_api_calls();

        match self.provider.suggest_names(description, count).await {
            Ok(names) => {
                self.metrics.add_names_suggested(names.len() as u64);
                if names.is_empty() {
                    tracing::warn!(provider = %self.provider.name(), "AI provider returned no names");
                } else {
                    tracing::info!(
                        provider = %self.provider.name(),
                        model = %self.provider.model(),
                        names = names.len(),
                        duration_ms = %start_time.elapsed().as_millis(),
                        "AI suggestions received"
                    );
                }
                names
            }
            Err(e) => {
                self.metrics.increment_errors();
                tracing::warn!(
                    provider = %self.provider.name(),
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "AI suggestion failed, continuing without it"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainForgeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedProvider {
        reply: Result<Vec<String>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn suggest_names(&self, _description: &str, _count: usize) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn model(&self) -> &str {
            "test"
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    fn adapter(reply: Result<Vec<String>>) -> (SuggestionAdapter, Arc<ScriptedProvider>) {
        let provider = Arc::new(ScriptedProvider {
            reply,
            calls: AtomicUsize::new(0),
        });
        (SuggestionAdapter::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn test_forwards_names_untouched() {
        let (adapter, provider) = adapter(Ok(vec!["Zenly.com".to_string(), "flow ly".to_string()]));
        let names = adapter.generate("calm app", 5).await;
        assert_eq!(names, vec!["Zenly.com", "flow ly"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.metrics.get_stats().names_suggested, 2);
    }

    #[tokio::test]
    async fn test_quota_error_is_swallowed() {
        let (adapter, provider) = adapter(Err(DomainForgeError::provider_quota("scripted", "429")));
        assert!(adapter.generate("calm app", 5).await.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.metrics.get_stats().errors_encountered, 1);
    }

    #[tokio::test]
    async fn test_blank_description_skips_call() {
        let (adapter, provider) = adapter(Ok(vec!["zenly".to_string()]));
        assert!(adapter.generate("   ", 5).await.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
