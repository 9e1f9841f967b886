//! Run configuration
//!
//! Layering, lowest precedence first: built-in defaults, an optional TOML
//! file, `DOMAIN_FORGE_*` environment variables, then CLI flags (applied by
//! the binary on the loaded value).

use crate::domain::{get_tld_list, validate_tlds, Registrar};
use crate::error::{DomainForgeError, Result};
use crate::generate::{CandidateLimit, CombinationRules};
use crate::lexicon::{parse_word_list, Category, WordSet};
use crate::types::{CheckConfig, LlmConfig, RecordSource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Candidate cap applied to category runs when no explicit limit is set
pub const CATEGORY_CANDIDATE_CAP: usize = 50;

/// Everything a run needs, as read from a config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub words: WordsConfig,
    /// TLDs to check, without leading dots
    pub tlds: Vec<String>,
    pub rules: CombinationRules,
    pub check: CheckSettings,
    pub ai: AiSettings,
    pub limit: CandidateLimit,
    pub registrar: Registrar,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            words: WordsConfig::default(),
            tlds: vec!["com".to_string()],
            rules: CombinationRules::default(),
            check: CheckSettings::default(),
            ai: AiSettings::default(),
            limit: CandidateLimit::default(),
            registrar: Registrar::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    pub custom: Vec<String>,
    pub stems: Vec<String>,
    pub compulsory: Vec<String>,
    /// `None` means the built-in startup endings
    pub endings: Option<Vec<String>>,
    /// Built-in category names whose words join `custom`
    pub categories: Vec<String>,
}

/// Checker settings; durations are milliseconds in the file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    pub concurrency: usize,
    pub whois_delay_ms: u64,
    pub dns_timeout_ms: u64,
    pub whois_timeout_ms: u64,
    pub force_double_verification: bool,
    pub optimistic_fallback: bool,
    pub record_source: RecordSource,
}

impl Default for CheckSettings {
    fn default() -> Self {
        let defaults = CheckConfig::default();
        Self {
            concurrency: defaults.concurrency,
            whois_delay_ms: defaults.whois_delay.as_millis() as u64,
            dns_timeout_ms: defaults.dns_timeout.as_millis() as u64,
            whois_timeout_ms: defaults.whois_timeout.as_millis() as u64,
            force_double_verification: defaults.force_double_verification,
            optimistic_fallback: defaults.optimistic_fallback,
            record_source: defaults.record_source,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub enabled: bool,
    /// Provider name; picked from the available API keys when unset
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Names to ask for
    pub count: usize,
    pub temperature: f32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: None,
            model: None,
            base_url: None,
            count: 20,
            temperature: 0.7,
        }
    }
}

impl ForgeConfig {
    /// Load from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainForgeError::io(
                format!("Failed to read configuration file: {}", e),
                Some(path.display().to_string()),
            )
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DOMAIN_FORGE_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(&format!("DOMAIN_FORGE_{}", key)).filter(|v| !v.trim().is_empty());

        if let Some(value) = get("TLDS") {
            self.tlds = parse_word_list(&value);
        }
        if let Some(value) = get("TLD_PRESET") {
            self.tlds = get_tld_list(&value)
                .ok_or_else(|| DomainForgeError::config(format!("Unknown TLD preset '{}'", value)))?;
        }
        if let Some(value) = get("CONCURRENCY") {
            self.check.concurrency = parse_env("DOMAIN_FORGE_CONCURRENCY", &value)?;
        }
        if let Some(value) = get("WHOIS_DELAY_MS") {
            self.check.whois_delay_ms = parse_env("DOMAIN_FORGE_WHOIS_DELAY_MS", &value)?;
        }
        if let Some(value) = get("FORCE_WHOIS") {
            self.check.force_double_verification = parse_bool("DOMAIN_FORGE_FORCE_WHOIS", &value)?;
        }
        if let Some(value) = get("OPTIMISTIC") {
            self.check.optimistic_fallback = parse_bool("DOMAIN_FORGE_OPTIMISTIC", &value)?;
        }
        if let Some(value) = get("RECORD_SOURCE") {
            self.check.record_source = value.parse()?;
        }
        if let Some(value) = get("AI_PROVIDER") {
            self.ai.provider = Some(value.trim().to_lowercase());
        }
        if let Some(value) = get("AI_MODEL") {
            self.ai.model = Some(value.trim().to_string());
        }
        if let Some(value) = get("AI_COUNT") {
            self.ai.count = parse_env("DOMAIN_FORGE_AI_COUNT", &value)?;
        }
        if let Some(value) = get("MAX_CANDIDATES") {
            self.limit.max_candidates = Some(parse_env("DOMAIN_FORGE_MAX_CANDIDATES", &value)?);
        }
        if let Some(value) = get("SEED") {
            self.limit.shuffle_seed = Some(parse_env("DOMAIN_FORGE_SEED", &value)?);
        }
        if let Some(value) = get("REGISTRAR") {
            self.registrar = value.parse()?;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.check.concurrency == 0 {
            return Err(DomainForgeError::config("check.concurrency must be at least 1"));
        }
        if self.check.dns_timeout_ms == 0 || self.check.whois_timeout_ms == 0 {
            return Err(DomainForgeError::config("timeouts must be greater than zero"));
        }
        self.validated_tlds()?;
        if self.limit.max_candidates == Some(0) {
            return Err(DomainForgeError::config("limit.max_candidates must be at least 1"));
        }
        for category in &self.words.categories {
            category.parse::<Category>()?;
        }
        Ok(())
    }

    /// Normalized, deduplicated TLD list
    pub fn validated_tlds(&self) -> Result<Vec<String>> {
        validate_tlds(&self.tlds)
    }

    pub fn word_set(&self) -> Result<WordSet> {
        let mut builder = WordSet::builder()
            .custom_words(&self.words.custom)
            .partial_stems(&self.words.stems)
            .compulsory_words(&self.words.compulsory);

        for name in &self.words.categories {
            builder = builder.category(name.parse()?);
        }

        builder = match &self.words.endings {
            Some(endings) => builder.endings(endings),
            None => builder.default_endings(),
        };

        Ok(builder.build())
    }

    /// Configured limit, or [`CATEGORY_CANDIDATE_CAP`] when built-in
    /// categories are in play and no cap was given
    pub fn candidate_limit(&self) -> CandidateLimit {
        let mut limit = self.limit;
        if limit.max_candidates.is_none() && !self.words.categories.is_empty() {
            limit.max_candidates = Some(CATEGORY_CANDIDATE_CAP);
        }
        limit
    }

    pub fn check_config(&self) -> CheckConfig {
        CheckConfig {
            concurrency: self.check.concurrency,
            whois_delay: Duration::from_millis(self.check.whois_delay_ms),
            dns_timeout: Duration::from_millis(self.check.dns_timeout_ms),
            whois_timeout: Duration::from_millis(self.check.whois_timeout_ms),
            force_double_verification: self.check.force_double_verification,
            optimistic_fallback: self.check.optimistic_fallback,
            record_source: self.check.record_source,
        }
    }

    /// Provider settings from the process environment
    pub fn llm_config(&self) -> Option<LlmConfig> {
        self.llm_config_with(|key| std::env::var(key).ok())
    }

    /// Resolve provider, key and model. Without an explicit provider the
    /// first one with credentials wins: OpenAI, Anthropic, Gemini, then
    /// Ollama when `OLLAMA_HOST` is set.
    pub fn llm_config_with<F>(&self, lookup: F) -> Option<LlmConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.ai.enabled {
            return None;
        }
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match &self.ai.provider {
            Some(provider) => provider.clone(),
            None => ["openai", "anthropic", "gemini", "ollama"]
                .into_iter()
                .find(|p| get(provider_key_var(p)).is_some())?
                .to_string(),
        };

        let (api_key, env_base_url, env_model, default_model) = match provider.as_str() {
            "openai" => (
                get("OPENAI_API_KEY")?,
                get("OPENAI_BASE_URL"),
                get("OPENAI_MODEL"),
                "gpt-4.1-mini",
            ),
            "anthropic" => (get("ANTHROPIC_API_KEY")?, None, get("ANTHROPIC_MODEL"), "claude-sonnet-4-0"),
            "gemini" => (get("GEMINI_API_KEY")?, None, get("GEMINI_MODEL"), "gemini-2.5-flash"),
            "ollama" => (String::new(), get("OLLAMA_HOST"), get("OLLAMA_MODEL"), "llama3.2"),
            // create_provider reports unknown names
            _ => (String::new(), None, None, ""),
        };

        Some(LlmConfig {
            provider,
            model: self.ai.model.clone().or(env_model).unwrap_or_else(|| default_model.to_string()),
            api_key,
            base_url: self.ai.base_url.clone().or(env_base_url),
            temperature: self.ai.temperature,
        })
    }
}

fn provider_key_var(provider: &str) -> &'static str {
    match provider {
        "openai" => "OPENAI_API_KEY",
        "anthropic" => "ANTHROPIC_API_KEY",
        "gemini" => "GEMINI_API_KEY",
        _ => "OLLAMA_HOST",
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainForgeError::config(format!("Invalid value for {}: '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainForgeError::config(format!(
            "Invalid boolean for {}: '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::DEFAULT_ENDINGS;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.tlds, vec!["com"]);
        assert!(config.validate().is_ok());
        let check = config.check_config();
        assert_eq!(check.whois_delay, Duration::from_millis(500));
        assert!(check.optimistic_fallback);
        assert_eq!(config.word_set().unwrap().endings().len(), DEFAULT_ENDINGS.len());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
tlds = ["com", "io"]
registrar = "porkbun"

[words]
custom = ["Zen", "flow"]
endings = ["ly"]
categories = ["health"]

[rules]
word_connector_word = true

[check]
concurrency = 8
whois_delay_ms = 250
record_source = "rdap"

[limit]
max_candidates = 50
shuffle_seed = 7
"#
        )
        .unwrap();

        let config = ForgeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tlds, vec!["com", "io"]);
        assert_eq!(config.registrar, Registrar::Porkbun);
        assert!(config.rules.word_connector_word);
        assert!(config.rules.word_word);
        assert_eq!(config.check.concurrency, 8);
        assert_eq!(config.check.record_source, RecordSource::Rdap);
        assert_eq!(config.check.dns_timeout_ms, 5000);
        assert_eq!(config.limit.max_candidates, Some(50));

        let words = config.word_set().unwrap();
        assert_eq!(&words.custom_words()[..2], &["zen".to_string(), "flow".to_string()]);
        assert!(words.custom_words().len() > 2);
        assert_eq!(words.endings(), &["ly".to_string()]);
    }

    #[test]
    fn test_invalid_file() {
        assert!(matches!(
            ForgeConfig::from_toml_str("[check]\nconcurrency = 0\n"),
            Err(DomainForgeError::Config { .. })
        ));
        assert!(ForgeConfig::from_toml_str("[words]\ncategories = [\"astrology\"]\n").is_err());
        assert!(ForgeConfig::from_toml_str("tlds = 5").is_err());
        assert!(ForgeConfig::from_file("/nonexistent/domain-forge.toml").is_err());
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(
            ForgeConfig::from_toml_str("[limit]\nmax_candidates = 0\n"),
            Err(DomainForgeError::Config { .. })
        ));
        let mut config = ForgeConfig::default();
        assert!(config
            .apply_env_with(env(&[("DOMAIN_FORGE_MAX_CANDIDATES", "0")]))
            .is_err());
    }

    #[test]
    fn test_invalid_tld_rejected() {
        assert!(ForgeConfig::from_toml_str("tlds = [\"c0m!\"]\n").is_err());
        assert!(ForgeConfig::from_toml_str("tlds = []\n").is_err());
    }

    #[test]
    fn test_category_runs_are_capped_by_default() {
        let mut config = ForgeConfig::default();
        config.words.custom = vec!["zen".to_string()];
        assert_eq!(config.candidate_limit().max_candidates, None);

        config.words.categories = vec!["tech".to_string()];
        assert_eq!(config.candidate_limit().max_candidates, Some(CATEGORY_CANDIDATE_CAP));

        config.limit.max_candidates = Some(500);
        assert_eq!(config.candidate_limit().max_candidates, Some(500));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ForgeConfig::default();
        config
            .apply_env_with(env(&[
                ("DOMAIN_FORGE_TLDS", "io, ai"),
                ("DOMAIN_FORGE_CONCURRENCY", "2"),
                ("DOMAIN_FORGE_FORCE_WHOIS", "yes"),
                ("DOMAIN_FORGE_RECORD_SOURCE", "off"),
                ("DOMAIN_FORGE_REGISTRAR", "namecheap"),
                ("DOMAIN_FORGE_SEED", "42"),
            ]))
            .unwrap();

        assert_eq!(config.tlds, vec!["io", "ai"]);
        assert_eq!(config.check.concurrency, 2);
        assert!(config.check.force_double_verification);
        assert_eq!(config.check.record_source, RecordSource::Off);
        assert_eq!(config.registrar, Registrar::Namecheap);
        assert_eq!(config.limit.shuffle_seed, Some(42));
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = ForgeConfig::default();
        assert!(config
            .apply_env_with(env(&[("DOMAIN_FORGE_CONCURRENCY", "many")]))
            .is_err());
        assert!(config
            .apply_env_with(env(&[("DOMAIN_FORGE_OPTIMISTIC", "maybe")]))
            .is_err());
    }

    #[test]
    fn test_llm_provider_selection() {
        let config = ForgeConfig::default();
        assert!(config.llm_config_with(env(&[])).is_none());

        let llm = config
            .llm_config_with(env(&[("GEMINI_API_KEY", "g"), ("ANTHROPIC_API_KEY", "a")]))
            .unwrap();
        assert_eq!(llm.provider, "anthropic");
        assert_eq!(llm.api_key, "a");

        let llm = config
            .llm_config_with(env(&[("OLLAMA_HOST", "http://gpu-box:11434")]))
            .unwrap();
        assert_eq!(llm.provider, "ollama");
        assert_eq!(llm.base_url.as_deref(), Some("http://gpu-box:11434"));

        let mut explicit = ForgeConfig::default();
        explicit.ai.provider = Some("openai".to_string());
        explicit.ai.model = Some("gpt-4o".to_string());
        assert!(explicit.llm_config_with(env(&[("GEMINI_API_KEY", "g")])).is_none());
        let llm = explicit
            .llm_config_with(env(&[("OPENAI_API_KEY", "sk"), ("OPENAI_MODEL", "ignored")]))
            .unwrap();
        assert_eq!(llm.model, "gpt-4o");

        let mut disabled = ForgeConfig::default();
        disabled.ai.enabled = false;
        assert!(disabled.llm_config_with(env(&[("OPENAI_API_KEY", "sk")])).is_none());
    }
}
