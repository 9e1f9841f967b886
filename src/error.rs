//! Error handling for domain-forge

use thiserror::Error;

/// Why an AI provider call produced nothing usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Transport failure, server error, bad credentials or unparseable reply
    Unavailable,
    /// The provider rejected the call for quota or rate reasons (HTTP 429)
    QuotaExceeded,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderFailure::Unavailable => write!(f, "unavailable"),
            ProviderFailure::QuotaExceeded => write!(f, "quota exceeded"),
        }
    }
}

/// Main error type for domain-forge
#[derive(Error, Debug, Clone)]
pub enum DomainForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No candidates could be generated: {message}")]
    EmptyInput { message: String },

    #[error("AI provider '{provider}' {kind}: {message}")]
    Provider {
        provider: String,
        kind: ProviderFailure,
        message: String,
    },

    #[error("Domain checking error for '{domain}': {message}")]
    DomainCheck {
        domain: String,
        message: String,
        method: Option<String>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an empty-input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create a provider-unavailable error
    pub fn provider_unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            kind: ProviderFailure::Unavailable,
            message: message.into(),
        }
    }

    /// Create a provider-quota error
    pub fn provider_quota(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            kind: ProviderFailure::QuotaExceeded,
            message: message.into(),
        }
    }

    /// Create a domain checking error
    pub fn domain_check(
        domain: impl Into<String>,
        message: impl Into<String>,
        method: Option<String>,
    ) -> Self {
        Self::DomainCheck {
            domain: domain.into(),
            message: message.into(),
            method,
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the pipeline must stop before verification
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EmptyInput { .. } | Self::Config { .. })
    }

    /// Whether this is a per-call transport failure (timeout or network)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Network { .. })
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your config file, .env or flags", message)
            }
            Self::EmptyInput { message } => {
                format!("❌ Nothing to check: {}\n💡 Provide --words or --stems, or relax --require", message)
            }
            Self::Provider { provider, kind, message } => {
                format!("⚠️  AI provider ({}) {}: {}\n💡 Continuing with generated combinations only", provider, kind, message)
            }
            Self::DomainCheck { domain, message, .. } => {
                format!("⚠️  Could not check domain '{}': {}", domain, message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Timeout { operation, timeout_ms } => {
                format!("⏱️  Operation '{}' timed out after {}ms\n💡 Try increasing timeouts or reducing concurrency", operation, timeout_ms)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<reqwest::Error> for DomainForgeError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::Timeout {
                operation: "HTTP request".to_string(),
                timeout_ms: 0,
            }
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for DomainForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<toml::de::Error> for DomainForgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("invalid config file: {}", err))
    }
}

impl From<std::io::Error> for DomainForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainForgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fatal_classification() {
        assert!(DomainForgeError::empty_input("no words").is_fatal());
        assert!(!DomainForgeError::provider_quota("openai", "429").is_fatal());
        assert!(!DomainForgeError::timeout("WHOIS read", Duration::from_secs(5)).is_fatal());
    }

    #[test]
    fn test_transport_classification() {
        assert!(DomainForgeError::timeout("DNS lookup", Duration::from_millis(1500)).is_transport());
        assert!(DomainForgeError::network("reset", None, None).is_transport());
        assert!(!DomainForgeError::parse("bad json", None).is_transport());
    }

    #[test]
    fn test_timeout_message_uses_millis() {
        let err = DomainForgeError::timeout("WHOIS connect", Duration::from_millis(2500));
        assert_eq!(err.to_string(), "Timeout error: WHOIS connect timed out after 2500ms");
    }

    #[test]
    fn test_provider_message() {
        let err = DomainForgeError::provider_quota("anthropic", "slow down");
        assert!(err.to_string().contains("quota exceeded"));
        assert!(err.user_message().contains("generated combinations only"));
    }
}
