//! LLM provider implementations
//!
//! Each provider is implemented in its own module; prompt construction and
//! response parsing are shared here.

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

// Re-export providers for easy access
pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::error::DomainForgeError;
use reqwest::StatusCode;
use serde::Deserialize;

pub(crate) const SYSTEM_PROMPT: &str =
    "You are a brand naming assistant. You reply with domain base names only, as a JSON array of strings.";

/// Build the name suggestion prompt
pub fn build_suggestion_prompt(description: &str, count: usize) -> String {
    format!(
        "Suggest {} short, brandable domain names for: {}

Rules:
- lowercase letters and digits only, no spaces, no hyphens
- no TLD (write \"zenly\", not \"zenly.com\")
- 4 to 15 characters, easy to spell and pronounce

Return ONLY a JSON array of strings, for example:
[\"zenly\", \"flowbase\"]",
        count,
        description.trim()
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameEntry {
    Plain(String),
    Object { name: String },
}

/// Extract names from a model reply
///
/// Accepts a JSON array of strings, a JSON array of `{"name": ...}`
/// objects (possibly wrapped in prose or a code fence), or one name per
/// line. Entries are returned trimmed but otherwise untouched.
pub fn parse_name_list(content: &str) -> Vec<String> {
    if let (Some(start), Some(end)) = (content.find('['), content.rfind(']')) {
        if start < end {
            if let Ok(entries) = serde_json::from_str::<Vec<NameEntry>>(&content[start..=end]) {
                return entries
                    .into_iter()
                    .map(|entry| match entry {
                        NameEntry::Plain(name) | NameEntry::Object { name } => name.trim().to_string(),
                    })
                    .filter(|name| !name.is_empty())
                    .collect();
            }
        }
    }

    content
        .lines()
        .map(|line| {
            strip_list_marker(line.trim())
                .trim_matches(|c| matches!(c, '"' | '\'' | '`' | ','))
                .trim()
        })
        .filter(|line| !line.is_empty() && !line.starts_with("```") && !line.contains(' '))
        .map(str::to_string)
        .collect()
}

/// Drop a leading `1.`, `2)`, `-`, `*` or `•` bullet
fn strip_list_marker(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
        return line;
    }
    line.trim_start_matches(['-', '*', '•']).trim_start()
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> DomainForgeError {
    let detail = body.chars().take(200).collect::<String>();
    match status.as_u16() {
        429 => DomainForgeError::provider_quota(provider, format!("Rate limit or quota exceeded (429): {}", detail)),
        401 => DomainForgeError::provider_unavailable(provider, "Authentication failed (401). Please check your API key"),
        403 => DomainForgeError::provider_unavailable(provider, "Access forbidden (403). Your API key may not have permission for this endpoint"),
        500..=599 => DomainForgeError::provider_unavailable(provider, format!("Server error ({}). The API service is experiencing issues", status)),
        _ => DomainForgeError::provider_unavailable(provider, format!("API request failed ({}): {}", status, detail)),
    }
}

/// Map a transport or decode failure to a provider error
pub(crate) fn transport_error(provider: &str, error: impl std::fmt::Display) -> DomainForgeError {
    DomainForgeError::provider_unavailable(provider, format!("Failed to reach API: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderFailure;

    #[test]
    fn test_prompt_mentions_count_and_description() {
        let prompt = build_suggestion_prompt("  meditation app ", 12);
        assert!(prompt.contains("Suggest 12"));
        assert!(prompt.contains("for: meditation app\n"));
    }

    #[test]
    fn test_parse_string_array() {
        let reply = "Sure! Here you go:\n```json\n[\"zenly\", \" calmbase \", \"\"]\n```";
        assert_eq!(parse_name_list(reply), vec!["zenly", "calmbase"]);
    }

    #[test]
    fn test_parse_object_array() {
        let reply = r#"[{"name": "zenly", "reasoning": "short"}, {"name": "flowly"}]"#;
        assert_eq!(parse_name_list(reply), vec!["zenly", "flowly"]);
    }

    #[test]
    fn test_parse_lines() {
        let reply = "1. zenly\n2) Flowly.com\n- \"calmhub\"\n24seven\n\nHere are some ideas";
        assert_eq!(parse_name_list(reply), vec!["zenly", "Flowly.com", "calmhub", "24seven"]);
    }

    #[test]
    fn test_status_mapping() {
        match status_error("openai", StatusCode::TOO_MANY_REQUESTS, "slow down") {
            DomainForgeError::Provider { kind, provider, .. } => {
                assert_eq!(kind, ProviderFailure::QuotaExceeded);
                assert_eq!(provider, "openai");
            }
            other => panic!("unexpected {:?}", other),
        }
        match status_error("gemini", StatusCode::BAD_GATEWAY, "") {
            DomainForgeError::Provider { kind, .. } => assert_eq!(kind, ProviderFailure::Unavailable),
            other => panic!("unexpected {:?}", other),
        }
    }
}
