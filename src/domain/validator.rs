//! Domain name validation utilities

use crate::error::{DomainForgeError, Result};
use regex::Regex;

pub const MIN_BASE_NAME_LEN: usize = 3;
pub const MAX_LABEL_LEN: usize = 63;

/// Cheap syntax check for a base name (single label, no TLD)
///
/// 3 to 63 characters of lowercase ASCII letters, digits and hyphens,
/// starting and ending with a letter or digit.
pub fn is_valid_base_name(name: &str) -> bool {
    let len = name.len();
    if !(MIN_BASE_NAME_LEN..=MAX_LABEL_LEN).contains(&len) {
        return false;
    }
    let bytes = name.as_bytes();
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    edge_ok(bytes[0])
        && edge_ok(bytes[len - 1])
        && bytes.iter().all(|&b| edge_ok(b) || b == b'-')
}

/// Validate and normalize a TLD (leading dot and case are tolerated)
pub fn validate_tld(tld: &str) -> Result<String> {
    let tld = tld.trim().trim_start_matches('.').to_lowercase();

    if tld.len() < 2 {
        return Err(DomainForgeError::validation("TLD too short (min 2 characters)"));
    }

    if tld.len() > MAX_LABEL_LEN {
        return Err(DomainForgeError::validation("TLD too long (max 63 characters)"));
    }

    // Multi-label suffixes such as `co.uk` are allowed
    let tld_regex = Regex::new(r"^[a-z]{2,63}(\.[a-z]{2,63})?$")
        .map_err(|e| DomainForgeError::internal(e.to_string()))?;

    if !tld_regex.is_match(&tld) {
        return Err(DomainForgeError::validation(format!("Invalid TLD format: '{}'", tld)));
    }

    Ok(tld)
}

/// Validate a list of TLDs, dropping duplicates and keeping order
pub fn validate_tlds(tlds: &[String]) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(tlds.len());
    for tld in tlds {
        let tld = validate_tld(tld)?;
        if !out.contains(&tld) {
            out.push(tld);
        }
    }
    if out.is_empty() {
        return Err(DomainForgeError::config("At least one TLD is required"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_syntax() {
        assert!(is_valid_base_name("zenly"));
        assert!(is_valid_base_name("zen-ly"));
        assert!(is_valid_base_name("24h"));
        assert!(!is_valid_base_name("ab"));
        assert!(!is_valid_base_name("-zen"));
        assert!(!is_valid_base_name("zen-"));
        assert!(!is_valid_base_name("Zenly"));
        assert!(!is_valid_base_name("zen_ly"));
        assert!(!is_valid_base_name(&"a".repeat(64)));
        assert!(is_valid_base_name(&"a".repeat(63)));
    }

    #[test]
    fn test_tld_normalization() {
        assert_eq!(validate_tld(".COM").unwrap(), "com");
        assert_eq!(validate_tld("co.uk").unwrap(), "co.uk");
        assert!(validate_tld("c").is_err());
        assert!(validate_tld("c0m").is_err());
        let tlds = validate_tlds(&["com".to_string(), ".io".to_string(), "COM".to_string()]).unwrap();
        assert_eq!(tlds, vec!["com", "io"]);
        assert!(validate_tlds(&[]).is_err());
    }
}
