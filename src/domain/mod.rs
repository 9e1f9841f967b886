//! Domain availability checking module

pub mod arbitration;
pub mod checker;
pub mod dns;
pub mod registrar;
pub mod validator;

// Re-export main functionality
pub use arbitration::{arbitrate, DnsOutcome, RegistryOutcome, Verdict};
pub use checker::DomainChecker;
pub use dns::{DnsResolver, SystemResolver};
pub use registrar::Registrar;
pub use validator::{validate_tld, validate_tlds};

/// Common TLD lists
pub const POPULAR_TLDS: &[&str] = &[
    "com", "org", "net", "io", "ai", "co", "me", "app", "dev", "tech", "xyz"
];

pub const STARTUP_TLDS: &[&str] = &[
    "com", "org", "io", "ai", "tech", "app", "dev", "xyz"
];

pub const ENTERPRISE_TLDS: &[&str] = &[
    "com", "org", "net", "biz", "info", "us"
];

pub const COUNTRY_TLDS: &[&str] = &[
    "us", "uk", "de", "fr", "ca", "au", "jp", "br", "in"
];

/// Get TLD list by name
pub fn get_tld_list(name: &str) -> Option<Vec<String>> {
    let list = match name.to_lowercase().as_str() {
        "popular" => POPULAR_TLDS,
        "startup" => STARTUP_TLDS,
        "enterprise" => ENTERPRISE_TLDS,
        "country" => COUNTRY_TLDS,
        _ => return None,
    };
    Some(list.iter().map(|s| s.to_string()).collect())
}

/// Get all available TLD list names
pub fn get_tld_list_names() -> Vec<&'static str> {
    vec!["popular", "startup", "enterprise", "country"]
}
