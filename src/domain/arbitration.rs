//! Combining DNS and registry signals into one verdict

use crate::types::{AvailabilityStatus, Confidence};

/// What the DNS probe reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsOutcome {
    Resolved,
    NotFound,
    Failed,
}

impl DnsOutcome {
    pub fn resolved(&self) -> bool {
        matches!(self, DnsOutcome::Resolved)
    }
}

/// What the registry lookup reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOutcome {
    Registered { registrar: Option<String> },
    NotRegistered,
    /// A record came back but said nothing definite
    Inconclusive,
    /// The lookup did not complete (transport error, timeout, unknown server)
    Failed(String),
    /// No lookup was made
    Skipped,
}

impl RegistryOutcome {
    /// A response was received, conclusive or not
    pub fn checked(&self) -> bool {
        matches!(
            self,
            RegistryOutcome::Registered { .. } | RegistryOutcome::NotRegistered | RegistryOutcome::Inconclusive
        )
    }

    pub fn registered(&self) -> Option<bool> {
        match self {
            RegistryOutcome::Registered { .. } => Some(true),
            RegistryOutcome::NotRegistered => Some(false),
            _ => None,
        }
    }

    pub fn registrar(&self) -> Option<&str> {
        match self {
            RegistryOutcome::Registered { registrar } => registrar.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub availability: AvailabilityStatus,
    pub confidence: Confidence,
}

impl Verdict {
    fn new(availability: AvailabilityStatus, confidence: Confidence) -> Self {
        Self { availability, confidence }
    }
}

/// Decide availability. Registry answers beat DNS; DNS presence beats
/// absence of data; an unresolvable name with no registry answer is only
/// called available when `optimistic_fallback` is set.
pub fn arbitrate(dns: DnsOutcome, registry: &RegistryOutcome, optimistic_fallback: bool) -> Verdict {
    match registry.registered() {
        Some(true) => return Verdict::new(AvailabilityStatus::Taken, Confidence::WhoisConfirmed),
        Some(false) => return Verdict::new(AvailabilityStatus::Available, Confidence::WhoisConfirmed),
        None => {}
    }

    match dns {
        DnsOutcome::Resolved => Verdict::new(AvailabilityStatus::Taken, Confidence::DnsOnly),
        DnsOutcome::NotFound if !registry.checked() && optimistic_fallback => {
            Verdict::new(AvailabilityStatus::Available, Confidence::DnsOnly)
        }
        _ => Verdict::new(AvailabilityStatus::Unknown, Confidence::DnsOnly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AvailabilityStatus::*;
    use Confidence::*;

    fn registered() -> RegistryOutcome {
        RegistryOutcome::Registered {
            registrar: Some("Example Registrar".to_string()),
        }
    }

    #[test]
    fn test_registry_answer_wins() {
        for dns in [DnsOutcome::Resolved, DnsOutcome::NotFound, DnsOutcome::Failed] {
            assert_eq!(arbitrate(dns, &registered(), true), Verdict::new(Taken, WhoisConfirmed));
            assert_eq!(
                arbitrate(dns, &RegistryOutcome::NotRegistered, false),
                Verdict::new(Available, WhoisConfirmed)
            );
        }
    }

    #[test]
    fn test_dns_resolved_without_registry() {
        for registry in [
            RegistryOutcome::Skipped,
            RegistryOutcome::Inconclusive,
            RegistryOutcome::Failed("timeout".into()),
        ] {
            assert_eq!(
                arbitrate(DnsOutcome::Resolved, &registry, false),
                Verdict::new(Taken, DnsOnly)
            );
        }
    }

    #[test]
    fn test_optimistic_fallback() {
        for registry in [RegistryOutcome::Skipped, RegistryOutcome::Failed("refused".into())] {
            assert_eq!(
                arbitrate(DnsOutcome::NotFound, &registry, true),
                Verdict::new(Available, DnsOnly)
            );
            assert_eq!(
                arbitrate(DnsOutcome::NotFound, &registry, false),
                Verdict::new(Unknown, DnsOnly)
            );
        }
    }

    #[test]
    fn test_inconclusive_record_is_unknown() {
        assert_eq!(
            arbitrate(DnsOutcome::NotFound, &RegistryOutcome::Inconclusive, true),
            Verdict::new(Unknown, DnsOnly)
        );
    }

    #[test]
    fn test_dns_failure_is_unknown() {
        assert_eq!(
            arbitrate(DnsOutcome::Failed, &RegistryOutcome::Skipped, true),
            Verdict::new(Unknown, DnsOnly)
        );
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(registered().checked());
        assert_eq!(registered().registrar(), Some("Example Registrar"));
        assert!(RegistryOutcome::Inconclusive.checked());
        assert_eq!(RegistryOutcome::Inconclusive.registered(), None);
        assert!(!RegistryOutcome::Failed("x".into()).checked());
        assert!(!RegistryOutcome::Skipped.checked());
    }
}
