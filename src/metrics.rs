//! Lock-free counters shared by the checker and the suggestion adapter

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters, safe to share behind an `Arc`
#[derive(Debug, Default)]
pub struct PerformanceMetrics {
    domains_checked: AtomicU64,
    dns_lookups: AtomicU64,
    registry_lookups: AtomicU64,
    errors_encountered: AtomicU64,
    total_check_time_ms: AtomicU64,
    api_calls: AtomicU64,
    names_suggested: AtomicU64,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_domains_checked(&self) {
        self.domains_checked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_dns_lookups(&self) {
        self.dns_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_registry_lookups(&self) {
        self.registry_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.errors_encountered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_check_time(&self, millis: u64) {
        self.total_check_time_ms.fetch_add(millis, Ordering::Relaxed);
    }

    pub fn increment_api_calls(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_names_suggested(&self, count: u64) {
        self.names_suggested.fetch_add(count, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            domains_checked: self.domains_checked.load(Ordering::Relaxed),
            dns_lookups: self.dns_lookups.load(Ordering::Relaxed),
            registry_lookups: self.registry_lookups.load(Ordering::Relaxed),
            errors_encountered: self.errors_encountered.load(Ordering::Relaxed),
            total_check_time_ms: self.total_check_time_ms.load(Ordering::Relaxed),
            api_calls: self.api_calls.load(Ordering::Relaxed),
            names_suggested: self.names_suggested.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub domains_checked: u64,
    pub dns_lookups: u64,
    pub registry_lookups: u64,
    pub errors_encountered: u64,
    pub total_check_time_ms: u64,
    pub api_calls: u64,
    pub names_suggested: u64,
}

impl MetricsSnapshot {
    pub fn avg_check_time_ms(&self) -> f64 {
        if self.domains_checked == 0 {
            0.0
        } else {
            self.total_check_time_ms as f64 / self.domains_checked as f64
        }
    }
}
