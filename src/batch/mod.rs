//! Concurrent verification of many queries

mod orchestrator;
mod throttle;

pub use orchestrator::{BatchConfig, BatchOrchestrator, BatchProgress, ProgressCallback};
pub use throttle::WhoisThrottle;
