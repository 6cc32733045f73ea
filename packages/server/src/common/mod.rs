// Common types and utilities shared across the application

pub mod metrics;

pub use metrics::{MetricsSnapshot, ServiceMetrics};
