//! Lightweight in-process metrics (dependency-free).
//!
//! Counters and histograms are stored as atomics behind `DashMap` and rendered
//! in Prometheus text format on demand.

pub mod metrics;

pub use metrics::{CounterVec, HistogramVec, ResolverMetrics};
