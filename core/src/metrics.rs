//! Prometheus-tellere for analysekjernen.
//!
//! Registret opprettes første gang det brukes. Feiler registreringen
//! (skal ikke skje med faste navn) blir alle `record_*` no-ops.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    pub registry: Registry,
    parse_failures: IntCounter,
    empty_windows: IntCounter,
    dropped_rows: IntCounter,
    stale_results: IntCounter,
    classifications: IntCounterVec,
}

static METRICS: Lazy<Option<Metrics>> = Lazy::new(|| match Metrics::new() {
    Ok(m) => Some(m),
    Err(e) => {
        log::warn!("metrics registry unavailable: {}", e);
        None
    }
});

impl Metrics {
    fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let parse_failures = IntCounter::new(
            "runlog_parse_failures_total",
            "Time/pace strings that could not be parsed",
        )?;
        let empty_windows = IntCounter::new(
            "runlog_empty_windows_total",
            "Summaries requested for a window without samples",
        )?;
        let dropped_rows = IntCounter::new(
            "runlog_dropped_rows_total",
            "Imported rows discarded for lacking both distance and duration",
        )?;
        let stale_results = IntCounter::new(
            "runlog_stale_results_total",
            "Analysis results discarded because a newer analysis was started",
        )?;
        let classifications = IntCounterVec::new(
            Opts::new("runlog_classifications_total", "Segment classifications by label"),
            &["section", "label"],
        )?;

        registry.register(Box::new(parse_failures.clone()))?;
        registry.register(Box::new(empty_windows.clone()))?;
        registry.register(Box::new(dropped_rows.clone()))?;
        registry.register(Box::new(stale_results.clone()))?;
        registry.register(Box::new(classifications.clone()))?;

        Ok(Self {
            registry,
            parse_failures,
            empty_windows,
            dropped_rows,
            stale_results,
            classifications,
        })
    }
}

pub fn global() -> Option<&'static Metrics> {
    METRICS.as_ref()
}

pub fn parse_failures_total() -> u64 {
    global().map(|m| m.parse_failures.get()).unwrap_or(0)
}

pub fn empty_windows_total() -> u64 {
    global().map(|m| m.empty_windows.get()).unwrap_or(0)
}

pub fn dropped_rows_total() -> u64 {
    global().map(|m| m.dropped_rows.get()).unwrap_or(0)
}

pub fn stale_results_total() -> u64 {
    global().map(|m| m.stale_results.get()).unwrap_or(0)
}

pub fn classifications_total(section: &str, label: &str) -> u64 {
    global()
        .map(|m| m.classifications.with_label_values(&[section, label]).get())
        .unwrap_or(0)
}

pub(crate) fn record_parse_failure() {
    if let Some(m) = global() {
        m.parse_failures.inc();
    }
}

pub(crate) fn record_empty_window() {
    if let Some(m) = global() {
        m.empty_windows.inc();
    }
}

pub(crate) fn record_dropped_row() {
    if let Some(m) = global() {
        m.dropped_rows.inc();
    }
}

pub(crate) fn record_stale_result() {
    if let Some(m) = global() {
        m.stale_results.inc();
    }
}

pub(crate) fn record_classification(section: &str, label: &str) {
    if let Some(m) = global() {
        m.classifications.with_label_values(&[section, label]).inc();
    }
}

/// Tekstformat (Prometheus exposition) av alle tellere.
pub fn gather_text() -> String {
    let Some(m) = global() else {
        return String::new();
    };
    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&m.registry.gather(), &mut buf) {
        log::warn!("failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
