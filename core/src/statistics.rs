use ordered_float::OrderedFloat;
use thiserror::Error;

use crate::metrics;
use crate::models::{Sample, SampleWindow};
use crate::time_value::format_pace;
use crate::types::SegmentSummary;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Valgt tids-/distanseområde traff ingen samples. Brukeren kan justere området.
    #[error("no data in range")]
    EmptyWindow,
}

/// Samples innenfor vinduet, i opprinnelig rekkefølge.
pub fn filter_window<'a>(samples: &'a [Sample], window: &SampleWindow) -> Vec<&'a Sample> {
    samples.iter().filter(|s| window.contains(s)).collect()
}

/// Aggregater over vinduet.
///
/// Tempo utledes alltid fra totalene (`tid / (distanse/1000)`), aldri som
/// snitt av radenes tempo-etiketter.
pub fn summarize(samples: &[Sample], window: &SampleWindow) -> Result<SegmentSummary, StatsError> {
    let selected = filter_window(samples, window);
    if selected.is_empty() {
        log::info!("summary requested for empty window {:?}", window);
        metrics::record_empty_window();
        return Err(StatsError::EmptyWindow);
    }
    Ok(summarize_selected(&selected))
}

pub fn summarize_all(samples: &[Sample]) -> Result<SegmentSummary, StatsError> {
    summarize(samples, &SampleWindow::All)
}

pub(crate) fn summarize_selected(selected: &[&Sample]) -> SegmentSummary {
    let total_distance_meters: f64 = selected.iter().map(|s| s.distance_meters).sum();
    let total_elapsed_seconds: u64 = selected.iter().map(|s| s.elapsed_seconds as u64).sum();

    let (average_heart_rate_bpm, max_heart_rate_bpm) = heart_rate_stats(selected);
    let average_pace_seconds = derived_pace(total_distance_meters, total_elapsed_seconds);

    SegmentSummary {
        sample_count: selected.len(),
        total_distance_meters,
        total_elapsed_seconds,
        average_heart_rate_bpm,
        max_heart_rate_bpm,
        average_pace_seconds,
        average_pace_label: format_pace(average_pace_seconds),
    }
}

/// (snitt, maks) over rader med kjent puls; (0, 0) hvis ingen.
fn heart_rate_stats(selected: &[&Sample]) -> (u32, u32) {
    let hrs: Vec<f64> = selected
        .iter()
        .filter(|s| s.has_heart_rate())
        .map(|s| s.heart_rate_bpm as f64)
        .collect();
    if hrs.is_empty() {
        return (0, 0);
    }
    let avg = hrs.iter().sum::<f64>() / hrs.len() as f64;
    let max = hrs.iter().copied().map(OrderedFloat).max().map(|m| m.0).unwrap_or(0.0);
    (avg.round() as u32, max as u32)
}

/// sek/km fra totaler; 0 når distansen er 0.
pub fn derived_pace(total_distance_meters: f64, total_elapsed_seconds: u64) -> f64 {
    if total_distance_meters <= 0.0 {
        return 0.0;
    }
    total_elapsed_seconds as f64 / (total_distance_meters / 1000.0)
}
