//! Heuristiske signaler for klassifisering av et segment.
//!
//! Alle funksjoner er rene. Med for lite data returneres en fast
//! fallback ("stabil"/"jevn", 0 i trend) i stedet for feil.

use ordered_float::OrderedFloat;

use crate::models::Sample;
use crate::types::{IntervalPattern, SignalReport, Thresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendField {
    HeartRate,
    Pace,
}

/// Kjente pulsverdier (0 = ukjent, utelates).
pub fn heart_rate_series(samples: &[Sample]) -> Vec<f64> {
    samples
        .iter()
        .filter(|s| s.has_heart_rate())
        .map(|s| s.heart_rate_bpm as f64)
        .collect()
}

/// Tempo per rad i sek/km, kun rader med tolkbar etikett.
pub fn pace_series(samples: &[Sample]) -> Vec<f64> {
    samples.iter().filter_map(|s| s.pace_seconds()).collect()
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// `1 − stddev/mean`, klemt til [0,1]. Under 2 verdier → 1.0.
fn stability(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 1.0;
    }
    let m = mean(xs);
    if m <= 0.0 {
        return 1.0;
    }
    let var = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    (1.0 - var.sqrt() / m).clamp(0.0, 1.0)
}

fn count_jumps(xs: &[f64], threshold: f64) -> usize {
    xs.windows(2).filter(|w| (w[1] - w[0]).abs() > threshold).count()
}

/// Puls- og tempo-serien for et utvalg, tolket én gang.
///
/// Tempo-etikettene parses kun her; alle tempo-signaler leser fra serien
/// så hver ugyldig etikett logges og telles nøyaktig én gang.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSeries {
    pub sample_count: usize,
    pub heart_rate: Vec<f64>,
    pub pace: Vec<f64>,
}

impl SignalSeries {
    pub fn of(samples: &[Sample]) -> Self {
        Self {
            sample_count: samples.len(),
            heart_rate: heart_rate_series(samples),
            pace: pace_series(samples),
        }
    }

    pub fn report(&self, t: &Thresholds) -> SignalReport {
        SignalReport {
            sample_count: self.sample_count,
            heart_rate_stability: stability(&self.heart_rate),
            pace_consistency: stability(&self.pace),
            pace_variation_count: count_jumps(&self.pace, t.pace_delta_seconds),
            heart_rate_variation_ratio: variation_ratio(&self.heart_rate),
            heart_rate_trend: thirds_trend(&self.heart_rate),
            pace_trend: thirds_trend(&self.pace),
            mean_pace_seconds: if self.pace.is_empty() { None } else { Some(mean(&self.pace)) },
        }
    }

    /// Intervallmønster fra tempo-bytter.
    ///
    /// reps = bytter/2 + 1. Oppdaget når reps ≥ `interval_min_reps`. Høy konfidens
    /// kun strengt over minimum og opp til `interval_confident_reps_max`.
    pub fn interval_pattern(&self, t: &Thresholds) -> IntervalPattern {
        let switch_points = count_jumps(&self.pace, t.pace_delta_seconds);
        let estimated_reps = (switch_points / 2) as u32 + 1;
        let detected = estimated_reps >= t.interval_min_reps;
        let confidence = if estimated_reps > t.interval_min_reps && estimated_reps <= t.interval_confident_reps_max {
            t.confidence.interval_confident
        } else {
            t.confidence.interval_uncertain
        };

        IntervalPattern {
            switch_points,
            estimated_reps,
            detected,
            confidence,
        }
    }
}

/// `(max − min) / min`; 0 uten verdier.
fn variation_ratio(xs: &[f64]) -> f64 {
    let min = xs.iter().copied().map(OrderedFloat).min();
    let max = xs.iter().copied().map(OrderedFloat).max();
    match (min, max) {
        (Some(lo), Some(hi)) if lo.0 > 0.0 => (hi.0 - lo.0) / lo.0,
        _ => 0.0,
    }
}

fn thirds_trend(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 3 {
        return 0.0;
    }
    let third = n / 3;
    let first = mean(&xs[..third]);
    let last = mean(&xs[n - third..]);
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first
}

pub fn heart_rate_stability(samples: &[Sample]) -> f64 {
    stability(&heart_rate_series(samples))
}

pub fn pace_consistency(samples: &[Sample]) -> f64 {
    stability(&pace_series(samples))
}

/// Antall naboendringer i tempo større enn `threshold_seconds`.
pub fn pace_variation_count(samples: &[Sample], threshold_seconds: f64) -> usize {
    count_jumps(&pace_series(samples), threshold_seconds)
}

/// `(max − min) / min` over kjent puls; 0 uten puls.
pub fn heart_rate_variation_ratio(samples: &[Sample]) -> f64 {
    variation_ratio(&heart_rate_series(samples))
}

/// Relativ endring fra snittet av første tredjedel til siste tredjedel.
/// Under 3 verdier, eller snitt 0 i starten → 0.
pub fn trend(samples: &[Sample], field: TrendField) -> f64 {
    match field {
        TrendField::HeartRate => thirds_trend(&heart_rate_series(samples)),
        TrendField::Pace => thirds_trend(&pace_series(samples)),
    }
}

pub fn detect_interval_pattern(samples: &[Sample], t: &Thresholds) -> IntervalPattern {
    SignalSeries::of(samples).interval_pattern(t)
}

/// Snitt av radenes tempo, `None` uten tempo-data.
pub fn mean_pace_seconds(samples: &[Sample]) -> Option<f64> {
    let xs = pace_series(samples);
    if xs.is_empty() {
        None
    } else {
        Some(mean(&xs))
    }
}

pub fn collect_signals(samples: &[Sample], t: &Thresholds) -> SignalReport {
    SignalSeries::of(samples).report(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stability_of_constant_series_is_one() {
        assert_eq!(stability(&[150.0, 150.0, 150.0]), 1.0);
    }

    #[test]
    fn stability_is_clamped_at_zero() {
        // stddev > mean
        assert_eq!(stability(&[1.0, 1.0, 1.0, 100.0]), 0.0);
    }

    #[test]
    fn jumps_use_strict_threshold() {
        assert_eq!(count_jumps(&[200.0, 230.0, 261.0], 30.0), 1);
    }
}
