//! Fast beslutningstre per seksjon. Første gren som treffer vinner,
//! rekkefølgen er en del av kontrakten.

use crate::models::{Sample, Section};
use crate::signals::SignalSeries;
use crate::statistics::derived_pace;
use crate::types::{ClassificationResult, SignalReport, Thresholds, WorkoutType};

/// Klassifiserer med standard terskler.
pub fn classify(samples: &[Sample], section: Section) -> ClassificationResult {
    classify_with(samples, section, &Thresholds::default())
}

/// Ren funksjon: ingen tellere, kun debug-logg.
pub fn classify_with(samples: &[Sample], section: Section, t: &Thresholds) -> ClassificationResult {
    let series = SignalSeries::of(samples);
    let signals = series.report(t);

    let out = match section {
        Section::Warmup => classify_warmup(signals, t),
        Section::Main => classify_main(samples, &series, signals, t),
        Section::Cooldown => classify_cooldown(signals, t),
    };

    log::debug!(
        "classified {} samples as {}/{} ({:.2}): {}",
        samples.len(),
        section.as_str(),
        out.detected_type.as_str(),
        out.confidence,
        out.rationale
    );
    out
}

fn result(
    section: Section,
    detected_type: WorkoutType,
    confidence: f64,
    rationale: String,
    signals: SignalReport,
) -> ClassificationResult {
    ClassificationResult {
        section,
        detected_type,
        confidence: confidence.clamp(0.0, 1.0),
        rationale,
        signals,
        interval_pattern: None,
    }
}

fn classify_warmup(s: SignalReport, t: &Thresholds) -> ClassificationResult {
    let c = &t.confidence;
    if s.heart_rate_stability > t.warmup_hr_stability_min && s.pace_consistency > t.warmup_pace_consistency_min {
        let why = format!(
            "steady heart rate (stability {:.2}) and even pace (consistency {:.2})",
            s.heart_rate_stability, s.pace_consistency
        );
        return result(Section::Warmup, WorkoutType::Jogging, c.warmup_jogging, why, s);
    }
    if s.sample_count > t.warmup_min_samples && s.pace_variation_count > t.warmup_variation_min {
        let why = format!(
            "{} pace changes over {} samples suggest drills/strides",
            s.pace_variation_count, s.sample_count
        );
        return result(Section::Warmup, WorkoutType::MovementPrep, c.warmup_movement_prep, why, s);
    }
    let why = "no steady running or drill pattern; default warmup".to_string();
    result(Section::Warmup, WorkoutType::Walking, c.warmup_walking, why, s)
}

fn classify_main(samples: &[Sample], series: &SignalSeries, s: SignalReport, t: &Thresholds) -> ClassificationResult {
    let c = &t.confidence;

    if s.pace_variation_count > t.main_interval_variation_min
        && s.heart_rate_variation_ratio > t.main_interval_hr_ratio_min
    {
        let pattern = series.interval_pattern(t);
        let mut out = if pattern.detected {
            let why = format!(
                "{} pace switches, heart rate swing {:.0}%: ~{} repetitions",
                pattern.switch_points,
                s.heart_rate_variation_ratio * 100.0,
                pattern.estimated_reps
            );
            result(Section::Main, WorkoutType::IntervalRun, pattern.confidence, why, s)
        } else {
            let why = format!(
                "variable pace and heart rate without a repeating structure (~{} repetitions)",
                pattern.estimated_reps
            );
            result(Section::Main, WorkoutType::Fartlek, c.fartlek, why, s)
        };
        out.interval_pattern = Some(pattern);
        return out;
    }

    if s.pace_variation_count < t.main_steady_variation_max
        && s.heart_rate_variation_ratio < t.main_steady_hr_ratio_max
    {
        // Uten tempo per rad: bruk tempo fra totalene
        let pace = s.mean_pace_seconds.unwrap_or_else(|| {
            let dist: f64 = samples.iter().map(|x| x.distance_meters).sum();
            let secs: u64 = samples.iter().map(|x| x.elapsed_seconds as u64).sum();
            derived_pace(dist, secs)
        });
        if pace > 0.0 && pace < t.tempo_pace_max_seconds {
            let why = format!("steady effort at {:.0} s/km, faster than {:.0} s/km", pace, t.tempo_pace_max_seconds);
            return result(Section::Main, WorkoutType::TempoRun, c.tempo_run, why, s);
        }
        let why = if pace > 0.0 {
            format!("steady effort at {:.0} s/km", pace)
        } else {
            "steady effort, pace unknown".to_string()
        };
        return result(Section::Main, WorkoutType::EasyRun, c.easy_run, why, s);
    }

    let why = format!(
        "{} pace changes, heart rate swing {:.0}%: neither steady nor interval",
        s.pace_variation_count,
        s.heart_rate_variation_ratio * 100.0
    );
    result(Section::Main, WorkoutType::MediumRun, c.medium_run, why, s)
}

fn classify_cooldown(s: SignalReport, t: &Thresholds) -> ClassificationResult {
    let c = &t.confidence;
    if s.heart_rate_trend < t.cooldown_hr_trend_max && s.pace_trend > t.cooldown_pace_trend_min {
        let why = format!(
            "heart rate falling ({:+.0}%) while pace slows ({:+.0}%)",
            s.heart_rate_trend * 100.0,
            s.pace_trend * 100.0
        );
        return result(Section::Cooldown, WorkoutType::Jogging, c.cooldown_jogging, why, s);
    }
    let why = "no clear wind-down trend; default cooldown".to_string();
    result(Section::Cooldown, WorkoutType::Walking, c.cooldown_walking, why, s)
}
