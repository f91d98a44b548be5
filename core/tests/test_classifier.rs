use runlog_core::signals::{
    detect_interval_pattern, heart_rate_stability, heart_rate_variation_ratio, pace_consistency, pace_variation_count,
    trend, TrendField,
};
use runlog_core::{classify, classify_with, Sample, Section, Thresholds, WorkoutType};

fn row(pace: &str, hr: u32) -> Sample {
    Sample {
        timestamp: String::new(),
        distance_meters: 100.0,
        elapsed_seconds: 30,
        pace_label: Some(pace.to_string()),
        heart_rate_bpm: hr,
        speed_kmh: None,
    }
}

/// `n` rader som veksler mellom to tempo/puls-par.
fn alternating(n: usize, a: (&str, u32), b: (&str, u32)) -> Vec<Sample> {
    (0..n)
        .map(|i| if i % 2 == 0 { row(a.0, a.1) } else { row(b.0, b.1) })
        .collect()
}

#[test]
fn warmup_steady_is_jogging() {
    // puls 143/157: stddev/mean ≈ 0.047; tempo 324/396 s: stddev/mean ≈ 0.1
    let samples = alternating(12, ("5:24", 143), ("6:36", 157));
    assert!((heart_rate_stability(&samples) - 0.9533).abs() < 1e-3);
    assert!((pace_consistency(&samples) - 0.9).abs() < 1e-9);

    let r = classify(&samples, Section::Warmup);
    assert_eq!(r.detected_type, WorkoutType::Jogging);
    assert_eq!(r.confidence, 0.9);
    assert!(r.rationale.contains("steady heart rate"));
}

#[test]
fn warmup_with_many_pace_changes_is_movement_prep() {
    let samples = alternating(12, ("3:00", 120), ("10:00", 120));
    let r = classify(&samples, Section::Warmup);
    assert_eq!(r.detected_type, WorkoutType::MovementPrep);
    assert_eq!(r.confidence, 0.8);
    assert_eq!(r.signals.pace_variation_count, 11);
}

#[test]
fn short_irregular_warmup_is_walking() {
    let samples = alternating(3, ("3:00", 120), ("10:00", 120));
    let r = classify(&samples, Section::Warmup);
    assert_eq!(r.detected_type, WorkoutType::Walking);
    assert_eq!(r.confidence, 0.7);
}

#[test]
fn single_row_falls_back_to_calm_defaults() {
    let one = vec![row("5:00", 150)];
    assert_eq!(heart_rate_stability(&one), 1.0);
    assert_eq!(pace_consistency(&one), 1.0);

    assert_eq!(classify(&one, Section::Warmup).detected_type, WorkoutType::Jogging);
    assert_eq!(classify(&one, Section::Main).detected_type, WorkoutType::EasyRun);
    assert_eq!(classify(&one, Section::Cooldown).detected_type, WorkoutType::Walking);
}

#[test]
fn main_alternating_segments_is_interval_run() {
    // 10 segmenter → 9 bytter → 5 reps
    let samples = alternating(10, ("3:00", 175), ("5:00", 125));
    assert_eq!(pace_variation_count(&samples, 30.0), 9);
    assert!(heart_rate_variation_ratio(&samples) > 0.3);

    let r = classify(&samples, Section::Main);
    assert_eq!(r.detected_type, WorkoutType::IntervalRun);
    assert_eq!(r.confidence, 0.9);
    let p = r.interval_pattern.expect("detector ran");
    assert_eq!(p.switch_points, 9);
    assert_eq!(p.estimated_reps, 5);
    assert!(p.detected);
}

#[test]
fn detector_reps_boundaries() {
    let t = Thresholds::default();

    // 4 bytter → 3 reps: oppdaget, men lav konfidens
    let three = detect_interval_pattern(&alternating(5, ("3:00", 170), ("5:00", 120)), &t);
    assert_eq!(three.estimated_reps, 3);
    assert!(three.detected);
    assert_eq!(three.confidence, 0.6);

    let two = detect_interval_pattern(&alternating(3, ("3:00", 170), ("5:00", 120)), &t);
    assert_eq!(two.estimated_reps, 2);
    assert!(!two.detected);

    let ten = detect_interval_pattern(&alternating(20, ("3:00", 170), ("5:00", 120)), &t);
    assert_eq!(ten.estimated_reps, 10);
    assert_eq!(ten.confidence, 0.9);

    let twelve = detect_interval_pattern(&alternating(23, ("3:00", 170), ("5:00", 120)), &t);
    assert_eq!(twelve.estimated_reps, 12);
    assert_eq!(twelve.confidence, 0.6);
}

#[test]
fn main_without_detected_pattern_is_fartlek() {
    let t = Thresholds {
        interval_min_reps: 11,
        ..Thresholds::default()
    };
    let samples = alternating(20, ("1:30", 170), ("3:00", 120));
    let r = classify_with(&samples, Section::Main, &t);
    assert_eq!(r.detected_type, WorkoutType::Fartlek);
    assert_eq!(r.confidence, 0.8);
    assert_eq!(r.interval_pattern.map(|p| p.estimated_reps), Some(10));
}

#[test]
fn main_steady_fast_is_tempo_and_slow_is_easy() {
    let fast = vec![row("3:50", 160); 6];
    let r = classify(&fast, Section::Main);
    assert_eq!(r.detected_type, WorkoutType::TempoRun);
    assert_eq!(r.confidence, 0.9);

    let slow = vec![row("5:30", 140); 6];
    let r = classify(&slow, Section::Main);
    assert_eq!(r.detected_type, WorkoutType::EasyRun);
    assert_eq!(r.confidence, 0.8);
}

#[test]
fn main_without_row_pace_uses_totals() {
    let samples: Vec<Sample> = (0..4)
        .map(|_| Sample {
            distance_meters: 1000.0,
            elapsed_seconds: 220,
            heart_rate_bpm: 165,
            ..Sample::default()
        })
        .collect();
    let r = classify(&samples, Section::Main);
    assert_eq!(r.detected_type, WorkoutType::TempoRun);
    assert_eq!(r.signals.mean_pace_seconds, None);
}

#[test]
fn main_in_between_is_medium_run() {
    // tempo 240/300 → 4 bytter over 5 rader
    let samples = alternating(5, ("4:00", 150), ("5:00", 150));
    let r = classify(&samples, Section::Main);
    assert_eq!(r.detected_type, WorkoutType::MediumRun);
    assert_eq!(r.confidence, 0.7);
    assert!(r.interval_pattern.is_none());
}

#[test]
fn cooldown_falling_heart_rate_and_slowing_pace_is_jogging() {
    let samples = vec![
        row("5:00", 160),
        row("5:10", 150),
        row("5:50", 120),
        row("6:20", 100),
        row("7:00", 70),
        row("7:10", 60),
    ];
    assert!(trend(&samples, TrendField::HeartRate) < -0.5);
    assert!(trend(&samples, TrendField::Pace) > 0.3);

    let r = classify(&samples, Section::Cooldown);
    assert_eq!(r.detected_type, WorkoutType::Jogging);
    assert_eq!(r.confidence, 0.9);
}

#[test]
fn cooldown_flat_is_walking() {
    let samples = vec![row("8:00", 110); 6];
    assert_eq!(trend(&samples, TrendField::HeartRate), 0.0);
    let r = classify(&samples, Section::Cooldown);
    assert_eq!(r.detected_type, WorkoutType::Walking);
    assert_eq!(r.confidence, 0.8);
}

#[test]
fn labels_stay_within_section_vocabulary() {
    let inputs = [
        alternating(12, ("3:00", 120), ("10:00", 120)),
        alternating(10, ("3:00", 175), ("5:00", 125)),
        vec![row("5:00", 150)],
        Vec::new(),
    ];
    for section in [Section::Warmup, Section::Main, Section::Cooldown] {
        for samples in &inputs {
            let r = classify(samples, section);
            assert!(WorkoutType::allowed_for(section).contains(&r.detected_type));
            assert!((0.0..=1.0).contains(&r.confidence));
        }
    }
}

#[test]
fn missing_data_gives_zero_ratio_and_trend() {
    // Ingen kjent puls
    let no_hr = vec![row("5:00", 0), row("4:00", 0), row("6:00", 0)];
    assert_eq!(heart_rate_variation_ratio(&no_hr), 0.0);
    assert_eq!(heart_rate_variation_ratio(&[]), 0.0);
    assert_eq!(trend(&no_hr, TrendField::HeartRate), 0.0);

    // Færre enn 3 verdier
    let two = vec![row("5:00", 160), row("8:00", 80)];
    assert_eq!(trend(&two, TrendField::HeartRate), 0.0);
    assert_eq!(trend(&two, TrendField::Pace), 0.0);
    assert_eq!(trend(&[], TrendField::Pace), 0.0);

    // Tre verdier nok: tempo 300 → 360 s/km gir +0.2
    assert!((trend(&no_hr, TrendField::Pace) - 0.2).abs() < 1e-9);
}
