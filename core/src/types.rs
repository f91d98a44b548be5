use serde::{Deserialize, Serialize};

use crate::models::Section;

// Terskler for beslutningstreet. Ikke kalibrert mot fasit, kun heuristikk.
pub const PACE_DELTA_SECONDS: f64 = 30.0;
pub const WARMUP_HR_STABILITY_MIN: f64 = 0.8;
pub const WARMUP_PACE_CONSISTENCY_MIN: f64 = 0.7;
pub const WARMUP_MIN_SAMPLES: usize = 10;
pub const WARMUP_VARIATION_MIN: usize = 5;
pub const MAIN_INTERVAL_VARIATION_MIN: usize = 8;
pub const MAIN_INTERVAL_HR_RATIO_MIN: f64 = 0.3;
pub const MAIN_STEADY_VARIATION_MAX: usize = 3;
pub const MAIN_STEADY_HR_RATIO_MAX: f64 = 0.2;
pub const TEMPO_PACE_MAX_SECONDS: f64 = 240.0;
pub const INTERVAL_MIN_REPS: u32 = 3;
pub const INTERVAL_CONFIDENT_REPS_MAX: u32 = 10;
pub const COOLDOWN_HR_TREND_MAX: f64 = -0.5;
pub const COOLDOWN_PACE_TREND_MIN: f64 = 0.3;

/// Konfidens per utfall i beslutningstreet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Confidences {
    pub warmup_jogging: f64,
    pub warmup_movement_prep: f64,
    pub warmup_walking: f64,
    pub interval_confident: f64,
    pub interval_uncertain: f64,
    pub fartlek: f64,
    pub tempo_run: f64,
    pub easy_run: f64,
    pub medium_run: f64,
    pub cooldown_jogging: f64,
    pub cooldown_walking: f64,
}

impl Default for Confidences {
    fn default() -> Self {
        Self {
            warmup_jogging: 0.9,
            warmup_movement_prep: 0.8,
            warmup_walking: 0.7,
            interval_confident: 0.9,
            interval_uncertain: 0.6,
            fartlek: 0.8,
            tempo_run: 0.9,
            easy_run: 0.8,
            medium_run: 0.7,
            cooldown_jogging: 0.9,
            cooldown_walking: 0.8,
        }
    }
}

/// Samlet terskeltabell for klassifiseringen. Felter som mangler i
/// en JSON-konfig får standardverdi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub pace_delta_seconds: f64,
    pub warmup_hr_stability_min: f64,
    pub warmup_pace_consistency_min: f64,
    pub warmup_min_samples: usize,
    pub warmup_variation_min: usize,
    pub main_interval_variation_min: usize,
    pub main_interval_hr_ratio_min: f64,
    pub main_steady_variation_max: usize,
    pub main_steady_hr_ratio_max: f64,
    pub tempo_pace_max_seconds: f64,
    pub interval_min_reps: u32,
    pub interval_confident_reps_max: u32,
    pub cooldown_hr_trend_max: f64,
    pub cooldown_pace_trend_min: f64,
    pub confidence: Confidences,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pace_delta_seconds: PACE_DELTA_SECONDS,
            warmup_hr_stability_min: WARMUP_HR_STABILITY_MIN,
            warmup_pace_consistency_min: WARMUP_PACE_CONSISTENCY_MIN,
            warmup_min_samples: WARMUP_MIN_SAMPLES,
            warmup_variation_min: WARMUP_VARIATION_MIN,
            main_interval_variation_min: MAIN_INTERVAL_VARIATION_MIN,
            main_interval_hr_ratio_min: MAIN_INTERVAL_HR_RATIO_MIN,
            main_steady_variation_max: MAIN_STEADY_VARIATION_MAX,
            main_steady_hr_ratio_max: MAIN_STEADY_HR_RATIO_MAX,
            tempo_pace_max_seconds: TEMPO_PACE_MAX_SECONDS,
            interval_min_reps: INTERVAL_MIN_REPS,
            interval_confident_reps_max: INTERVAL_CONFIDENT_REPS_MAX,
            cooldown_hr_trend_max: COOLDOWN_HR_TREND_MAX,
            cooldown_pace_trend_min: COOLDOWN_PACE_TREND_MIN,
            confidence: Confidences::default(),
        }
    }
}

/// Aggregater over et vindu. Beregnes på nytt ved behov, lagres aldri.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SegmentSummary {
    pub sample_count: usize,
    pub total_distance_meters: f64,
    pub total_elapsed_seconds: u64,
    pub average_heart_rate_bpm: u32,
    pub max_heart_rate_bpm: u32,
    pub average_pace_seconds: f64, // sek/km, 0 ved null distanse
    pub average_pace_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Jogging,
    Walking,
    MovementPrep,
    IntervalRun,
    Fartlek,
    TempoRun,
    EasyRun,
    MediumRun,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Jogging => "jogging",
            WorkoutType::Walking => "walking",
            WorkoutType::MovementPrep => "movement_prep",
            WorkoutType::IntervalRun => "interval_run",
            WorkoutType::Fartlek => "fartlek",
            WorkoutType::TempoRun => "tempo_run",
            WorkoutType::EasyRun => "easy_run",
            WorkoutType::MediumRun => "medium_run",
        }
    }

    /// Typer som er lovlige for en gitt seksjon.
    pub fn allowed_for(section: Section) -> &'static [WorkoutType] {
        match section {
            Section::Warmup => &[WorkoutType::Jogging, WorkoutType::Walking, WorkoutType::MovementPrep],
            Section::Main => &[
                WorkoutType::IntervalRun,
                WorkoutType::Fartlek,
                WorkoutType::TempoRun,
                WorkoutType::EasyRun,
                WorkoutType::MediumRun,
            ],
            Section::Cooldown => &[WorkoutType::Jogging, WorkoutType::Walking],
        }
    }
}

/// Alle heuristiske signaler som ble beregnet, for visning/feilsøking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SignalReport {
    pub sample_count: usize,
    pub heart_rate_stability: f64,
    pub pace_consistency: f64,
    pub pace_variation_count: usize,
    pub heart_rate_variation_ratio: f64,
    pub heart_rate_trend: f64,
    pub pace_trend: f64,
    pub mean_pace_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalPattern {
    pub switch_points: usize,
    pub estimated_reps: u32,
    pub detected: bool,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub section: Section,
    pub detected_type: WorkoutType,
    pub confidence: f64, // [0,1], heuristisk
    pub rationale: String,
    pub signals: SignalReport,
    #[serde(default)]
    pub interval_pattern: Option<IntervalPattern>,
}

/// Forhåndsutfylte verdier for et treningssteg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStepDraft {
    #[serde(rename = "type")]
    pub step_type: String,
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub target_pace: String,
    pub intensity_rpe: Option<u8>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    pub summary: SegmentSummary,
    pub classification: ClassificationResult,
    pub draft: WorkoutStepDraft,
}
