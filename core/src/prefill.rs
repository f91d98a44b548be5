use crate::types::{ClassificationResult, SegmentSummary, WorkoutStepDraft};

/// RPE (1–10) fra snittpuls: `round(hr / 200 * 10)`. `None` når pulsen er ukjent.
pub fn rpe_from_heart_rate(avg_hr_bpm: u32) -> Option<u8> {
    if avg_hr_bpm == 0 {
        return None;
    }
    let rpe = (avg_hr_bpm as f64 / 200.0 * 10.0).round();
    Some(rpe.clamp(1.0, 10.0) as u8)
}

impl WorkoutStepDraft {
    /// Forhåndsutfylling av treningssteg fra sammendrag + klassifisering.
    pub fn from_analysis(summary: &SegmentSummary, class: &ClassificationResult) -> Self {
        let label = class.detected_type.as_str();
        let pct = (class.confidence * 100.0).round() as u32;
        Self {
            step_type: label.to_string(),
            distance_meters: summary.total_distance_meters.round() as u64,
            duration_seconds: summary.total_elapsed_seconds,
            target_pace: summary.average_pace_label.clone(),
            intensity_rpe: rpe_from_heart_rate(summary.average_heart_rate_bpm),
            notes: format!("Auto-detected {} ({}% confidence): {}", label, pct, class.rationale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpe_rounds_and_clamps() {
        assert_eq!(rpe_from_heart_rate(0), None);
        assert_eq!(rpe_from_heart_rate(150), Some(8)); // 7.5 → 8
        assert_eq!(rpe_from_heart_rate(144), Some(7));
        assert_eq!(rpe_from_heart_rate(230), Some(10));
        assert_eq!(rpe_from_heart_rate(5), Some(1));
    }
}
