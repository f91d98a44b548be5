use std::sync::atomic::{AtomicU64, Ordering};

use crate::classifier::classify_with;
use crate::metrics;
use crate::models::{Sample, SampleWindow, Section};
use crate::statistics::{filter_window, summarize, StatsError};
use crate::types::{SegmentAnalysis, Thresholds, WorkoutStepDraft};

/// Vindu → sammendrag → klassifisering → forhåndsutfylt steg.
///
/// Klassifiseringen kjøres kun på samples innenfor vinduet.
pub fn analyze_segment(
    samples: &[Sample],
    window: &SampleWindow,
    section: Section,
    thresholds: &Thresholds,
) -> Result<SegmentAnalysis, StatsError> {
    let summary = summarize(samples, window)?;
    let selected: Vec<Sample> = filter_window(samples, window).into_iter().cloned().collect();

    let classification = classify_with(&selected, section, thresholds);
    metrics::record_classification(section.as_str(), classification.detected_type.as_str());
    let draft = WorkoutStepDraft::from_analysis(&summary, &classification);

    Ok(SegmentAnalysis {
        summary,
        classification,
        draft,
    })
}

/// Løpenummer for en analyse startet av brukeren.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Holder styr på siste startede analyse. Resultater fra eldre
/// analyser (f.eks. ved rask re-opplasting) forkastes.
#[derive(Debug, Default)]
pub struct AnalysisTracker {
    latest: AtomicU64,
}

impl AnalysisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter en ny analyse; alle tidligere billetter blir utdaterte.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Returnerer verdien kun hvis billetten fortsatt er den nyeste.
    pub fn accept<T>(&self, generation: Generation, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            log::debug!(
                "discarding stale analysis result (generation {}, latest {})",
                generation.0,
                self.latest.load(Ordering::SeqCst)
            );
            metrics::record_stale_result();
            None
        }
    }
}
