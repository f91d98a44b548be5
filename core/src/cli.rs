use std::io::{self, Write};

use crate::types::SegmentAnalysis;

/// Skriver en lesbar rapport for ett analysert segment.
pub fn write_segment_report<W: Write>(out: &mut W, analysis: &SegmentAnalysis) -> io::Result<()> {
    let s = &analysis.summary;
    let c = &analysis.classification;
    let d = &analysis.draft;

    writeln!(out, "--- Segment Report ({}) ---", c.section.as_str())?;
    writeln!(out, "Samples: {}", s.sample_count)?;
    writeln!(out, "Distance: {:.0} m", s.total_distance_meters)?;
    writeln!(out, "Time: {} s", s.total_elapsed_seconds)?;
    writeln!(out, "Avg pace: {}", s.average_pace_label)?;
    if s.average_heart_rate_bpm > 0 {
        writeln!(out, "HR avg/max: {}/{} bpm", s.average_heart_rate_bpm, s.max_heart_rate_bpm)?;
    } else {
        writeln!(out, "HR avg/max: -")?;
    }
    writeln!(
        out,
        "Detected: {} ({:.0}%)",
        c.detected_type.as_str(),
        c.confidence * 100.0
    )?;
    writeln!(out, "Why: {}", c.rationale)?;
    if let Some(p) = &c.interval_pattern {
        writeln!(
            out,
            "Intervals: {} switch points, ~{} reps (detected={})",
            p.switch_points, p.estimated_reps, p.detected
        )?;
    }
    match d.intensity_rpe {
        Some(rpe) => writeln!(out, "RPE: {}", rpe)?,
        None => writeln!(out, "RPE: -")?,
    }
    writeln!(out, "Notes: {}", d.notes)?;
    Ok(())
}

pub fn print_segment_report(analysis: &SegmentAnalysis) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_segment_report(&mut lock, analysis)
}
