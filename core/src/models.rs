use serde::{Deserialize, Serialize};

use crate::ingest::normalize_timestamp;
use crate::time_value::parse_pace_label;

/// Én rad fra en importert aktivitetsfil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Sample {
    pub timestamp: String,            // klokkeslett / sekvensnøkkel, sammenlignes leksikalsk
    pub distance_meters: f64,         // meter
    pub elapsed_seconds: u32,         // sek
    #[serde(default)]
    pub pace_label: Option<String>,   // "M:SS" / "M:SS/km"
    #[serde(default)]
    pub heart_rate_bpm: u32,          // 0 = ukjent
    #[serde(default)]
    pub speed_kmh: Option<f64>,       // km/t
}

impl Sample {
    /// Raden beholdes kun hvis den har distanse eller varighet.
    pub fn is_retained(&self) -> bool {
        self.distance_meters > 0.0 || self.elapsed_seconds > 0
    }

    pub fn has_heart_rate(&self) -> bool {
        self.heart_rate_bpm > 0
    }

    /// Tempo for raden i sek/km, `None` hvis mangler eller ikke tolkbar.
    pub fn pace_seconds(&self) -> Option<f64> {
        let label = self.pace_label.as_deref()?;
        let v = parse_pace_label(label);
        if v > 0.0 {
            Some(v)
        } else {
            None
        }
    }
}

/// Del av økten som analyseres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Warmup,
    Main,
    Cooldown,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Warmup => "warmup",
            Section::Main => "main",
            Section::Cooldown => "cooldown",
        }
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warmup" => Ok(Section::Warmup),
            "main" => Ok(Section::Main),
            "cooldown" => Ok(Section::Cooldown),
            other => Err(format!("unknown section '{other}' (expected warmup|main|cooldown)")),
        }
    }
}

/// Utvalg av samples. Kun én modus er aktiv om gangen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SampleWindow {
    /// `start <= timestamp <= end`, leksikalsk
    Time { start: String, end: String },
    /// `start <= distance_meters <= end`
    Distance { start: f64, end: f64 },
    /// Hele importen
    All,
}

impl SampleWindow {
    /// Tidsvindu med grenser normalisert som tidsstemplene ved import.
    pub fn time(start: &str, end: &str) -> Self {
        SampleWindow::Time {
            start: normalize_timestamp(start),
            end: normalize_timestamp(end),
        }
    }

    pub fn distance(start: f64, end: f64) -> Self {
        SampleWindow::Distance { start, end }
    }

    pub fn contains(&self, sample: &Sample) -> bool {
        match self {
            SampleWindow::Time { start, end } => {
                start.as_str() <= sample.timestamp.as_str() && sample.timestamp.as_str() <= end.as_str()
            }
            SampleWindow::Distance { start, end } => {
                *start <= sample.distance_meters && sample.distance_meters <= *end
            }
            SampleWindow::All => true,
        }
    }
}
