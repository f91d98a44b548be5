//! Tid- og tempo-strenger <-> sekunder.
//!
//! Parseren er "myk": alt som ikke kan tolkes gir 0.0 og logges,
//! slik at kallere aldri trenger feilhåndtering rundt selve parsingen.
//! En returnert 0.0 betyr "ingen verdi", ikke en gyldig null-varighet.

use serde::{Deserialize, Serialize};

use crate::metrics;

/// Antall sifre (før desimalpunkt) som gjør et rent tall til pakket `MMSScc`.
const PACKED_MIN_DIGITS: usize = 5;

/// Visningspresisjon for tider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// `M:SS.cc` – baneløp
    Centiseconds,
    /// `M:SS` – landevei/stafett
    WholeSeconds,
}

/// Type løp tiden registreres for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Track,
    Road,
    Relay,
}

impl Precision {
    pub fn for_event(kind: EventKind) -> Self {
        match kind {
            EventKind::Track => Precision::Centiseconds,
            EventKind::Road | EventKind::Relay => Precision::WholeSeconds,
        }
    }
}

/// Tolker en tid-streng til sekunder.
///
/// Grammatikk, i prioritert rekkefølge:
/// 1. rene sifre (≥ 5 før evt. punktum) → pakket `MMSScc` (`30000` = 3:00.00)
/// 2. kortere tall → sekunder direkte (`80.5`)
/// 3. `M:SS` / `M:SS.cc`
/// 4. `H:MM:SS` / `H:MM:SS.cc`
///
/// Sekunder ≥ 60 i en gruppe bæres over til minutter. Minutt- og time-grupper
/// sjekkes ikke mot noe maksimum.
pub fn parse_to_seconds(input: &str) -> f64 {
    match try_parse(input.trim()) {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            log::debug!("unparseable time value {:?}, treating as absent (0)", input);
            metrics::record_parse_failure();
            0.0
        }
    }
}

fn try_parse(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    if is_plain_number(s) {
        let int_part = s.split('.').next().unwrap_or("");
        if int_part.len() >= PACKED_MIN_DIGITS {
            return parse_packed(int_part);
        }
        return s.parse::<f64>().ok();
    }

    let groups: Vec<&str> = s.split(':').collect();
    match groups.as_slice() {
        [m, sec] => {
            let m = parse_int_group(m)?;
            let sec = parse_seconds_group(sec)?;
            Some(m * 60.0 + sec)
        }
        [h, m, sec] => {
            let h = parse_int_group(h)?;
            let m = parse_int_group(m)?;
            let sec = parse_seconds_group(sec)?;
            Some(h * 3600.0 + m * 60.0 + sec)
        }
        _ => None,
    }
}

/// Sifre med valgfritt ett punktum, minst ett siffer totalt.
fn is_plain_number(s: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    dots <= 1 && digits > 0
}

fn parse_packed(digits: &str) -> Option<f64> {
    let n: u64 = digits.parse().ok()?;
    let minutes = n / 10_000;
    let rest = n % 10_000;
    let secs = rest / 100;
    let centis = rest % 100;
    Some(minutes as f64 * 60.0 + secs as f64 + centis as f64 / 100.0)
}

fn parse_int_group(g: &str) -> Option<f64> {
    if g.is_empty() || !g.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    g.parse::<u64>().ok().map(|v| v as f64)
}

fn parse_seconds_group(g: &str) -> Option<f64> {
    if !is_plain_number(g) || g.starts_with('.') {
        return None;
    }
    g.parse::<f64>().ok()
}

/// Formaterer sekunder for visning.
///
/// Verdien rundes til valgt presisjon før oppdeling, så `59.999` blir
/// `1:00.00` og ikke `0:60.00`. Timegruppen utelates når den er 0.
pub fn format_from_seconds(seconds: f64, precision: Precision) -> String {
    let s = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    match precision {
        Precision::Centiseconds => {
            let total_cs = (s * 100.0).round() as u64;
            format!("{}.{:02}", clock(total_cs / 100), total_cs % 100)
        }
        Precision::WholeSeconds => clock(s.round() as u64),
    }
}

fn clock(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let sec = total_secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{sec:02}")
    } else {
        format!("{m}:{sec:02}")
    }
}

/// Parse + format i ett: `"30000"` → `"3:00.00"`. `None` når input ikke gir noen verdi.
pub fn normalize_time_input(input: &str, precision: Precision) -> Option<String> {
    let v = parse_to_seconds(input);
    if v > 0.0 {
        Some(format_from_seconds(v, precision))
    } else {
        None
    }
}

/// Tempo-etikett (`"4:30"` eller `"4:30/km"`) → sekunder per km.
pub fn parse_pace_label(label: &str) -> f64 {
    let t = label.trim();
    let lower = t.to_ascii_lowercase();
    let body = if lower.ends_with("/km") {
        t[..t.len() - 3].trim_end()
    } else {
        t
    };
    parse_to_seconds(body)
}

/// Sekunder per km → `"M:SS/km"`.
pub fn format_pace(seconds_per_km: f64) -> String {
    if !seconds_per_km.is_finite() || seconds_per_km <= 0.0 {
        return "0:00/km".to_string();
    }
    format!("{}/km", format_from_seconds(seconds_per_km, Precision::WholeSeconds))
}
