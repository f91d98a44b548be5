//! Import av løst typede rader (forhåndsvisning av CSV/Excel) til `Sample`.
//!
//! Kolonnenavn varierer mellom klokker og eksportverktøy. Alle aliaser
//! ligger i én tabell og løses én gang per import, ikke per feltoppslag.

use std::io::Read;

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use serde_json::{Map as JsonMap, Value};
use thiserror::Error;

use crate::metrics;
use crate::models::Sample;
use crate::time_value::{format_pace, parse_to_seconds};

/// Én rad slik forhåndsvisningen leverer den.
pub type Row = JsonMap<String, Value>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleField {
    Timestamp,
    Distance,
    Elapsed,
    Pace,
    HeartRate,
    Speed,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnAlias {
    pub header: &'static str,
    pub field: SampleField,
    /// Faktor til kanonisk enhet (distance_km → meter)
    pub scale: f64,
}

const fn alias(header: &'static str, field: SampleField) -> ColumnAlias {
    ColumnAlias { header, field, scale: 1.0 }
}

/// Godkjente kolonnenavn (små bokstaver). Første treff i tabellrekkefølge vinner.
pub const COLUMN_ALIASES: &[ColumnAlias] = &[
    alias("time", SampleField::Timestamp),
    alias("timestamp", SampleField::Timestamp),
    alias("distance", SampleField::Distance),
    ColumnAlias { header: "distance_km", field: SampleField::Distance, scale: 1000.0 },
    alias("duration", SampleField::Elapsed),
    alias("time_seconds", SampleField::Elapsed),
    alias("pace", SampleField::Pace),
    alias("avg_pace", SampleField::Pace),
    alias("heart_rate", SampleField::HeartRate),
    alias("avg_hr", SampleField::HeartRate),
    alias("bpm", SampleField::HeartRate),
    alias("speed", SampleField::Speed),
    alias("velocity", SampleField::Speed),
];

#[derive(Debug, Clone)]
struct Resolved {
    key: String,
    scale: f64,
}

/// Kolonne per felt, løst fra et sett med overskrifter.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    timestamp: Option<Resolved>,
    distance: Option<Resolved>,
    elapsed: Option<Resolved>,
    pace: Option<Resolved>,
    heart_rate: Option<Resolved>,
    speed: Option<Resolved>,
}

impl ColumnMap {
    pub fn resolve<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let mut map = ColumnMap::default();

        for a in COLUMN_ALIASES {
            let slot = map.slot_mut(a.field);
            if slot.is_some() {
                continue;
            }
            if let Some(h) = headers.iter().find(|h| h.trim().eq_ignore_ascii_case(a.header)) {
                *slot = Some(Resolved { key: (*h).to_string(), scale: a.scale });
            }
        }
        map
    }

    /// Løser fra unionen av nøkler i alle rader.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut keys: Vec<&str> = Vec::new();
        for row in rows {
            for k in row.keys() {
                if !keys.contains(&k.as_str()) {
                    keys.push(k.as_str());
                }
            }
        }
        Self::resolve(keys)
    }

    fn slot_mut(&mut self, field: SampleField) -> &mut Option<Resolved> {
        match field {
            SampleField::Timestamp => &mut self.timestamp,
            SampleField::Distance => &mut self.distance,
            SampleField::Elapsed => &mut self.elapsed,
            SampleField::Pace => &mut self.pace,
            SampleField::HeartRate => &mut self.heart_rate,
            SampleField::Speed => &mut self.speed,
        }
    }

    fn slot(&self, field: SampleField) -> Option<&Resolved> {
        match field {
            SampleField::Timestamp => self.timestamp.as_ref(),
            SampleField::Distance => self.distance.as_ref(),
            SampleField::Elapsed => self.elapsed.as_ref(),
            SampleField::Pace => self.pace.as_ref(),
            SampleField::HeartRate => self.heart_rate.as_ref(),
            SampleField::Speed => self.speed.as_ref(),
        }
    }

    /// Kolonnenavnet som brukes for feltet, hvis noe.
    pub fn column_for(&self, field: SampleField) -> Option<&str> {
        self.slot(field).map(|r| r.key.as_str())
    }

    fn value<'r>(&self, row: &'r Row, field: SampleField) -> Option<(&'r Value, f64)> {
        let r = self.slot(field)?;
        let v = row.get(&r.key)?;
        if v.is_null() {
            None
        } else {
            Some((v, r.scale))
        }
    }

    /// Bygger en `Sample`, eller `None` hvis raden mangler både distanse og varighet.
    pub fn sample_from_row(&self, row: &Row) -> Option<Sample> {
        let timestamp = self
            .value(row, SampleField::Timestamp)
            .and_then(|(v, _)| value_text(v))
            .map(|t| normalize_timestamp(&t))
            .unwrap_or_default();

        let distance_meters = self
            .value(row, SampleField::Distance)
            .and_then(|(v, scale)| value_number(v).map(|d| d * scale))
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(0.0);

        let elapsed_seconds = self
            .value(row, SampleField::Elapsed)
            .and_then(|(v, _)| value_duration(v))
            .unwrap_or(0);

        let heart_rate_bpm = self
            .value(row, SampleField::HeartRate)
            .and_then(|(v, _)| value_number(v))
            .filter(|h| h.is_finite() && *h > 0.0)
            .map(|h| h.round() as u32)
            .unwrap_or(0);

        let speed_kmh = self
            .value(row, SampleField::Speed)
            .and_then(|(v, _)| value_number(v))
            .filter(|s| s.is_finite() && *s > 0.0);

        let pace_label = self
            .value(row, SampleField::Pace)
            .and_then(|(v, _)| match v {
                // tall tolkes som sek/km
                Value::Number(n) => n.as_f64().filter(|p| *p > 0.0).map(format_pace),
                other => value_text(other),
            })
            .or_else(|| speed_kmh.map(|s| format_pace(3600.0 / s)));

        let sample = Sample {
            timestamp,
            distance_meters,
            elapsed_seconds,
            pace_label,
            heart_rate_bpm,
            speed_kmh,
        };

        if sample.is_retained() {
            Some(sample)
        } else {
            log::debug!("dropping row without distance or duration: {:?}", row);
            metrics::record_dropped_row();
            None
        }
    }
}

/// Enkeltrad med egen aliasoppløsning.
pub fn sample_from_row(row: &Row) -> Option<Sample> {
    ColumnMap::resolve(row.keys().map(String::as_str)).sample_from_row(row)
}

/// Konverterer alle rader; rader uten distanse/varighet forkastes.
pub fn ingest_rows(rows: &[Row]) -> Vec<Sample> {
    let columns = ColumnMap::from_rows(rows);
    let samples: Vec<Sample> = rows.iter().filter_map(|r| columns.sample_from_row(r)).collect();
    log::debug!("ingested {} of {} rows", samples.len(), rows.len());
    samples
}

/// Leser en UTF-8 CSV (valgfri BOM) til rader. Overskrifter trimmes og gjøres små.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Row>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_ascii_lowercase())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = Row::new();
        for (h, v) in headers.iter().zip(record.iter()) {
            if !v.is_empty() {
                row.insert(h.clone(), Value::String(v.to_string()));
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_csv_samples<R: Read>(reader: R) -> Result<Vec<Sample>, ImportError> {
    Ok(ingest_rows(&read_csv(reader)?))
}

/// Normaliserer tidsstempler til en sorterbar form så leksikalsk
/// sammenligning holder: `7:05:03` → `07:05:03`, `105:03` → `01:45:03`,
/// dato-tid → `YYYY-MM-DD HH:MM:SS`.
/// Ukjente formater returneres uendret (trimmet).
pub fn normalize_timestamp(raw: &str) -> String {
    let t = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return dt.naive_local().format("%Y-%m-%d %H:%M:%S%.f").to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return dt.format("%Y-%m-%d %H:%M:%S%.f").to_string();
        }
    }
    if t.matches(':').count() == 2 {
        if let Ok(tm) = NaiveTime::parse_from_str(t, "%H:%M:%S%.f") {
            return tm.format("%H:%M:%S%.f").to_string();
        }
    }
    // M:SS – minutter bæres over til timer, samme form som H:MM:SS
    if let Some((m, s)) = t.split_once(':') {
        if !s.contains(':') && m.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(minutes) = m.parse::<u64>() {
                return format!("{:02}:{:02}:{}", minutes / 60, minutes % 60, s);
            }
        }
    }
    t.to_string()
}

fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Varighet som tall (sek) eller streng (`"5:00"`, `"0:05:00"`, `"300"`).
fn value_duration(v: &Value) -> Option<u32> {
    let secs = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            // rene tall i en varighetskolonne er sekunder, ikke pakket MMSScc
            match s.parse::<f64>() {
                Ok(x) => x,
                Err(_) => parse_to_seconds(s),
            }
        }
        _ => return None,
    };
    if secs.is_finite() && secs > 0.0 {
        Some(secs.round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duration_strings() {
        assert_eq!(value_duration(&json!("5:00")), Some(300));
        assert_eq!(value_duration(&json!("30000")), Some(30000));
        assert_eq!(value_duration(&json!(12.6)), Some(13));
        assert_eq!(value_duration(&json!("n/a")), None);
        assert_eq!(value_duration(&json!(-3)), None);
    }

    #[test]
    fn number_and_text_values() {
        assert_eq!(value_number(&json!(" 152 ")), Some(152.0));
        assert_eq!(value_text(&json!(7)), Some("7".to_string()));
        assert_eq!(value_text(&json!("  ")), None);
        assert_eq!(value_text(&json!(true)), None);
    }
}
