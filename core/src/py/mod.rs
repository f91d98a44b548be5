// Python-binding (feature "python"). Tynt lag over JSON-inngangen og
// tidsparseren; all logikk ligger i kjernen.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::time_value::{self, Precision};

#[pyfunction]
fn parse_to_seconds(value: &str) -> f64 {
    time_value::parse_to_seconds(value)
}

#[pyfunction]
#[pyo3(signature = (seconds, centiseconds = true))]
fn format_from_seconds(seconds: f64, centiseconds: bool) -> String {
    let precision = if centiseconds {
        Precision::Centiseconds
    } else {
        Precision::WholeSeconds
    };
    time_value::format_from_seconds(seconds, precision)
}

#[pyfunction]
fn analyze_segment_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    // Tillat både str og dict/objekt
    let json_in: String = if let Ok(s) = payload.extract::<&str>() {
        s.to_owned()
    } else {
        let json_mod = py
            .import("json")
            .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
        json_mod
            .call_method1("dumps", (payload,))
            .and_then(|o| o.extract::<String>())
            .map_err(|e| PyValueError::new_err(format!("failed to serialize payload with json.dumps: {e}")))?
    };

    crate::analyze_segment_json(&json_in).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn runlog_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_to_seconds, m)?)?;
    m.add_function(wrap_pyfunction!(format_from_seconds, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_segment_json, m)?)?;
    Ok(())
}
