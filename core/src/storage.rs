use std::path::Path;

use anyhow::Context;

use crate::types::Thresholds;

/// Leser terskeltabell fra disk (JSON). Manglende felter får standardverdi.
/// Hvis filen ikke finnes, returneres standardtabellen.
pub fn load_thresholds<P: AsRef<Path>>(path: P) -> anyhow::Result<Thresholds> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading thresholds from {}", path.display()))?;
        let mut de = serde_json::Deserializer::from_str(&contents);
        let thresholds: Thresholds = serde_path_to_error::deserialize(&mut de)
            .with_context(|| format!("parsing thresholds in {}", path.display()))?;
        log::info!("thresholds loaded from {}", path.display());
        Ok(thresholds)
    } else {
        log::warn!("no thresholds file at {}, using defaults", path.display());
        Ok(Thresholds::default())
    }
}

/// Lagrer terskeltabell til disk som JSON (pretty-print).
pub fn save_thresholds<P: AsRef<Path>>(thresholds: &Thresholds, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(thresholds)?;
    std::fs::write(path, json).with_context(|| format!("writing thresholds to {}", path.display()))?;
    log::info!("thresholds saved to {}", path.display());
    Ok(())
}
