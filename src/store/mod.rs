//! Client record loading.
//!
//! Records come from a JSON file holding an array of flat field-to-value
//! mappings. The loader runs exactly once per search service construction and
//! fails fast on malformed input; there is no partial-load recovery.

use crate::error::{LoadError, LoadResult};
use crate::models::{ClientRecord, Fields};
use std::fs;
use std::path::Path;

/// Read the source at `path` and materialize one record per mapping,
/// preserving source order.
pub fn load_clients(path: &Path) -> LoadResult<Vec<ClientRecord>> {
    let display = path.display().to_string();

    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;

    let mappings: Vec<Fields> =
        serde_json::from_str(&raw).map_err(|source| LoadError::Malformed {
            path: display,
            source,
        })?;

    let records = mappings
        .into_iter()
        .enumerate()
        .map(|(position, fields)| ClientRecord::new(fields, position))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Loaded {} client records from {}", records.len(), path.display());
    Ok(records)
}
