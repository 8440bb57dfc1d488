use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::model::{LabDataset, Part};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Loading is transactional: the first failure aborts the whole run and no
/// partial dataset is handed out.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file does not exist or cannot be opened.
    #[error("cannot open {path}: {source}")]
    MissingSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data row failed to parse. `row` is 1-based, counting data rows
    /// (the header row is not counted).
    #[error("data row {row}: {detail}")]
    MalformedRow { row: usize, detail: String },

    /// Reader-level failure outside any particular data row.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn malformed(row: usize, detail: impl Into<String>) -> LoadError {
    LoadError::MalformedRow {
        row,
        detail: detail.into(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// One CSV data row, positional. The header row is consumed by the reader
/// and its names are ignored; only column order matters.
#[derive(Debug, Deserialize)]
struct RawRecord(String, String, String, String, String, String);

/// Parse a lab CSV into the six trial stores.
///
/// Expected layout: a single header row, then one row per reading event with
/// columns `part, trial, time, mass, energy, percent_mass`. The mass,
/// energy, and percent columns may be empty; a non-empty mass requires a
/// parseable percent field on the same row.
pub fn load_csv(path: &Path) -> Result<LabDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::MissingSource {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut dataset = LabDataset::default();

    for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row = index + 1;
        let RawRecord(part_label, trial, time, mass, energy, percent) =
            result.map_err(|e| malformed(row, e.to_string()))?;

        if trial.is_empty() {
            return Err(malformed(row, "empty trial identifier"));
        }
        let part = Part::classify(&part_label);
        let time = parse_number("time", &time, row)?;

        if !mass.is_empty() {
            // Parse both readings before touching the stores so a bad
            // percent field cannot leave a half-recorded row behind.
            let mass_value = parse_number("mass", &mass, row)?;
            let percent_value = parse_percent(&percent, row)?;
            dataset.mass.get_mut(part).append(&trial, time, mass_value);
            dataset
                .percent_mass
                .get_mut(part)
                .append(&trial, time, percent_value);
        }

        if !energy.is_empty() {
            let energy_value = parse_number("energy", &energy, row)?;
            dataset.energy.get_mut(part).append(&trial, time, energy_value);
        }
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn parse_number(field: &str, raw: &str, row: usize) -> Result<f64, LoadError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| malformed(row, format!("{field} field '{raw}' is not a number")))
}

/// Strip exactly one trailing unit character (e.g. `%`) and parse the rest.
/// The unit must be a single non-digit character; anything else means the
/// file deviates from the hand-curated layout and the run aborts.
fn parse_percent(raw: &str, row: usize) -> Result<f64, LoadError> {
    let (idx, unit) = raw
        .char_indices()
        .last()
        .ok_or_else(|| malformed(row, "empty percent field on a mass-bearing row"))?;
    if unit.is_ascii_digit() {
        return Err(malformed(
            row,
            format!("percent field '{raw}' has no trailing unit character"),
        ));
    }
    let prefix = &raw[..idx];
    prefix.parse::<f64>().map_err(|_| {
        malformed(
            row,
            format!("percent field '{raw}' has no numeric prefix before the unit"),
        )
    })
}
