use camino::{Utf8Path, Utf8PathBuf};
use costflow_types::columns;
use costflow_types::row::CostRow;
use fs_err as fs;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file '{path}' not found")]
    InputNotFound { path: Utf8PathBuf },

    #[error("cannot read cost export {path}: {message}")]
    InputFormat { path: Utf8PathBuf, message: String },
}

impl LoadError {
    fn format(path: &Utf8Path, message: impl Into<String>) -> Self {
        LoadError::InputFormat {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Read every row of a cost export CSV into memory.
///
/// Headers are matched after trimming whitespace and a leading byte-order mark. Columns beyond
/// [`columns::REQUIRED`] are ignored. Row order is preserved.
pub fn load_cost_rows(path: &Utf8Path) -> Result<Vec<CostRow>, LoadError> {
    if !path.exists() {
        return Err(LoadError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = fs::File::open(path).map_err(|e| LoadError::format(path, e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new().from_reader(file);

    let headers: csv::StringRecord = reader
        .headers()
        .map_err(|e| LoadError::format(path, e.to_string()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();

    for column in columns::REQUIRED {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::format(
                path,
                format!("missing required column '{column}'"),
            ));
        }
    }
    reader.set_headers(headers);

    let mut rows = Vec::new();
    for record in reader.deserialize::<CostRow>() {
        rows.push(record.map_err(|e| LoadError::format(path, e.to_string()))?);
    }

    debug!(path = %path, rows = rows.len(), "loaded cost export");
    Ok(rows)
}
