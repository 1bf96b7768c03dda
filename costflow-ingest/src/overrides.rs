use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Result of reading a label override file.
///
/// A broken file never fails the run; callers log the warning and fall back to defaults.
#[derive(Debug, Clone)]
pub struct LoadedOverrides {
    pub path: Utf8PathBuf,
    pub overrides: Result<BTreeMap<String, String>, OverrideWarning>,
}

impl LoadedOverrides {
    /// The parsed overrides, or an empty map when the file was unusable.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.overrides.unwrap_or_default()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverrideWarning {
    #[error("override file not found")]
    NotFound,

    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

/// Read a flat JSON object of `raw name -> display label`.
///
/// Anything other than an object whose values are all strings is reported as
/// [`OverrideWarning::Json`].
pub fn load_label_overrides(path: &Utf8Path) -> LoadedOverrides {
    let overrides = if !path.exists() {
        Err(OverrideWarning::NotFound)
    } else {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<BTreeMap<String, String>>(&s).map_err(|e| {
                OverrideWarning::Json {
                    message: e.to_string(),
                }
            }),
            Err(e) => Err(OverrideWarning::Io {
                message: e.to_string(),
            }),
        }
    };

    if let Ok(map) = &overrides {
        debug!(path = %path, entries = map.len(), "loaded label overrides");
    }

    LoadedOverrides {
        path: path.to_path_buf(),
        overrides,
    }
}
