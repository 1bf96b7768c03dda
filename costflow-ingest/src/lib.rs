//! Input loading for costflow.
//!
//! The cost export is the only mandatory input, so problems with it are hard errors. Label override
//! files are optional: a broken one degrades to a warning and the built-in labels are used.

mod export;
mod overrides;

pub use export::{LoadError, load_cost_rows};
pub use overrides::{LoadedOverrides, OverrideWarning, load_label_overrides};
