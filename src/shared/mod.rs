//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die serialisierbaren Laufzeit-Optionen, die sowohl der
//! Controller als auch die Binary verwenden.

pub mod options;

pub use options::{
    validate_threshold, DemoOptions, OptionsError, SnapOptions, DEFAULT_THRESHOLD_DISTANCE,
};
