//! Core types for the Bhulekh RoR extraction system.
//!
//! This crate owns the normalized record model ([`ExtractedRecord`],
//! [`PlotRecord`]), the completeness-based [`ConfidenceLevel`] classifier,
//! the English-to-Odia key/value remapper, and the boundary contracts for
//! external collaborators (record storage, translation).
//!
//! The extraction engine itself lives in `bhulekh-extract`; everything here
//! is pure data and pure functions over it. Absent data is carried as
//! `Option` internally and converted to the wire sentinels (`"Not found"`
//! and friends) exactly once, when an [`ExtractedRecord`] is assembled.

pub mod boundary;
pub mod confidence;
pub mod error;
pub mod record;
pub mod remap;

pub use boundary::{InMemoryRecordStore, RecordKey, RecordStore, RecordTranslator, StoredExtraction};
pub use confidence::ConfidenceLevel;
pub use error::{BhulekhError, Result};
pub use record::{
    ExtractedRecord, LocationInfo, PlotRecord, PlotSummary, EXTRACTION_FAILED, NONE_MENTIONED,
    NOT_FOUND, NO_SPECIAL_COMMENTS,
};
pub use remap::{remap_plot, remap_record};
