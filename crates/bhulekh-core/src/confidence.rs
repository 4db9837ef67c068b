//! Completeness-based confidence scoring.
//!
//! The classifier is a pure function of the extracted record: it counts how
//! many of a fixed set of ten required fields carry real content (anything
//! other than the failure sentinels) and maps the ratio onto three levels.
//! At least one caller treats a non-`high` result as grounds to reject the
//! extraction, so the cutoffs here are part of the wire contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{ExtractedRecord, EXTRACTION_FAILED, NOT_FOUND};

/// Three-level completeness score for an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

/// A required field counts only when it holds real content.
fn is_present(value: &str) -> bool {
    !value.is_empty() && value != NOT_FOUND && value != EXTRACTION_FAILED
}

impl ConfidenceLevel {
    /// Number of fields inspected by [`classify`](Self::classify).
    pub const REQUIRED_FIELD_COUNT: usize = 10;

    /// Score `record` against the fixed required-field set.
    ///
    /// Cutoffs: ratio >= 0.95 is `High`, >= 0.70 is `Medium` (7/10 exactly
    /// qualifies), anything below is `Low`.
    #[must_use]
    pub fn classify(record: &ExtractedRecord) -> Self {
        let required: [&str; Self::REQUIRED_FIELD_COUNT] = [
            &record.district,
            &record.tehsil,
            &record.village,
            &record.record_number,
            &record.owner_name,
            &record.father_name,
            &record.caste,
            &record.total_plots,
            &record.plot_numbers,
            &record.total_area,
        ];

        let present = required.iter().filter(|v| is_present(v)).count();
        let completeness = present as f64 / Self::REQUIRED_FIELD_COUNT as f64;

        let confidence = if completeness >= 0.95 {
            Self::High
        } else if completeness >= 0.70 {
            Self::Medium
        } else {
            Self::Low
        };

        log::info!(
            "Extraction confidence: {confidence} ({present}/{} fields present)",
            Self::REQUIRED_FIELD_COUNT
        );
        confidence
    }
}
