//! Normalized Khatiyan record model.
//!
//! [`ExtractedRecord`] is the serialization boundary of the engine: every
//! scalar field is a `String` with the wire sentinels already applied. The
//! extraction stages work with [`LocationInfo`] and [`PlotSummary`], which
//! carry absence as `Option`/empty collections, and the conversion happens
//! exactly once in [`ExtractedRecord::from_parts`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sentinel for a field that could not be located in the document.
pub const NOT_FOUND: &str = "Not found";

/// Sentinel for a structural failure of the whole extraction pass.
pub const EXTRACTION_FAILED: &str = "Extraction failed";

/// Sentinel for `other_owners` when the record names a single owner.
pub const NONE_MENTIONED: &str = "None mentioned";

/// Sentinel for an empty metadata/remarks block.
pub const NO_SPECIAL_COMMENTS: &str = "No special comments found";

/// A single land parcel entry within a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    /// Plot identifier as printed in the table.
    pub plot_number: String,
    /// Parcel area in hectares. Unparsable source values become `0.0`.
    pub area: f64,
    /// Land classification for this parcel.
    pub land_type: String,
    /// Free-text note attached to this parcel, when the table carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Location fields as captured by the field locators, before sentinels.
///
/// `None` and `Some("")` both mean "not captured"; the distinction is
/// collapsed when the record is assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationInfo {
    pub district: Option<String>,
    pub native_district: Option<String>,
    pub tehsil: Option<String>,
    pub native_tehsil: Option<String>,
    pub village: Option<String>,
    pub native_village: Option<String>,
    pub record_number: Option<String>,
}

/// Accumulated plot-table output, before sentinels.
///
/// The owner/father/caste/land-type sets are `BTreeSet`s so that every
/// aggregate string derived from them is in sorted order and therefore
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotSummary {
    pub plots: Vec<PlotRecord>,
    pub owners: BTreeSet<String>,
    pub fathers: BTreeSet<String>,
    pub castes: BTreeSet<String>,
    pub land_types: BTreeSet<String>,
    pub total_area: f64,
}

impl PlotSummary {
    /// Record one parsed row. Empty owner/father/caste/land-type strings are
    /// not added to the distinct sets.
    pub fn push_row(
        &mut self,
        plot: PlotRecord,
        owner: Option<&str>,
        father: Option<&str>,
        caste: Option<&str>,
    ) {
        self.total_area += plot.area;
        if !plot.land_type.is_empty() {
            self.land_types.insert(plot.land_type.clone());
        }
        for (set, value) in [
            (&mut self.owners, owner),
            (&mut self.fathers, father),
            (&mut self.castes, caste),
        ] {
            if let Some(v) = value {
                if !v.is_empty() {
                    set.insert(v.to_string());
                }
            }
        }
        self.plots.push(plot);
    }
}

/// A fully extracted record-of-rights, sentinels applied.
///
/// Serializes to the wire shape consumed by the API layer: every scalar key
/// always present, the three `native_*` keys omitted when absent, `plots`
/// as a nested array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_district: Option<String>,
    pub tehsil: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_tehsil: Option<String>,
    pub village: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_village: Option<String>,
    pub record_number: String,
    pub owner_name: String,
    pub father_name: String,
    pub caste: String,
    pub other_owners: String,
    pub total_plots: String,
    pub plot_numbers: String,
    pub total_area: String,
    pub land_type: String,
    pub special_comments: String,
    pub plots: Vec<PlotRecord>,
}

/// Collapse `None`/empty into the `"Not found"` sentinel.
fn or_not_found(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_FOUND.to_string(),
    }
}

/// Drop empty captures so a blank cell does not masquerade as a value.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ExtractedRecord {
    /// Assemble the final record from the three extraction stages.
    ///
    /// `plot_summary` is `None` when the plot table was missing or empty; in
    /// that case every plot-derived field gets the `"Not found"` sentinel.
    /// With a summary present the aggregates are derived deterministically:
    /// the lexicographically first distinct owner is the primary owner, the
    /// remaining ones are comma-joined into `other_owners`, and land types
    /// are slash-joined in sorted order.
    #[must_use]
    pub fn from_parts(
        location: LocationInfo,
        plot_summary: Option<PlotSummary>,
        special_comments: String,
    ) -> Self {
        let (
            total_plots,
            plot_numbers,
            total_area,
            owner_name,
            father_name,
            caste,
            land_type,
            other_owners,
            plots,
        ) = match plot_summary {
            Some(summary) => {
                let plot_numbers = summary
                    .plots
                    .iter()
                    .map(|p| p.plot_number.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");

                let mut owners = summary.owners.iter();
                let owner_name = owners.next().cloned().unwrap_or_else(|| NOT_FOUND.to_string());
                let rest: Vec<&str> = owners.map(String::as_str).collect();
                let other_owners = if rest.is_empty() {
                    NONE_MENTIONED.to_string()
                } else {
                    rest.join(", ")
                };

                let first = |set: &BTreeSet<String>| {
                    set.iter().next().cloned().unwrap_or_else(|| NOT_FOUND.to_string())
                };
                let land_type = if summary.land_types.is_empty() {
                    NOT_FOUND.to_string()
                } else {
                    summary
                        .land_types
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(" / ")
                };

                (
                    summary.plots.len().to_string(),
                    plot_numbers,
                    format!("{:.4} hectares", summary.total_area),
                    owner_name,
                    first(&summary.fathers),
                    first(&summary.castes),
                    land_type,
                    other_owners,
                    summary.plots,
                )
            }
            None => (
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                NOT_FOUND.to_string(),
                Vec::new(),
            ),
        };

        Self {
            district: or_not_found(location.district),
            native_district: non_empty(location.native_district),
            tehsil: or_not_found(location.tehsil),
            native_tehsil: non_empty(location.native_tehsil),
            village: or_not_found(location.village),
            native_village: non_empty(location.native_village),
            record_number: or_not_found(location.record_number),
            owner_name,
            father_name,
            caste,
            other_owners,
            total_plots,
            plot_numbers,
            total_area,
            land_type,
            special_comments,
            plots,
        }
    }

    /// The record returned when an extraction stage fails structurally.
    /// Every scalar field carries the `"Extraction failed"` sentinel so the
    /// confidence classifier scores it `low`.
    #[must_use]
    pub fn extraction_failed() -> Self {
        let failed = || EXTRACTION_FAILED.to_string();
        Self {
            district: failed(),
            native_district: None,
            tehsil: failed(),
            native_tehsil: None,
            village: failed(),
            native_village: None,
            record_number: failed(),
            owner_name: failed(),
            father_name: failed(),
            caste: failed(),
            other_owners: failed(),
            total_plots: failed(),
            plot_numbers: failed(),
            total_area: failed(),
            land_type: failed(),
            special_comments: failed(),
            plots: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with(rows: &[(&str, f64, &str, &str)]) -> PlotSummary {
        let mut summary = PlotSummary::default();
        for (number, area, land_type, owner) in rows {
            summary.push_row(
                PlotRecord {
                    plot_number: (*number).to_string(),
                    area: *area,
                    land_type: (*land_type).to_string(),
                    notes: None,
                },
                Some(owner),
                Some("Father"),
                Some("Caste"),
            );
        }
        summary
    }

    #[test]
    fn aggregates_are_deterministic_and_sorted() {
        let summary = summary_with(&[
            ("300", 0.2, "SARAD-II", "Zoya"),
            ("100", 0.5, "GHARABARI", "Anil"),
            ("200", 0.3, "GHARABARI", "Anil"),
        ]);
        let record = ExtractedRecord::from_parts(
            LocationInfo::default(),
            Some(summary),
            NO_SPECIAL_COMMENTS.to_string(),
        );

        assert_eq!(record.total_plots, "3");
        // Row order, not sorted order.
        assert_eq!(record.plot_numbers, "300, 100, 200");
        assert_eq!(record.total_area, "1.0000 hectares");
        // Lexicographically first distinct owner wins.
        assert_eq!(record.owner_name, "Anil");
        assert_eq!(record.other_owners, "Zoya");
        assert_eq!(record.land_type, "GHARABARI / SARAD-II");
    }

    #[test]
    fn single_owner_yields_none_mentioned() {
        let summary = summary_with(&[("1", 0.1, "GHARABARI", "Anil")]);
        let record = ExtractedRecord::from_parts(
            LocationInfo::default(),
            Some(summary),
            NO_SPECIAL_COMMENTS.to_string(),
        );
        assert_eq!(record.owner_name, "Anil");
        assert_eq!(record.other_owners, NONE_MENTIONED);
    }

    #[test]
    fn missing_plot_table_sentinels_everything() {
        let record = ExtractedRecord::from_parts(
            LocationInfo::default(),
            None,
            NO_SPECIAL_COMMENTS.to_string(),
        );
        assert_eq!(record.owner_name, NOT_FOUND);
        assert_eq!(record.total_plots, NOT_FOUND);
        assert_eq!(record.total_area, NOT_FOUND);
        assert_eq!(record.other_owners, NOT_FOUND);
        assert!(record.plots.is_empty());
    }

    #[test]
    fn empty_captures_collapse_to_not_found() {
        let location = LocationInfo {
            district: Some(String::new()),
            native_district: Some(String::new()),
            ..LocationInfo::default()
        };
        let record =
            ExtractedRecord::from_parts(location, None, NO_SPECIAL_COMMENTS.to_string());
        assert_eq!(record.district, NOT_FOUND);
        assert_eq!(record.native_district, None);
    }

    #[test]
    fn native_fields_absent_from_json_when_missing() {
        let record = ExtractedRecord::from_parts(
            LocationInfo {
                district: Some("Cuttack".to_string()),
                native_district: Some("କଟକ".to_string()),
                ..LocationInfo::default()
            },
            None,
            NO_SPECIAL_COMMENTS.to_string(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["native_district"], "କଟକ");
        assert!(json.get("native_tehsil").is_none());
        // Scalar fields are always present, sentinel or not.
        assert_eq!(json["owner_name"], NOT_FOUND);
    }
}
