//! English-to-Odia key/value remapping.
//!
//! The final record handed to downstream consumers is keyed entirely in
//! Odia. The mapping is a fixed dictionary; fields without an entry (the
//! `native_*` captures among them) are dropped from the remapped output.
//! For the three location fields the Odia value is preferred when the
//! source page carried one, otherwise the transliterated value passes
//! through. Everything else is a straight value copy, so the remap is a
//! pure, structure-only transform.

use serde_json::{Map, Value};

use crate::record::{ExtractedRecord, PlotRecord};

/// English field identifier -> Odia key, in output order.
const RECORD_KEYS: &[(&str, &str)] = &[
    ("district", "ଜିଲ୍ଲା"),
    ("tehsil", "ତହସିଲ"),
    ("village", "ମୌଜା"),
    ("record_number", "ଖତିୟାନ ନମ୍ବର"),
    ("owner_name", "ମାଲିକଙ୍କ ନାମ"),
    ("father_name", "ପିତାଙ୍କ ନାମ"),
    ("caste", "ଜାତି"),
    ("other_owners", "ଅନ୍ୟ ମାଲିକମାନେ"),
    ("total_plots", "ମୋଟ ପ୍ଲଟ ସଂଖ୍ୟା"),
    ("plot_numbers", "ପ୍ଲଟ ନମ୍ବର"),
    ("total_area", "ମୋଟ କ୍ଷେତ୍ରଫଳ"),
    ("land_type", "ଜମିର ପ୍ରକାର"),
    ("special_comments", "ବିଶେଷ ମନ୍ତବ୍ୟ"),
    ("plots", "ପ୍ଲଟ ବିବରଣୀ"),
];

/// Plot-level field identifier -> Odia key.
const PLOT_KEYS: &[(&str, &str)] = &[
    ("plot_number", "ପ୍ଲଟ ନମ୍ବର"),
    ("area", "କ୍ଷେତ୍ରଫଳ (ହେକ୍ଟର)"),
    ("land_type", "ଜମିର ପ୍ରକାର"),
    ("notes", "ଟିପ୍ପଣୀ"),
];

/// Prefer the native capture when present, else the transliterated value.
fn preferred<'a>(native: Option<&'a String>, english: &'a str) -> &'a str {
    match native {
        Some(n) if !n.is_empty() => n,
        _ => english,
    }
}

/// Remap one plot entry onto Odia keys.
///
/// `notes` is emitted only when present, mirroring its optionality in the
/// English-keyed record.
#[must_use]
pub fn remap_plot(plot: &PlotRecord) -> Value {
    let mut out = Map::new();
    for (field, key) in PLOT_KEYS {
        let value = match *field {
            "plot_number" => Some(Value::String(plot.plot_number.clone())),
            "area" => serde_json::Number::from_f64(plot.area).map(Value::Number),
            "land_type" => Some(Value::String(plot.land_type.clone())),
            "notes" => plot.notes.clone().map(Value::String),
            _ => None,
        };
        if let Some(value) = value {
            out.insert((*key).to_string(), value);
        }
    }
    Value::Object(out)
}

/// Remap a whole record onto Odia keys.
///
/// Deterministic: the same record always produces the same map, and the
/// output contains exactly the dictionary keys.
#[must_use]
pub fn remap_record(record: &ExtractedRecord) -> Map<String, Value> {
    let mut out = Map::new();
    for (field, key) in RECORD_KEYS {
        let value = match *field {
            "district" => Value::String(
                preferred(record.native_district.as_ref(), &record.district).to_string(),
            ),
            "tehsil" => Value::String(
                preferred(record.native_tehsil.as_ref(), &record.tehsil).to_string(),
            ),
            "village" => Value::String(
                preferred(record.native_village.as_ref(), &record.village).to_string(),
            ),
            "record_number" => Value::String(record.record_number.clone()),
            "owner_name" => Value::String(record.owner_name.clone()),
            "father_name" => Value::String(record.father_name.clone()),
            "caste" => Value::String(record.caste.clone()),
            "other_owners" => Value::String(record.other_owners.clone()),
            "total_plots" => Value::String(record.total_plots.clone()),
            "plot_numbers" => Value::String(record.plot_numbers.clone()),
            "total_area" => Value::String(record.total_area.clone()),
            "land_type" => Value::String(record.land_type.clone()),
            "special_comments" => Value::String(record.special_comments.clone()),
            "plots" => Value::Array(record.plots.iter().map(remap_plot).collect()),
            _ => continue,
        };
        out.insert((*key).to_string(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LocationInfo, NO_SPECIAL_COMMENTS};

    fn record() -> ExtractedRecord {
        let mut record = ExtractedRecord::from_parts(
            LocationInfo {
                district: Some("Cuttack".into()),
                native_district: Some("କଟକ".into()),
                tehsil: Some("Cuttack".into()),
                native_tehsil: None,
                village: Some("Chandini Chowk".into()),
                native_village: Some("ଚାନ୍ଦିନିଚୌକ".into()),
                record_number: Some("2".into()),
            },
            None,
            NO_SPECIAL_COMMENTS.to_string(),
        );
        record.plots = vec![PlotRecord {
            plot_number: "129".into(),
            area: 0.0065,
            land_type: "GHARABARI".into(),
            notes: Some("disputed boundary".into()),
        }];
        record
    }

    #[test]
    fn native_values_preferred_for_location_fields() {
        let out = remap_record(&record());
        assert_eq!(out["ଜିଲ୍ଲା"], "କଟକ");
        // No native tehsil captured: the English value falls through.
        assert_eq!(out["ତହସିଲ"], "Cuttack");
        assert_eq!(out["ମୌଜା"], "ଚାନ୍ଦିନିଚୌକ");
    }

    #[test]
    fn undictionaried_fields_are_dropped() {
        let out = remap_record(&record());
        assert_eq!(out.len(), RECORD_KEYS.len());
        assert!(!out.contains_key("district"));
        assert!(!out.contains_key("native_district"));
    }

    #[test]
    fn plots_are_remapped_with_the_plot_dictionary() {
        let out = remap_record(&record());
        let plots = out["ପ୍ଲଟ ବିବରଣୀ"].as_array().unwrap();
        assert_eq!(plots.len(), 1);
        assert_eq!(plots[0]["ପ୍ଲଟ ନମ୍ବର"], "129");
        assert_eq!(plots[0]["କ୍ଷେତ୍ରଫଳ (ହେକ୍ଟର)"], 0.0065);
        assert_eq!(plots[0]["ଟିପ୍ପଣୀ"], "disputed boundary");
    }

    #[test]
    fn notes_key_absent_when_plot_has_none() {
        let plot = PlotRecord {
            plot_number: "1".into(),
            area: 0.5,
            land_type: "SARAD-II".into(),
            notes: None,
        };
        let out = remap_plot(&plot);
        assert!(out.get("ଟିପ୍ପଣୀ").is_none());
    }

    #[test]
    fn remap_is_deterministic() {
        let record = record();
        assert_eq!(remap_record(&record), remap_record(&record));
    }
}
