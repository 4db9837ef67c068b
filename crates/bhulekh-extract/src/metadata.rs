//! Auxiliary metadata harvesting: dates, police station, administrative
//! codes, land revenue, and per-plot remarks, concatenated into the
//! `special_comments` block.

use bhulekh_core::{PlotRecord, Result, NO_SPECIAL_COMMENTS};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::labels::{self, MetadataField};
use crate::locator::{element_text, selector};

/// Value of one metadata field, id lookup first.
///
/// Identifier-based capture takes precedence over the label scan so a field
/// present both ways produces a single line.
fn field_value(doc: &Html, field: &MetadataField) -> Result<Option<String>> {
    for id in field.ids {
        let id_sel = selector(&format!("#{id}"))?;
        if let Some(element) = doc.select(&id_sel).next() {
            let value = element_text(element);
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }
    }

    // Label scan: the value follows the label in the marker's parent,
    // separated by a colon.
    static VALUE_AFTER_COLON: Lazy<Regex> =
        Lazy::new(|| Regex::new(r":\s*(.+)").expect("Invalid metadata value regex"));

    let strong_sel = selector("strong")?;
    for marker in doc.select(&strong_sel) {
        let text = element_text(marker);
        if !text.contains(field.odia) && !text.contains(field.english) {
            continue;
        }
        let Some(parent) = marker.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let full_text = element_text(parent);
        if let Some(captures) = VALUE_AFTER_COLON.captures(&full_text) {
            let value = captures[1].trim().to_string();
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }
    }

    Ok(None)
}

/// Harvest the auxiliary fields and plot notes into one newline-joined
/// block, one `"Label: value"` line per found field. Returns the
/// `"No special comments found"` sentinel when nothing turns up.
pub fn extract_special_comments(doc: &Html, plots: &[PlotRecord]) -> Result<String> {
    let mut comments = Vec::new();

    for field in labels::METADATA_FIELDS {
        if let Some(value) = field_value(doc, field)? {
            comments.push(format!("{}: {}", field.label, value));
        }
    }

    let plot_notes: Vec<String> = plots
        .iter()
        .filter_map(|plot| {
            plot.notes
                .as_ref()
                .map(|note| format!("Plot {}: {}", plot.plot_number, note))
        })
        .collect();
    if !plot_notes.is_empty() {
        comments.push(format!("Plot Notes: {}", plot_notes.join("; ")));
    }

    if comments.is_empty() {
        Ok(NO_SPECIAL_COMMENTS.to_string())
    } else {
        Ok(comments.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_scan_reads_value_after_colon() {
        let doc = Html::parse_document(
            r#"<table>
                <tr><td><strong>ଅନ୍ତିମ ପ୍ରକାଶନ ତାରିଖ / Final Publication Date</strong> : 29/03/2003</td></tr>
                <tr><td><strong>ଥାନା/ Police Station</strong> : Lalbag</td></tr>
                <tr><td><strong>ଜମି ରାଜସ୍ୱ/ Land Revenue</strong> : 6.40</td></tr>
            </table>"#,
        );
        let comments = extract_special_comments(&doc, &[]).unwrap();
        assert!(comments.contains("Final Publication Date: 29/03/2003"));
        assert!(comments.contains("Police Station: Lalbag"));
        assert!(comments.contains("Land Revenue: 6.40"));
    }

    #[test]
    fn id_capture_takes_precedence_over_label_scan() {
        let doc = Html::parse_document(
            r#"<span id="lblPS">Lalbag</span>
               <table><tr><td><strong>ଥାନା / Police Station</strong> : Somewhere Else</td></tr></table>"#,
        );
        let comments = extract_special_comments(&doc, &[]).unwrap();
        let police_lines: Vec<&str> = comments
            .lines()
            .filter(|line| line.starts_with("Police Station:"))
            .collect();
        assert_eq!(police_lines, vec!["Police Station: Lalbag"]);
    }

    #[test]
    fn plot_notes_are_appended_as_a_digest() {
        let plots = vec![
            PlotRecord {
                plot_number: "129".into(),
                area: 0.0065,
                land_type: "GHARABARI".into(),
                notes: Some("encroachment case pending".into()),
            },
            PlotRecord {
                plot_number: "130".into(),
                area: 0.0105,
                land_type: "GHARABARI".into(),
                notes: None,
            },
        ];
        let doc = Html::parse_document("<html></html>");
        let comments = extract_special_comments(&doc, &plots).unwrap();
        assert_eq!(
            comments,
            "Plot Notes: Plot 129: encroachment case pending"
        );
    }

    #[test]
    fn nothing_found_yields_the_sentinel() {
        let doc = Html::parse_document("<html><body><p>unrelated</p></body></html>");
        let comments = extract_special_comments(&doc, &[]).unwrap();
        assert_eq!(comments, NO_SPECIAL_COMMENTS);
    }
}
