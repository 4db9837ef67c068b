//! Field locators for the two page layouts.
//!
//! Both locators signal absence by returning `None`; a field that cannot be
//! found is never an error. `Err` is reserved for selector compilation
//! failures, which indicate a bug rather than a property of the input.

use bhulekh_core::{BhulekhError, Result};
use scraper::{ElementRef, Html, Selector};

use crate::labels::FieldLabel;

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BhulekhError::Selector(format!("{css:?}: {e:?}")))
}

/// Concatenated, per-fragment-trimmed text of an element, with non-breaking
/// spaces normalized away. Matches the flattening the source pages assume:
/// text fragments are stripped individually and joined without separators.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(|fragment| fragment.replace('\u{a0}', " "))
        .map(|fragment| fragment.trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Locate a bilingual field in the labeled-table layout.
///
/// Searches `<strong>` markers for either label, walks up to the marker's
/// `<td>`, reads the next sibling `<td>`, strips a leading `:`, and splits
/// the remainder on `/`. Two or more segments give `(native, english)`; a
/// single segment is an english-only value with no native counterpart.
pub fn bilingual_field(
    doc: &Html,
    label: FieldLabel,
) -> Result<(Option<String>, Option<String>)> {
    let strong_sel = selector("strong")?;

    for marker in doc.select(&strong_sel) {
        let text = element_text(marker);
        if !text.contains(label.odia) && !text.contains(label.english) {
            continue;
        }

        let Some(label_cell) = marker
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "td")
        else {
            continue;
        };
        let Some(value_cell) = label_cell
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "td")
        else {
            continue;
        };

        let value = element_text(value_cell);
        let value = value.trim_start_matches(':').trim();

        let parts: Vec<&str> = value.split('/').map(str::trim).collect();
        return Ok(match parts.as_slice() {
            [native, english, ..] => (Some((*native).to_string()), Some((*english).to_string())),
            [only] => (None, Some((*only).to_string())),
            [] => (None, None),
        });
    }

    Ok((None, None))
}

/// Locate a field in the identifier-driven layout.
///
/// Tries each candidate element id as an exact lookup first; when none
/// match, scans table cells for the label text and reads the nested value
/// span. The captured string is the sole (Odia) value for the field.
pub fn span_field(doc: &Html, candidate_ids: &[&str], label: &str) -> Result<Option<String>> {
    for id in candidate_ids {
        let id_sel = selector(&format!("#{id}"))?;
        if let Some(element) = doc.select(&id_sel).next() {
            let value = element_text(element);
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }
    }

    // Fallback: the label and its value share a cell, value in a nested span.
    let cell_sel = selector("td")?;
    let span_sel = selector("span")?;
    for cell in doc.select(&cell_sel) {
        let text = element_text(cell);
        if !text.contains(label) {
            continue;
        }
        if let Some(span) = cell.select(&span_sel).next() {
            let value = element_text(span);
            if !value.is_empty() {
                return Ok(Some(value));
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels;

    #[test]
    fn bilingual_cell_splits_on_slash() {
        let doc = Html::parse_document(
            r#"<table><tr>
                <td><strong>ଜିଲ୍ଲା / District</strong></td>
                <td>: କଟକ / Cuttack</td>
            </tr></table>"#,
        );
        let (native, english) = bilingual_field(&doc, labels::DISTRICT).unwrap();
        assert_eq!(native.as_deref(), Some("କଟକ"));
        assert_eq!(english.as_deref(), Some("Cuttack"));
    }

    #[test]
    fn single_segment_is_english_only() {
        let doc = Html::parse_document(
            r#"<table><tr>
                <td><strong>ଜିଲ୍ଲା / District</strong></td>
                <td>: Cuttack</td>
            </tr></table>"#,
        );
        let (native, english) = bilingual_field(&doc, labels::DISTRICT).unwrap();
        assert_eq!(native, None);
        assert_eq!(english.as_deref(), Some("Cuttack"));
    }

    #[test]
    fn absent_label_returns_none_pair() {
        let doc = Html::parse_document("<p>nothing here</p>");
        let (native, english) = bilingual_field(&doc, labels::DISTRICT).unwrap();
        assert_eq!(native, None);
        assert_eq!(english, None);
    }

    #[test]
    fn marker_without_sibling_cell_is_skipped() {
        let doc = Html::parse_document(
            r#"<table><tr><td><strong>ଜିଲ୍ଲା / District</strong></td></tr></table>"#,
        );
        let (native, english) = bilingual_field(&doc, labels::DISTRICT).unwrap();
        assert_eq!((native, english), (None, None));
    }

    #[test]
    fn span_field_prefers_exact_id_lookup() {
        let doc = Html::parse_document(
            r#"<span id="lblDistrict">କଟକ</span>
               <table><tr><td>ଜିଲ୍ଲା <span>wrong</span></td></tr></table>"#,
        );
        let value = span_field(&doc, labels::DISTRICT_IDS, "ଜିଲ୍ଲା").unwrap();
        assert_eq!(value.as_deref(), Some("କଟକ"));
    }

    #[test]
    fn span_field_falls_back_to_cell_scan() {
        let doc = Html::parse_document(
            r#"<table><tr><td>ଜିଲ୍ଲା: <span>କଟକ</span></td></tr></table>"#,
        );
        let value = span_field(&doc, &["lblMissing"], "ଜିଲ୍ଲା").unwrap();
        assert_eq!(value.as_deref(), Some("କଟକ"));
    }

    #[test]
    fn span_field_absent_is_none() {
        let doc = Html::parse_document("<table><tr><td>other</td></tr></table>");
        let value = span_field(&doc, labels::DISTRICT_IDS, "ଜିଲ୍ଲା").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn nbsp_is_normalized_out_of_cell_text() {
        let doc = Html::parse_document("<table><tr><td id='x'>\u{a0}\u{a0}</td></tr></table>");
        let sel = selector("#x").unwrap();
        let cell = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(cell), "");
    }
}
