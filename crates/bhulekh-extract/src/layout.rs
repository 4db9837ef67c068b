//! Page-layout detection.
//!
//! The two Bhulekh page families render their location fields differently,
//! and the choice is made once per document: if the bilingual district
//! probe finds a value the page is a labeled-table (SRoR) page, otherwise
//! the location pass falls back to the identifier-driven (CRoR) lookup.
//! There is no per-field mixing of the two. The plot grid is keyed
//! separately, by which grid id is present, since a page can miss its
//! location labels and still carry either grid.

use bhulekh_core::Result;
use scraper::Html;

use crate::labels;
use crate::locator::bilingual_field;

/// Page-family tag: selected once per document for the location fields,
/// and reused by the plot pass to name the grid's row scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Bilingual `label / value` cells in plain tables (SRoR pages).
    LabeledTable,
    /// Values rendered into spans with well-known ids (CRoR pages).
    SpanId,
}

impl Layout {
    /// Probe the document with the primary location field (district).
    pub fn detect(doc: &Html) -> Result<Self> {
        let (_, english) = bilingual_field(doc, labels::DISTRICT)?;
        let layout = match english {
            Some(value) if !value.is_empty() => Self::LabeledTable,
            _ => Self::SpanId,
        };
        log::debug!("Detected page layout: {layout:?}");
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilingual_district_selects_labeled_table() {
        let doc = Html::parse_document(
            r#"<table><tr>
                <td><strong>ଜିଲ୍ଲା / District</strong></td>
                <td>: କଟକ / Cuttack</td>
            </tr></table>"#,
        );
        assert_eq!(Layout::detect(&doc).unwrap(), Layout::LabeledTable);
    }

    #[test]
    fn missing_district_probe_falls_back_to_span_layout() {
        let doc = Html::parse_document(r#"<span id="lblDistrict">କଟକ</span>"#);
        assert_eq!(Layout::detect(&doc).unwrap(), Layout::SpanId);
    }

    #[test]
    fn empty_document_selects_span_layout() {
        let doc = Html::parse_document("<html></html>");
        assert_eq!(Layout::detect(&doc).unwrap(), Layout::SpanId);
    }
}
