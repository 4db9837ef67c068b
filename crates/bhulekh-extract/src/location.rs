//! Location extraction: district, tehsil, village, record number.

use bhulekh_core::{LocationInfo, Result};
use scraper::Html;

use crate::labels;
use crate::layout::Layout;
use crate::locator::{bilingual_field, span_field};

/// Pull the four location fields under the detected layout.
///
/// Labeled-table pages yield both scripts per field; identifier-driven
/// pages carry only the Odia value, which is recorded as both the value and
/// its native counterpart so the remapper sees it either way. The record
/// number has no native variant in either layout.
pub fn extract_location(doc: &Html, layout: Layout) -> Result<LocationInfo> {
    match layout {
        Layout::LabeledTable => {
            let (native_district, district) = bilingual_field(doc, labels::DISTRICT)?;
            let (native_tehsil, tehsil) = bilingual_field(doc, labels::TEHSIL)?;
            let (native_village, village) = bilingual_field(doc, labels::VILLAGE)?;
            let (_, record_number) = bilingual_field(doc, labels::RECORD_NUMBER)?;
            Ok(LocationInfo {
                district,
                native_district,
                tehsil,
                native_tehsil,
                village,
                native_village,
                record_number,
            })
        }
        Layout::SpanId => {
            let district = span_field(doc, labels::DISTRICT_IDS, labels::DISTRICT.odia)?;
            let tehsil = span_field(doc, labels::TEHSIL_IDS, labels::TEHSIL.odia)?;
            let village = span_field(doc, labels::VILLAGE_IDS, labels::VILLAGE.odia)?;
            let record_number =
                span_field(doc, labels::RECORD_NUMBER_IDS, labels::RECORD_NUMBER.odia)?;
            Ok(LocationInfo {
                native_district: district.clone(),
                district,
                native_tehsil: tehsil.clone(),
                tehsil,
                native_village: village.clone(),
                village,
                record_number,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_table_location_is_bilingual() {
        let doc = Html::parse_document(
            r#"<table>
                <tr><td><strong>ଜିଲ୍ଲା / District</strong></td><td>: କଟକ / Cuttack</td></tr>
                <tr><td><strong>ତହସିଲ / Tahasil</strong></td><td>: କଟକ / Cuttack</td></tr>
                <tr><td><strong>ମୌଜା / Mouza</strong></td><td>: ଚାନ୍ଦିନିଚୌକ / Chandini Chowk</td></tr>
                <tr><td><strong>ଖତିୟାନର କ୍ରମିକ ନମ୍ବର / Khata No.</strong></td><td>: 2</td></tr>
            </table>"#,
        );
        let location = extract_location(&doc, Layout::LabeledTable).unwrap();
        assert_eq!(location.district.as_deref(), Some("Cuttack"));
        assert_eq!(location.native_district.as_deref(), Some("କଟକ"));
        assert_eq!(location.village.as_deref(), Some("Chandini Chowk"));
        assert_eq!(location.native_village.as_deref(), Some("ଚାନ୍ଦିନିଚୌକ"));
        assert_eq!(location.record_number.as_deref(), Some("2"));
    }

    #[test]
    fn span_layout_location_is_single_script() {
        let doc = Html::parse_document(
            r#"<span id="lblDistrict">କଟକ</span>
               <span id="lblTehsil">କଟକ</span>
               <span id="lblMouza">ଚାନ୍ଦିନିଚୌକ</span>
               <span id="lblKhataNo">2</span>"#,
        );
        let location = extract_location(&doc, Layout::SpanId).unwrap();
        assert_eq!(location.district.as_deref(), Some("କଟକ"));
        assert_eq!(location.native_district.as_deref(), Some("କଟକ"));
        assert_eq!(location.record_number.as_deref(), Some("2"));
    }

    #[test]
    fn missing_fields_stay_none() {
        let doc = Html::parse_document("<html></html>");
        let location = extract_location(&doc, Layout::LabeledTable).unwrap();
        assert_eq!(location, LocationInfo::default());
    }
}
