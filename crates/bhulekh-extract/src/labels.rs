//! Field labels, element-id candidates, and layout constants for the two
//! known Bhulekh page formats.
//!
//! The labeled-table layout (SRoR pages) renders every field as a bilingual
//! `Odia / English` label cell with the value in the adjacent cell. The
//! identifier-driven layout (CRoR pages) renders values into ASP.NET label
//! spans whose ids vary slightly between page revisions, hence the small
//! candidate lists per field.

/// A bilingual field label: Odia text plus its transliterated counterpart.
#[derive(Debug, Clone, Copy)]
pub struct FieldLabel {
    pub odia: &'static str,
    pub english: &'static str,
}

pub const DISTRICT: FieldLabel = FieldLabel {
    odia: "ଜିଲ୍ଲା",
    english: "District",
};

pub const TEHSIL: FieldLabel = FieldLabel {
    odia: "ତହସିଲ",
    english: "Tahasil",
};

pub const VILLAGE: FieldLabel = FieldLabel {
    odia: "ମୌଜା",
    english: "Mouza",
};

pub const RECORD_NUMBER: FieldLabel = FieldLabel {
    odia: "ଖତିୟାନର କ୍ରମିକ ନମ୍ବର",
    english: "Khata No",
};

/// Candidate element ids for the identifier-driven layout, tried in order.
pub const DISTRICT_IDS: &[&str] = &["lblDistrict", "lblDist"];
pub const TEHSIL_IDS: &[&str] = &["lblTahasil", "lblTehsil"];
pub const VILLAGE_IDS: &[&str] = &["lblMouza", "lblVillage"];
pub const RECORD_NUMBER_IDS: &[&str] = &["lblKhataNo", "lblKhatiyanNo"];

/// Front-page ownership blob on identifier-driven pages. The blob carries
/// owner, father, and caste in one string, separated by Odia marker tokens.
pub const OWNER_IDS: &[&str] = &["lblOwnerName", "lblTenantName"];

/// Label text used for the cell-scan fallback when none of the ownership
/// blob ids match.
pub const OWNER_LABEL: &str = "ମାଲିକ";

/// Marker preceding the father's name inside the ownership blob.
pub const FATHER_DELIM: &str = "ପିତା";

/// Marker preceding the caste inside the ownership blob.
pub const CASTE_DELIM: &str = "ଜାତି";

/// Plot-grid element ids. Each grid carries its own column scheme, so the
/// id that matches decides how rows are parsed.
pub const LABELED_PLOT_TABLE_ID: &str = "GrdViewRoR";
pub const SPAN_PLOT_TABLE_ID: &str = "GrdViewKhatiyan";

/// Id fragment of the per-row hectare span on identifier-driven pages.
pub const HECTARE_SPAN_FRAGMENT: &str = "Hect";

/// Unit conversions for reconstructing areas given in acre + decimal.
pub const HECTARES_PER_ACRE: f64 = 0.404686;
pub const HECTARES_PER_DECIMAL: f64 = 0.004_046_86;

/// Labeled-table plot columns (0-indexed): serial, plot number,
/// classification, plot type, area in hectares, then tenure columns,
/// owner, father/husband, caste, and an optional notes column.
pub mod labeled_columns {
    pub const PLOT_NUMBER: usize = 1;
    pub const LAND_TYPE: usize = 2;
    pub const AREA_HECTARES: usize = 4;
    pub const OWNER: usize = 8;
    pub const FATHER: usize = 9;
    pub const CASTE: usize = 10;
    pub const NOTES: usize = 13;
    /// Rows with fewer cells than this are headers or summaries.
    pub const MIN_CELLS: usize = 11;
}

/// Identifier-driven plot columns (0-indexed): serial, plot number,
/// classification, area in hectares, then acre and decimal sub-units.
pub mod span_columns {
    pub const PLOT_NUMBER: usize = 1;
    pub const LAND_TYPE: usize = 2;
    pub const AREA_HECTARES: usize = 3;
    pub const AREA_ACRES: usize = 4;
    pub const AREA_DECIMALS: usize = 5;
    pub const NOTES: usize = 6;
    pub const MIN_CELLS: usize = 4;
}

/// Auxiliary metadata field: output label, bilingual search labels, and
/// candidate element ids for the identifier-driven layout.
#[derive(Debug, Clone, Copy)]
pub struct MetadataField {
    pub label: &'static str,
    pub odia: &'static str,
    pub english: &'static str,
    pub ids: &'static [&'static str],
}

/// Fields harvested into `special_comments`, in output order.
pub const METADATA_FIELDS: &[MetadataField] = &[
    MetadataField {
        label: "Final Publication Date",
        odia: "ଅନ୍ତିମ ପ୍ରକାଶନ ତାରିଖ",
        english: "Final Publication Date",
        ids: &["lblFinalPublicationDt", "lblPublicationDate"],
    },
    MetadataField {
        label: "Rent Fixation Date",
        odia: "ଭଡା ନିର୍ଦ୍ଧାରଣ ତାରିଖ",
        english: "Rent Fixation Date",
        ids: &["lblRentFixationDt"],
    },
    MetadataField {
        label: "Police Station",
        odia: "ଥାନା",
        english: "Police Station",
        ids: &["lblPS", "lblPoliceStation"],
    },
    MetadataField {
        label: "P.S. No",
        odia: "ଥାନା ନଂ",
        english: "P.S. No",
        ids: &["lblPSNo"],
    },
    MetadataField {
        label: "Tahasil No",
        odia: "ତହସିଲ ନଂ",
        english: "Tahasil No",
        ids: &["lblTahasilNo"],
    },
    MetadataField {
        label: "Land Revenue",
        odia: "ଜମି ରାଜସ୍ୱ",
        english: "Land Revenue",
        ids: &["lblLandRevenue", "lblRent"],
    },
];
