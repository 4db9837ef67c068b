//! Plot-table extraction for both page layouts.
//!
//! The labeled-table layout carries ownership columns per row; the
//! identifier-driven layout puts ownership in a single front-page blob and
//! sometimes interleaves section-header rows between data rows, so the two
//! variants differ in row filtering, column positions, and area handling.
//! A malformed row never aborts the pass: bad areas contribute `0.0` with a
//! logged warning and later rows are parsed normally.

use bhulekh_core::{PlotRecord, PlotSummary, Result};
use scraper::{ElementRef, Html};

use crate::labels::{self, labeled_columns, span_columns};
use crate::layout::Layout;
use crate::locator::{element_text, selector, span_field};

/// Locate the plot table by its known element ids, tried in order. The id
/// that matches also decides the row scheme: a page whose location labels
/// are missing can still carry the labeled grid, and its hectare column
/// must not be misread through the other grid's positions.
fn find_plot_table<'a>(doc: &'a Html) -> Result<Option<(ElementRef<'a>, Layout)>> {
    for (id, scheme) in [
        (labels::LABELED_PLOT_TABLE_ID, Layout::LabeledTable),
        (labels::SPAN_PLOT_TABLE_ID, Layout::SpanId),
    ] {
        let table_sel = selector(&format!("table#{id}"))?;
        if let Some(table) = doc.select(&table_sel).next() {
            return Ok(Some((table, scheme)));
        }
    }
    Ok(None)
}

/// Parse an area cell, degrading to `0.0` on malformed content.
fn parse_area(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(area) => area,
        Err(_) => {
            if !trimmed.is_empty() {
                log::warn!("Could not parse area: {trimmed:?}");
            }
            0.0
        }
    }
}

/// Plot number for a row: a nested link or labeled span is more precise
/// than the raw cell text, so it wins when both are present.
fn plot_number(cell: ElementRef<'_>) -> Result<String> {
    let link_sel = selector("a")?;
    if let Some(link) = cell.select(&link_sel).next() {
        let text = element_text(link);
        if !text.is_empty() {
            return Ok(text);
        }
    }
    Ok(element_text(cell))
}

/// Notes column content, with placeholder values dropped.
fn row_notes(cells: &[ElementRef<'_>], index: usize) -> Option<String> {
    let note = element_text(*cells.get(index)?);
    if note.is_empty() || note.eq_ignore_ascii_case("not found") {
        None
    } else {
        Some(note)
    }
}

/// Extract the plot table under the scheme implied by the matching grid id.
///
/// Returns `None` when the table is absent or carries no rows at all; the
/// caller turns that into `"Not found"` sentinels. A present table whose
/// rows all fail the scheme heuristics yields an empty summary (zero
/// plots), matching the distinction the confidence classifier relies on.
pub fn extract_plots(doc: &Html) -> Result<Option<PlotSummary>> {
    let Some((table, scheme)) = find_plot_table(doc)? else {
        log::warn!("Plot table not found in document");
        return Ok(None);
    };

    let tr_sel = selector("tr")?;
    let rows: Vec<ElementRef<'_>> = table.select(&tr_sel).collect();

    match scheme {
        Layout::LabeledTable => {
            // First row is the column header.
            if rows.len() <= 1 {
                log::warn!("No data rows found in plot table");
                return Ok(None);
            }
            labeled_rows(&rows[1..]).map(Some)
        }
        Layout::SpanId => {
            if rows.is_empty() {
                log::warn!("No data rows found in plot table");
                return Ok(None);
            }
            span_rows(doc, &rows)
        }
    }
}

/// Labeled-table rows: one plot per row, ownership columns inline.
/// Header/summary rows are recognized by their reduced column count.
fn labeled_rows(rows: &[ElementRef<'_>]) -> Result<PlotSummary> {
    let td_sel = selector("td")?;
    let mut summary = PlotSummary::default();

    for row in rows {
        let cells: Vec<ElementRef<'_>> = row.select(&td_sel).collect();
        if cells.len() < labeled_columns::MIN_CELLS {
            continue;
        }

        let number = plot_number(cells[labeled_columns::PLOT_NUMBER])?;
        let land_type = element_text(cells[labeled_columns::LAND_TYPE]);
        let area = parse_area(&element_text(cells[labeled_columns::AREA_HECTARES]));
        let owner = element_text(cells[labeled_columns::OWNER]);
        let father = element_text(cells[labeled_columns::FATHER]);
        let caste = element_text(cells[labeled_columns::CASTE]);
        let notes = row_notes(&cells, labeled_columns::NOTES);

        summary.push_row(
            PlotRecord {
                plot_number: number,
                area,
                land_type,
                notes,
            },
            Some(&owner),
            Some(&father),
            Some(&caste),
        );
    }

    Ok(summary)
}

/// Identifier-driven rows. Section headers interleave with data rows, so a
/// row only counts when its serial cell starts with a digit. Ownership is
/// not per-row here; it comes from the front-page blob.
fn span_rows(doc: &Html, rows: &[ElementRef<'_>]) -> Result<Option<PlotSummary>> {
    let td_sel = selector("td")?;
    let mut summary = PlotSummary::default();

    for row in rows {
        let cells: Vec<ElementRef<'_>> = row.select(&td_sel).collect();
        if cells.len() < span_columns::MIN_CELLS {
            continue;
        }
        let serial = element_text(cells[0]);
        if !serial.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        let number = plot_number(cells[span_columns::PLOT_NUMBER])?;
        let land_type = element_text(cells[span_columns::LAND_TYPE]);
        let area = row_area(*row, &cells)?;
        let notes = row_notes(&cells, span_columns::NOTES);

        summary.push_row(
            PlotRecord {
                plot_number: number,
                area,
                land_type,
                notes,
            },
            None,
            None,
            None,
        );
    }

    let (owner, father, caste) = front_page_ownership(doc)?;
    for (set, value) in [
        (&mut summary.owners, owner),
        (&mut summary.fathers, father),
        (&mut summary.castes, caste),
    ] {
        if let Some(v) = value {
            if !v.is_empty() {
                set.insert(v);
            }
        }
    }

    Ok(Some(summary))
}

/// Area for an identifier-driven row, in three tiers: a dedicated hectare
/// span, then the positional hectare cell, then reconstruction from the
/// acre + decimal sub-unit cells. The first tier that yields a nonzero
/// value wins.
fn row_area(row: ElementRef<'_>, cells: &[ElementRef<'_>]) -> Result<f64> {
    let span_sel = selector("span")?;
    for span in row.select(&span_sel) {
        let is_hectare_span = span
            .value()
            .attr("id")
            .is_some_and(|id| id.contains(labels::HECTARE_SPAN_FRAGMENT));
        if is_hectare_span {
            let area = parse_area(&element_text(span));
            if area > 0.0 {
                return Ok(area);
            }
        }
    }

    if let Some(cell) = cells.get(span_columns::AREA_HECTARES) {
        let area = parse_area(&element_text(*cell));
        if area > 0.0 {
            return Ok(area);
        }
    }

    let acres = cells
        .get(span_columns::AREA_ACRES)
        .map(|c| parse_area(&element_text(*c)))
        .unwrap_or(0.0);
    let decimals = cells
        .get(span_columns::AREA_DECIMALS)
        .map(|c| parse_area(&element_text(*c)))
        .unwrap_or(0.0);
    Ok(acres * labels::HECTARES_PER_ACRE + decimals * labels::HECTARES_PER_DECIMAL)
}

/// Strip the separator punctuation the blob carries around its segments.
fn trim_segment(segment: &str) -> String {
    segment
        .trim_matches(|c: char| c == ':' || c == '-' || c == ',' || c.is_whitespace())
        .to_string()
}

/// Split the front-page ownership blob on its Odia marker tokens.
///
/// The blob reads `owner ପିତା father ଜାତି caste`, and the split is purely
/// positional: a missing marker leaves the later segments absent rather
/// than guessing at the grammar.
pub(crate) fn split_owner_blob(blob: &str) -> (Option<String>, Option<String>, Option<String>) {
    let Some(father_at) = blob.find(labels::FATHER_DELIM) else {
        let owner = trim_segment(blob);
        return (
            (!owner.is_empty()).then_some(owner),
            None,
            None,
        );
    };

    let owner = trim_segment(&blob[..father_at]);
    let rest = &blob[father_at + labels::FATHER_DELIM.len()..];

    let (father, caste) = match rest.find(labels::CASTE_DELIM) {
        Some(caste_at) => (
            trim_segment(&rest[..caste_at]),
            Some(trim_segment(&rest[caste_at + labels::CASTE_DELIM.len()..])),
        ),
        None => (trim_segment(rest), None),
    };

    (
        (!owner.is_empty()).then_some(owner),
        (!father.is_empty()).then_some(father),
        caste.filter(|c| !c.is_empty()),
    )
}

/// Ownership for identifier-driven pages: a single front-page element, not
/// a table column.
fn front_page_ownership(
    doc: &Html,
) -> Result<(Option<String>, Option<String>, Option<String>)> {
    match span_field(doc, labels::OWNER_IDS, labels::OWNER_LABEL)? {
        Some(blob) => Ok(split_owner_blob(&blob)),
        None => Ok((None, None, None)),
    }
}
