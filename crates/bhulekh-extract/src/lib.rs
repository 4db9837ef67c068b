//! Deterministic HTML extraction engine for Bhulekh RoR pages.
//!
//! Parses raw Bhulekh record-of-rights markup into a normalized
//! [`ExtractedRecord`] plus a completeness-based [`ConfidenceLevel`],
//! without any language model in the loop, so repeated runs over the same
//! page are byte-identical.
//!
//! The pipeline is a single synchronous pass: detect which of the two page
//! layouts applies, locate the location fields, walk the plot table,
//! harvest auxiliary metadata, then score completeness. Malformed or
//! incomplete input degrades to sentinel values and a lower confidence; the
//! entry points never fail on content.
//!
//! ```no_run
//! use bhulekh_extract::RorExtractor;
//!
//! let html = std::fs::read_to_string("ror_page.html").unwrap();
//! let extractor = RorExtractor::new();
//! let (record, confidence) = extractor.extract(&html);
//! println!("{} ({confidence})", record.district);
//! ```

pub mod labels;
pub mod layout;
pub mod locator;
pub mod location;
pub mod metadata;
pub mod plots;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bhulekh_core::{
    remap_record, ConfidenceLevel, ExtractedRecord, Result,
};
use scraper::Html;
use serde_json::{Map, Value};

pub use crate::layout::Layout;

/// Engine configuration, injected rather than read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorOptions {
    /// Dump the raw input HTML before parsing, for offline inspection.
    pub debug: bool,
    /// Directory for debug dumps; defaults to `debug_html` when unset.
    pub debug_dir: Option<PathBuf>,
}

impl ExtractorOptions {
    #[inline]
    #[must_use]
    pub fn with_debug(mut self, enable: bool) -> Self {
        self.debug = enable;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_debug_dir(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }
}

/// The extraction engine. Stateless between calls; safe to share across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct RorExtractor {
    options: ExtractorOptions,
}

impl RorExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: ExtractorOptions) -> Self {
        Self { options }
    }

    /// Extract a record and its confidence from raw markup.
    ///
    /// Never fails on content: a document in neither known layout comes
    /// back fully sentineled with `low` confidence, and a structural
    /// failure inside any stage yields the `"Extraction failed"` record
    /// instead of an error.
    #[must_use]
    pub fn extract(&self, html: &str) -> (ExtractedRecord, ConfidenceLevel) {
        if self.options.debug {
            self.dump_debug_html(html);
        }

        let doc = Html::parse_document(html);
        match extract_record(&doc) {
            Ok(record) => {
                let confidence = ConfidenceLevel::classify(&record);
                (record, confidence)
            }
            Err(e) => {
                log::error!("Error in HTML extraction: {e}");
                (ExtractedRecord::extraction_failed(), ConfidenceLevel::Low)
            }
        }
    }

    /// Extract and remap onto Odia keys; the shape handed to downstream
    /// consumers (translation, storage).
    #[must_use]
    pub fn extract_remapped(&self, html: &str) -> (Map<String, Value>, ConfidenceLevel) {
        let (record, confidence) = self.extract(html);
        (remap_record(&record), confidence)
    }

    /// Best-effort debug dump of the raw input. Failures are logged and
    /// never affect extraction.
    fn dump_debug_html(&self, html: &str) {
        let dir = self
            .options
            .debug_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("debug_html"));
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = dir.join(format!("debug_{stamp}.html"));

        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| std::fs::write(&path, html)) {
            log::warn!("Failed to write debug HTML to {}: {e}", path.display());
        } else {
            log::debug!("Wrote debug HTML to {}", path.display());
        }
    }
}

/// Run the full pipeline over a parsed document.
fn extract_record(doc: &Html) -> Result<ExtractedRecord> {
    let layout = Layout::detect(doc)?;
    let location = location::extract_location(doc, layout)?;
    let plot_summary = plots::extract_plots(doc)?;

    let plots_for_notes = plot_summary
        .as_ref()
        .map(|s| s.plots.as_slice())
        .unwrap_or_default();
    let special_comments = metadata::extract_special_comments(doc, plots_for_notes)?;

    Ok(ExtractedRecord::from_parts(
        location,
        plot_summary,
        special_comments,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_dump_writes_the_raw_input() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = RorExtractor::with_options(
            ExtractorOptions::default()
                .with_debug(true)
                .with_debug_dir(dir.path().to_path_buf()),
        );
        let (_, _) = extractor.extract("<html><body>probe</body></html>");

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains("probe"));
    }

    #[test]
    fn debug_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = RorExtractor::with_options(
            ExtractorOptions::default().with_debug_dir(dir.path().to_path_buf()),
        );
        let (_, _) = extractor.extract("<html></html>");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
