use std::cmp::Ordering;
use std::path::Path;
use log::{warn, debug};
use crate::time_utils;

// @module: Marker XML ingestion and storage

// @const: Time attribute candidates, in priority order
const TIME_ATTRIBUTES: [&str; 4] = ["time", "start", "timecode", "in"];

// @const: Name attribute candidates, in priority order
const NAME_ATTRIBUTES: [&str; 3] = ["name", "comment", "label"];

// @struct: Single named time marker
#[derive(Debug, Clone)]
pub struct MarkerEntry {
    // @field: Marker time in seconds
    pub time: f64,

    // @field: Marker name (may be empty)
    pub name: String,
}

impl MarkerEntry {
    pub fn new(time: f64, name: String) -> Self {
        MarkerEntry { time, name }
    }
}

/// Load markers from an XML document on disk.
///
/// A missing or unreadable file degrades to an empty marker list with a
/// warning; the pipeline tolerates running with zero markers.
pub fn parse_marker_file<P: AsRef<Path>>(path: P) -> Vec<MarkerEntry> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => parse_marker_xml(&content),
        Err(e) => {
            warn!("Cannot read marker file {:?}: {}. Continuing without markers.", path, e);
            Vec::new()
        }
    }
}

/// Extract markers from an XML document string.
///
/// Editing software nests markers at varying depths depending on the
/// exporting version, so the whole tree is scanned: every element whose
/// tag name contains "marker" (case-insensitive) contributes one
/// candidate. Time is read from the first present attribute among
/// `time`, `start`, `timecode` and `in`, parsed leniently; an element
/// with no parsable time is dropped. Name falls back from the `name`,
/// `comment` and `label` attributes to the element's inline text.
///
/// Malformed XML yields an empty list plus a warning rather than an
/// error. The result is stably sorted ascending by time.
pub fn parse_marker_xml(content: &str) -> Vec<MarkerEntry> {
    let doc = match roxmltree::Document::parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Cannot parse marker XML: {}. Continuing without markers.", e);
            return Vec::new();
        }
    };

    let mut markers = Vec::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        if !node.tag_name().name().to_lowercase().contains("marker") {
            continue;
        }

        let Some(time) = TIME_ATTRIBUTES
            .iter()
            .find_map(|attr| node.attribute(*attr))
            .and_then(time_utils::parse_marker_time)
        else {
            debug!("Dropping marker element without a usable time attribute");
            continue;
        };

        let name = NAME_ATTRIBUTES
            .iter()
            .find_map(|attr| node.attribute(*attr))
            .map(str::to_string)
            .or_else(|| {
                node.text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        markers.push(MarkerEntry::new(time, name));
    }

    sort_markers(&mut markers);
    markers
}

/// Sort markers ascending by time, keeping encounter order for ties.
pub fn sort_markers(markers: &mut [MarkerEntry]) {
    // Vec::sort_by is stable, so equal-time markers keep their relative order
    markers.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));
}
