use std::fmt;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};
use crate::errors::SequenceError;
use crate::time_utils;

// @module: Subtitle track ingestion and storage

// @const: SRT timing line regex
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: Blank-line block separator
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @struct: Single subtitle entry
#[derive(Debug, Clone)]
pub struct SubtitleEntry {
    // @field: Sequence number from the source file
    pub index: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Subtitle text (internal line breaks preserved)
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(index: usize, start: f64, end: f64, text: String) -> Self {
        SubtitleEntry {
            index,
            start,
            end,
            text: text.trim().to_string(),
        }
    }

    /// Start time formatted as an SRT timestamp
    pub fn format_start_time(&self) -> String {
        time_utils::format_subtitle_time(self.start)
    }

    /// End time formatted as an SRT timestamp
    pub fn format_end_time(&self) -> String {
        time_utils::format_subtitle_time(self.end)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries parsed from a single track
#[derive(Debug)]
pub struct SubtitleTrack {
    /// Source filename
    pub source_file: PathBuf,

    /// Entries in source-file order
    pub entries: Vec<SubtitleEntry>,

    /// Number of malformed blocks dropped during parsing
    pub skipped_blocks: usize,
}

impl SubtitleTrack {
    /// Load and parse a subtitle file.
    ///
    /// An unreadable file is fatal to the run; malformed blocks inside a
    /// readable file are skipped and counted instead.
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Self, SequenceError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SequenceError::SourceUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut track = Self::parse_srt_string(&content);
        track.source_file = path.to_path_buf();
        Ok(track)
    }

    /// Parse SRT content into a track.
    ///
    /// Blocks are separated by blank lines. A block needs at least three
    /// lines (index, timing, text), a numeric index line and a
    /// `start --> end` timing line with the end after the start; anything
    /// short of that is dropped and counted in `skipped_blocks`. Parsing
    /// never fails on the whole content, it produces a partial result for
    /// malformed input.
    pub fn parse_srt_string(content: &str) -> Self {
        let mut entries = Vec::new();
        let mut skipped_blocks = 0;

        for block in BLOCK_SEPARATOR_REGEX.split(content.trim()) {
            let lines: Vec<&str> = block.trim().lines().collect();
            if lines.len() < 3 {
                if !block.trim().is_empty() {
                    skipped_blocks += 1;
                }
                continue;
            }

            let index: usize = match lines[0].trim().parse() {
                Ok(num) => num,
                Err(_) => {
                    debug!("Skipping block with non-numeric index line: '{}'", lines[0]);
                    skipped_blocks += 1;
                    continue;
                }
            };

            let Some(caps) = TIMING_LINE_REGEX.captures(lines[1].trim()) else {
                debug!("Skipping block {} with malformed timing line: '{}'", index, lines[1]);
                skipped_blocks += 1;
                continue;
            };

            // The regex guarantees both timestamps are well-formed
            let (Ok(start), Ok(end)) = (
                time_utils::parse_subtitle_time(&caps[1]),
                time_utils::parse_subtitle_time(&caps[2]),
            ) else {
                skipped_blocks += 1;
                continue;
            };

            // Entries must run forward in time
            if end <= start {
                debug!(
                    "Skipping block {} whose end time does not come after its start ({} --> {})",
                    index, &caps[1], &caps[2]
                );
                skipped_blocks += 1;
                continue;
            }

            let text = lines[2..].join("\n");
            entries.push(SubtitleEntry::new(index, start, end, text));
        }

        if skipped_blocks > 0 {
            warn!("Skipped {} malformed subtitle block(s)", skipped_blocks);
        }

        SubtitleTrack {
            source_file: PathBuf::new(),
            entries,
            skipped_blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Skipped blocks: {}", self.skipped_blocks)?;
        Ok(())
    }
}
