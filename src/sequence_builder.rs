use crate::marker_processor::MarkerEntry;
use crate::subtitle_processor::SubtitleEntry;

// @module: Marker-delimited grouping and clip timing rules

/// An ordered run of subtitles falling between two consecutive markers
pub type SubtitleGroup = Vec<SubtitleEntry>;

// @struct: Computed placement for one still image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageClip {
    // @field: 1-based running image number, shared across all groups
    pub image_index: usize,

    // @field: Clip start in seconds
    pub start: f64,

    // @field: Clip end in seconds
    pub end: f64,
}

/// Position of a subtitle within its group, which decides the timing
/// rule applied to its image.
///
/// `First` wins over `Last` when a group has a single member: a lone
/// subtitle in a block gets the block-spanning rule, not the trimmed
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPosition {
    First,
    Middle,
    Last,
}

impl ClipPosition {
    /// Classify position `i` in a group of `len` members.
    pub fn classify(i: usize, len: usize) -> Self {
        if i == 0 {
            ClipPosition::First
        } else if i == len - 1 {
            ClipPosition::Last
        } else {
            ClipPosition::Middle
        }
    }
}

/// Partition subtitles into marker-bounded groups.
///
/// Each marker opens a half-open interval `[markers[i].time,
/// markers[i+1].time)`, unbounded above for the last marker. A subtitle
/// lands in the interval containing its start time. Groups that end up
/// empty are omitted, so the output length can be smaller than the
/// marker count.
///
/// With no markers at all the entire track becomes a single group.
/// With markers present, subtitles starting before the first marker are
/// not part of any group; the upstream tool behaves the same way, so
/// the omission is kept as-is.
pub fn group_subtitles_by_markers(
    subtitles: &[SubtitleEntry],
    markers: &[MarkerEntry],
) -> Vec<SubtitleGroup> {
    if markers.is_empty() {
        if subtitles.is_empty() {
            return Vec::new();
        }
        return vec![subtitles.to_vec()];
    }

    let mut groups = Vec::new();

    for (i, marker) in markers.iter().enumerate() {
        let lower = marker.time;
        let upper = markers.get(i + 1).map(|m| m.time).unwrap_or(f64::INFINITY);

        let group: SubtitleGroup = subtitles
            .iter()
            .filter(|sub| sub.start >= lower && sub.start < upper)
            .cloned()
            .collect();

        if !group.is_empty() {
            groups.push(group);
        }
    }

    groups
}

/// Derive one image clip per subtitle, applying the positional rules.
///
/// Within a group with start `block_start` (the first member's start)
/// and end `block_end` (the latest member end):
///   - the first image holds for the whole block,
///   - middle images run from their own subtitle to the block end,
///   - the last image is trimmed to exactly its own subtitle.
///
/// The image index is a running counter starting at 1 that is never
/// reset between groups, so clip `k` always maps to image file `k`.
pub fn compute_clips(groups: &[SubtitleGroup]) -> Vec<ImageClip> {
    let mut clips = Vec::new();
    let mut image_index = 1;

    for group in groups {
        if group.is_empty() {
            continue;
        }

        let block_start = group[0].start;
        let block_end = group
            .iter()
            .map(|sub| sub.end)
            .fold(f64::NEG_INFINITY, f64::max);

        for (i, subtitle) in group.iter().enumerate() {
            let (start, end) = match ClipPosition::classify(i, group.len()) {
                ClipPosition::First => (block_start, block_end),
                ClipPosition::Middle => (subtitle.start, block_end),
                ClipPosition::Last => (subtitle.start, subtitle.end),
            };

            clips.push(ImageClip {
                image_index,
                start,
                end,
            });
            image_index += 1;
        }
    }

    clips
}
