/*!
 * # subsequence
 *
 * A Rust library and CLI for generating edit timelines from subtitles,
 * markers and numbered still images.
 *
 * ## Features
 *
 * - Parse SRT subtitle tracks, skipping malformed blocks
 * - Extract named time markers from Premiere/FCP-style XML exports
 * - Group subtitles into marker-delimited blocks
 * - Derive a start/end window for one image per subtitle using
 *   positional timing rules (first image spans its block, the last one
 *   is trimmed to its own subtitle)
 * - Emit a frame-accurate xmeml timeline consumable by non-linear
 *   editors
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `time_utils`: Timestamp parsing and frame conversion
 * - `subtitle_processor`: SRT ingestion and storage
 * - `marker_processor`: Marker XML ingestion and storage
 * - `sequence_builder`: Grouping and clip timing rules
 * - `timeline_writer`: xmeml timeline emission
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod marker_processor;
pub mod sequence_builder;
pub mod subtitle_processor;
pub mod time_utils;
pub mod timeline_writer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, SequenceError};
pub use marker_processor::MarkerEntry;
pub use sequence_builder::{ClipPosition, ImageClip, SubtitleGroup};
pub use subtitle_processor::{SubtitleEntry, SubtitleTrack};
pub use timeline_writer::{TimelineDocument, TimelineEntry};
