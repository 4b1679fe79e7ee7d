use anyhow::{Result, Context};
use log::{warn, info, debug};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::errors::SequenceError;
use crate::file_utils::FileManager;
use crate::marker_processor;
use crate::sequence_builder;
use crate::subtitle_processor::SubtitleTrack;
use crate::timeline_writer::TimelineDocument;

// @module: Application controller for sequence generation

/// Main application controller driving the generation pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Run the full pipeline: parse subtitles and markers, group, time
    /// the clips and write the timeline XML.
    ///
    /// The subtitle file is a hard requirement; a broken marker file
    /// degrades to an empty marker list. The output file is only
    /// written once the whole document has been produced.
    pub fn run(
        &self,
        subtitle_path: &Path,
        marker_path: &Path,
        images_dir: &Path,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        info!("Parsing subtitles from {:?}", subtitle_path);
        let track = SubtitleTrack::parse_srt_file(subtitle_path)?;
        info!("Found {} subtitle(s)", track.len());

        info!("Parsing markers from {:?}", marker_path);
        let markers = marker_processor::parse_marker_file(marker_path);
        info!("Found {} marker(s)", markers.len());

        let groups = sequence_builder::group_subtitles_by_markers(&track.entries, &markers);
        debug!("Created {} subtitle group(s)", groups.len());

        let clips = sequence_builder::compute_clips(&groups);
        if clips.is_empty() {
            return Err(SequenceError::EmptyResult.into());
        }
        info!("Computed {} image clip(s)", clips.len());

        self.check_image_directory(images_dir, clips.len());

        let document = TimelineDocument::build(
            &clips,
            self.config.fps,
            &self.config.image_extension,
            &self.config.sequence_name,
            self.config.width,
            self.config.height,
        );

        let xml = document.to_xml();
        FileManager::write_to_file(output_path, &xml)
            .with_context(|| format!("Failed to write timeline to {:?}", output_path))?;

        info!(
            "Wrote {} clip(s) to {:?} in {:.2}s",
            document.entries.len(),
            output_path,
            start_time.elapsed().as_secs_f64()
        );
        self.log_clip_summary(&document);

        Ok(output_path.to_path_buf())
    }

    /// Warn when the image directory cannot cover the computed clips.
    ///
    /// The serializer itself never checks file existence, so a count
    /// mismatch stays a warning here rather than a failure.
    fn check_image_directory(&self, images_dir: &Path, clip_count: usize) {
        if !FileManager::dir_exists(images_dir) {
            warn!("Image directory {:?} does not exist", images_dir);
            return;
        }

        match FileManager::find_numbered_images(images_dir, &self.config.image_extension) {
            Ok(indices) => {
                if indices.len() < clip_count {
                    warn!(
                        "Found {} numbered .{} image(s) in {:?} but the timeline references {}",
                        indices.len(),
                        self.config.image_extension,
                        images_dir,
                        clip_count
                    );
                }
            }
            Err(e) => warn!("Cannot inspect image directory {:?}: {}", images_dir, e),
        }
    }

    /// Log the first few entries so the user can eyeball the result.
    fn log_clip_summary(&self, document: &TimelineDocument) {
        const SUMMARY_LIMIT: usize = 5;

        for entry in document.entries.iter().take(SUMMARY_LIMIT) {
            info!(
                "  {}: frames {} - {} ({} frame(s))",
                entry.file_name, entry.start_frame, entry.end_frame, entry.duration_frames
            );
        }

        if document.entries.len() > SUMMARY_LIMIT {
            info!("  ... and {} more clip(s)", document.entries.len() - SUMMARY_LIMIT);
        }
    }
}
