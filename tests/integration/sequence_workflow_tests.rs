/*!
 * End-to-end sequence generation tests
 */

use subsequence::app_config::Config;
use subsequence::app_controller::Controller;
use subsequence::errors::SequenceError;
use subsequence::marker_processor;
use subsequence::sequence_builder::{compute_clips, group_subtitles_by_markers};
use subsequence::subtitle_processor::SubtitleTrack;
use crate::common;

/// Three subtitles, one marker at t=0, fps 24: one group of three with
/// block [0.0, 4.0], clips [0,96], [36,96], [72,96].
#[test]
fn test_pipeline_withOneMarker_shouldProduceDocumentedFrames() {
    let track = SubtitleTrack::parse_srt_string(common::sample_srt());
    let markers = marker_processor::parse_marker_xml(common::sample_marker_xml());

    let groups = group_subtitles_by_markers(&track.entries, &markers);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);

    let clips = compute_clips(&groups);
    assert_eq!(clips.len(), 3);
    assert_eq!((clips[0].start, clips[0].end), (0.0, 4.0));
    assert_eq!((clips[1].start, clips[1].end), (1.5, 4.0));
    assert_eq!((clips[2].start, clips[2].end), (3.0, 4.0));

    let document =
        subsequence::timeline_writer::TimelineDocument::build(&clips, 24, "png", "Seq", 1920, 1080);
    let frames: Vec<(u64, u64)> = document
        .entries
        .iter()
        .map(|e| (e.start_frame, e.end_frame))
        .collect();
    assert_eq!(frames, vec![(0, 96), (36, 96), (72, 96)]);
}

/// Zero markers, two subtitles: one group of two, first rule spans to
/// the max end, last rule trims to its own subtitle.
#[test]
fn test_pipeline_withNoMarkers_shouldUseSingleGroup() {
    let srt = "1\n00:00:00,000 --> 00:00:01,000\nFirst.\n\n2\n00:00:02,000 --> 00:00:03,000\nSecond.\n";
    let track = SubtitleTrack::parse_srt_string(srt);

    let groups = group_subtitles_by_markers(&track.entries, &[]);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);

    let clips = compute_clips(&groups);
    assert_eq!((clips[0].start, clips[0].end), (0.0, 3.0));
    assert_eq!((clips[1].start, clips[1].end), (2.0, 3.0));
}

/// Full controller run: files in, XML out
#[test]
fn test_controller_run_withValidInputs_shouldWriteTimelineXml() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    let subtitle_path = common::create_test_subtitle(dir, "subs.srt").unwrap();
    let marker_path = common::create_test_markers(dir, "markers.xml").unwrap();
    let images_dir = dir.join("images");
    std::fs::create_dir(&images_dir).unwrap();
    common::create_numbered_images(&images_dir, 3).unwrap();
    let output_path = dir.join("out.xml");

    let controller = Controller::with_config(Config::default()).unwrap();
    let written = controller
        .run(&subtitle_path, &marker_path, &images_dir, &output_path)
        .unwrap();

    assert_eq!(written, output_path);
    let xml = std::fs::read_to_string(&output_path).unwrap();

    let parsed = roxmltree::Document::parse(&xml).unwrap();
    let clipitems: Vec<_> = parsed
        .descendants()
        .filter(|n| n.has_tag_name("clipitem"))
        .collect();
    assert_eq!(clipitems.len(), 3);
    assert!(xml.contains("<pathurl>file://1.png</pathurl>"));
    assert!(xml.contains("<timebase>24</timebase>"));
}

/// A broken marker file degrades to the no-marker path instead of failing
#[test]
fn test_controller_run_withBrokenMarkerFile_shouldStillProduceOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    let subtitle_path = common::create_test_subtitle(dir, "subs.srt").unwrap();
    let marker_path = common::create_test_file(dir, "markers.xml", "<broken").unwrap();
    let images_dir = dir.join("images");
    std::fs::create_dir(&images_dir).unwrap();
    let output_path = dir.join("out.xml");

    let controller = Controller::with_config(Config::default()).unwrap();
    controller
        .run(&subtitle_path, &marker_path, &images_dir, &output_path)
        .unwrap();

    // All three subtitles land in the degenerate single group
    let xml = std::fs::read_to_string(&output_path).unwrap();
    let parsed = roxmltree::Document::parse(&xml).unwrap();
    let clipitems = parsed
        .descendants()
        .filter(|n| n.has_tag_name("clipitem"))
        .count();
    assert_eq!(clipitems, 3);
}

/// A missing subtitle file is fatal
#[test]
fn test_controller_run_withMissingSubtitles_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    let marker_path = common::create_test_markers(dir, "markers.xml").unwrap();
    let output_path = dir.join("out.xml");

    let controller = Controller::with_config(Config::default()).unwrap();
    let result = controller.run(
        &dir.join("missing.srt"),
        &marker_path,
        &dir.join("images"),
        &output_path,
    );

    assert!(result.is_err());
    assert!(!output_path.exists());
}

/// Zero computed clips surfaces as EmptyResult, with no file written
#[test]
fn test_controller_run_withNoSurvivingSubtitles_shouldReturnEmptyResult() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    // All subtitles start before the only marker, so every group is empty
    let subtitle_path = common::create_test_subtitle(dir, "subs.srt").unwrap();
    let marker_xml = r#"<root><marker time="100" name="too-late"/></root>"#;
    let marker_path = common::create_test_file(dir, "markers.xml", marker_xml).unwrap();
    let output_path = dir.join("out.xml");

    let controller = Controller::with_config(Config::default()).unwrap();
    let result = controller.run(&subtitle_path, &marker_path, &dir.join("images"), &output_path);

    let error = result.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<SequenceError>(),
        Some(SequenceError::EmptyResult)
    ));
    assert!(!output_path.exists());
}
