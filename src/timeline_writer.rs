use std::fmt::Write as _;
use crate::sequence_builder::ImageClip;
use crate::time_utils::seconds_to_frames;

// @module: Frame-accurate timeline document emission (xmeml)

// @struct: One clip item on the output timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    // @field: Image file name, e.g. "7.png"
    pub file_name: String,

    // @field: Timeline position where the clip starts, in frames
    pub start_frame: u64,

    // @field: Timeline position where the clip ends, in frames
    pub end_frame: u64,

    // @field: Clip length in frames (may be 0 after flooring)
    pub duration_frames: u64,
}

/// Ordered timeline description ready for XML emission
#[derive(Debug, Clone)]
pub struct TimelineDocument {
    /// Sequence display name
    pub sequence_name: String,

    /// Frames per second (xmeml timebase)
    pub timebase: u32,

    /// Sequence width in pixels
    pub width: u32,

    /// Sequence height in pixels
    pub height: u32,

    /// Clip items in timeline order
    pub entries: Vec<TimelineEntry>,
}

impl TimelineDocument {
    /// Convert computed clips into frame-accurate timeline entries.
    ///
    /// Clip `k` references the image file named after its index with the
    /// configured extension. Frame values are floored, so a short
    /// subtitle can legitimately collapse to a zero-duration entry.
    pub fn build(
        clips: &[ImageClip],
        fps: u32,
        image_extension: &str,
        sequence_name: &str,
        width: u32,
        height: u32,
    ) -> Self {
        let entries = clips
            .iter()
            .map(|clip| {
                let start_frame = seconds_to_frames(clip.start, fps);
                let end_frame = seconds_to_frames(clip.end, fps);
                TimelineEntry {
                    file_name: format!("{}.{}", clip.image_index, image_extension),
                    start_frame,
                    end_frame,
                    duration_frames: end_frame - start_frame,
                }
            })
            .collect();

        TimelineDocument {
            sequence_name: sequence_name.to_string(),
            timebase: fps,
            width,
            height,
            entries,
        }
    }

    /// Serialize the document as Final Cut Pro / Premiere compatible
    /// xmeml. The whole document is produced in memory so a write either
    /// happens completely or not at all.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<xmeml version=\"1\">\n");
        xml.push_str("  <sequence>\n");
        let _ = writeln!(xml, "    <name>{}</name>", escape_xml(&self.sequence_name));
        xml.push_str("    <settings>\n");
        xml.push_str("      <video>\n");
        xml.push_str("        <format>\n");
        xml.push_str("          <samplecharacteristics>\n");
        self.write_rate(&mut xml, "            ");
        let _ = writeln!(xml, "            <width>{}</width>", self.width);
        let _ = writeln!(xml, "            <height>{}</height>", self.height);
        xml.push_str("          </samplecharacteristics>\n");
        xml.push_str("        </format>\n");
        xml.push_str("      </video>\n");
        xml.push_str("    </settings>\n");
        xml.push_str("    <media>\n");
        xml.push_str("      <video>\n");
        xml.push_str("        <track>\n");

        for (i, entry) in self.entries.iter().enumerate() {
            self.write_clipitem(&mut xml, entry, i + 1);
        }

        xml.push_str("        </track>\n");
        xml.push_str("      </video>\n");
        xml.push_str("    </media>\n");
        xml.push_str("  </sequence>\n");
        xml.push_str("</xmeml>\n");

        xml
    }

    fn write_rate(&self, xml: &mut String, indent: &str) {
        let _ = writeln!(xml, "{}<rate>", indent);
        let _ = writeln!(xml, "{}  <timebase>{}</timebase>", indent, self.timebase);
        let _ = writeln!(xml, "{}  <ntsc>FALSE</ntsc>", indent);
        let _ = writeln!(xml, "{}</rate>", indent);
    }

    fn write_clipitem(&self, xml: &mut String, entry: &TimelineEntry, id: usize) {
        let name = escape_xml(&entry.file_name);

        let _ = writeln!(xml, "          <clipitem id=\"clipitem-{}\">", id);
        let _ = writeln!(xml, "            <name>{}</name>", name);
        let _ = writeln!(xml, "            <start>{}</start>", entry.start_frame);
        let _ = writeln!(xml, "            <end>{}</end>", entry.end_frame);
        xml.push_str("            <in>0</in>\n");
        let _ = writeln!(xml, "            <out>{}</out>", entry.duration_frames);
        let _ = writeln!(xml, "            <file id=\"file-{}\">", id);
        let _ = writeln!(xml, "              <pathurl>file://{}</pathurl>", name);
        xml.push_str("              <media>\n");
        xml.push_str("                <video>\n");
        xml.push_str("                  <samplecharacteristics>\n");
        self.write_rate(xml, "                    ");
        let _ = writeln!(xml, "                    <width>{}</width>", self.width);
        let _ = writeln!(xml, "                    <height>{}</height>", self.height);
        xml.push_str("                  </samplecharacteristics>\n");
        xml.push_str("                </video>\n");
        xml.push_str("              </media>\n");
        xml.push_str("            </file>\n");
        xml.push_str("          </clipitem>\n");
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
