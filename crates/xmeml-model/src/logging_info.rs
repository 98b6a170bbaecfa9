use std::io::{self, Write};

use quick_xml::Writer;

use crate::xml::{ToXml, end, start_plain, write_text_element};

/// Field names of a `<logginginfo>` block, in schema order.
pub(crate) const LOGGING_FIELDS: [&str; 7] = [
    "description",
    "scene",
    "shottake",
    "lognote",
    "good",
    "originalvideofilename",
    "originalaudiofilename",
];

/// Free-text logging metadata attached to a sequence. All fields default to
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingInfo {
    pub description: String,
    pub scene: String,
    pub shottake: String,
    pub lognote: String,
    pub good: String,
    pub original_video_filename: String,
    pub original_audio_filename: String,
}

impl LoggingInfo {
    fn values(&self) -> [&str; 7] {
        [
            self.description.as_str(),
            self.scene.as_str(),
            self.shottake.as_str(),
            self.lognote.as_str(),
            self.good.as_str(),
            self.original_video_filename.as_str(),
            self.original_audio_filename.as_str(),
        ]
    }
}

impl ToXml for LoggingInfo {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "logginginfo")?;
        for (name, value) in LOGGING_FIELDS.iter().zip(self.values()) {
            write_text_element(writer, name, value)?;
        }
        end(writer, "logginginfo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_emits_seven_blank_fields() {
        let xml = LoggingInfo::default().to_xml_string().unwrap();
        for field in LOGGING_FIELDS {
            assert!(xml.contains(&format!("<{field}></{field}>")), "{field}");
        }
    }

    #[test]
    fn test_values_keep_field_order() {
        let info = LoggingInfo {
            scene: "12".to_string(),
            good: "TRUE".to_string(),
            ..LoggingInfo::default()
        };
        let xml = info.to_xml_string().unwrap();
        let scene = xml.find("<scene>12</scene>").unwrap();
        let good = xml.find("<good>TRUE</good>").unwrap();
        assert!(scene < good);
    }
}
