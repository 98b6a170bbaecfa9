//! Clip effects (`<filter>`) and their tunable parameters.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::BytesStart;

use crate::types::MediaType;
use crate::xml::{ToXml, end, start, start_plain, write_text_element};

/// Authoring application stamped on parameters unless overridden.
pub const DEFAULT_AUTHORING_APP: &str = "PremierePro";

/// One tunable setting of an effect.
///
/// `valuemin`, `valuemax` and `value` are written only when present; an
/// absent value is distinct from an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub parameterid: String,
    pub name: String,
    pub valuemin: Option<String>,
    pub valuemax: Option<String>,
    pub value: Option<String>,
    pub authoring_app: String,
}

impl Parameter {
    pub fn new(parameterid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            parameterid: parameterid.into(),
            name: name.into(),
            valuemin: None,
            valuemax: None,
            value: None,
            authoring_app: DEFAULT_AUTHORING_APP.to_string(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.valuemin = Some(min.into());
        self.valuemax = Some(max.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl ToXml for Parameter {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut element = BytesStart::new("parameter");
        element.push_attribute(("authoringApp", self.authoring_app.as_str()));
        start(writer, element)?;
        write_text_element(writer, "parameterid", &self.parameterid)?;
        write_text_element(writer, "name", &self.name)?;
        if let Some(min) = &self.valuemin {
            write_text_element(writer, "valuemin", min)?;
        }
        if let Some(max) = &self.valuemax {
            write_text_element(writer, "valuemax", max)?;
        }
        if let Some(value) = &self.value {
            write_text_element(writer, "value", value)?;
        }
        end(writer, "parameter")
    }
}

/// An effect applied to a clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub effectid: String,
    pub effectcategory: String,
    pub effecttype: String,
    pub mediatype: MediaType,
    pub bypass: bool,
    pub parameters: Vec<Parameter>,
}

impl Filter {
    pub fn new(
        name: impl Into<String>,
        effectid: impl Into<String>,
        effectcategory: impl Into<String>,
        effecttype: impl Into<String>,
        mediatype: MediaType,
    ) -> Self {
        Self {
            name: name.into(),
            effectid: effectid.into(),
            effectcategory: effectcategory.into(),
            effecttype: effecttype.into(),
            mediatype,
            bypass: false,
            parameters: Vec::new(),
        }
    }

    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.add_parameter(parameter);
        self
    }

    /// Premiere's "Audio Levels" effect at the given linear gain.
    pub fn audio_levels(level: &str) -> Self {
        Self::new(
            "Audio Levels",
            "audiolevels",
            "audiolevels",
            "audiolevels",
            MediaType::Audio,
        )
        .with_parameter(
            Parameter::new("level", "Level")
                .with_range("0", "3.98109")
                .with_value(level),
        )
    }

    /// Premiere's "Basic Motion" effect with a uniform scale in percent.
    ///
    /// Center and anchor point are left without a value so the editor keeps
    /// the clip centred.
    pub fn basic_motion(scale: f64) -> Self {
        Self::new("Basic Motion", "basic", "motion", "motion", MediaType::Video)
            .with_parameter(
                Parameter::new("scale", "Scale")
                    .with_range("0", "1000")
                    .with_value(format_decimal(scale)),
            )
            .with_parameter(
                Parameter::new("rotation", "Rotation")
                    .with_range("-8640", "8640")
                    .with_value("0"),
            )
            .with_parameter(Parameter::new("center", "Center"))
            .with_parameter(Parameter::new("centerOffset", "Anchor Point"))
            .with_parameter(
                Parameter::new("antiflicker", "Anti-flicker Filter")
                    .with_range("0.0", "1.0")
                    .with_value("0"),
            )
    }
}

impl ToXml for Filter {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        start_plain(writer, "filter")?;
        start_plain(writer, "effect")?;
        write_text_element(writer, "name", &self.name)?;
        write_text_element(writer, "effectid", &self.effectid)?;
        write_text_element(writer, "effectcategory", &self.effectcategory)?;
        write_text_element(writer, "effecttype", &self.effecttype)?;
        write_text_element(writer, "mediatype", self.mediatype.as_str())?;
        write_text_element(writer, "pproBypass", if self.bypass { "true" } else { "false" })?;
        for parameter in &self.parameters {
            parameter.write_xml(writer)?;
        }
        end(writer, "effect")?;
        end(writer, "filter")
    }
}

/// Format with at most four decimals and no trailing zeros.
pub(crate) fn format_decimal(value: f64) -> String {
    let text = format!("{value:.4}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(66.666_666), "66.6667");
        assert_eq!(format_decimal(140.625), "140.625");
        assert_eq!(format_decimal(100.0), "100");
        assert_eq!(format_decimal(0.0), "0");
    }

    #[test]
    fn test_audio_levels_parameter() {
        let filter = Filter::audio_levels("1");
        assert_eq!(filter.mediatype, MediaType::Audio);
        assert_eq!(filter.parameters.len(), 1);
        assert_eq!(filter.parameters[0].valuemax.as_deref(), Some("3.98109"));
    }

    #[test]
    fn test_parameters_follow_bypass() {
        let xml = Filter::basic_motion(66.666_67).to_xml_string().unwrap();
        let bypass = xml.find("<pproBypass>false</pproBypass>").unwrap();
        let scale = xml.find("<parameterid>scale</parameterid>").unwrap();
        let antiflicker = xml.find("<parameterid>antiflicker</parameterid>").unwrap();
        assert!(bypass < scale && scale < antiflicker);
        assert!(xml.contains("<value>66.6667</value>"));
        assert!(xml.starts_with("<filter>\n  <effect>\n    <name>Basic Motion</name>"));
    }
}
