//! Word package detection.
//!
//! A `.docx` is only treated as a Word document when `[Content_Types].xml`
//! declares its main part with one of the WordprocessingML main content types.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Content types accepted for the main document part.
const WORD_MAIN_CONTENT_TYPES: [&str; 4] = [
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml",
    "application/vnd.ms-word.document.macroEnabled.main+xml",
    "application/vnd.ms-word.template.macroEnabledTemplate.main+xml",
];

/// Content type declarations from `[Content_Types].xml`.
#[derive(Debug, Default)]
struct ContentTypes {
    /// (extension, content type)
    defaults: Vec<(String, String)>,
    /// (part name without leading '/', content type)
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    fn parse(xml: &str) -> Result<Self> {
        let mut types = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(ref e))
                | Ok(quick_xml::events::Event::Start(ref e)) => {
                    let mut key = String::new();
                    let mut content_type = String::new();
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => key = value,
                            b"ContentType" => content_type = value,
                            _ => {}
                        }
                    }
                    match e.local_name().as_ref() {
                        b"Default" => types.defaults.push((key.to_lowercase(), content_type)),
                        b"Override" => types
                            .overrides
                            .push((key.trim_start_matches('/').to_string(), content_type)),
                        _ => {}
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(types)
    }

    /// Content type of a part: its override, else the default for its extension.
    fn content_type_of(&self, part: &str) -> Option<&str> {
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(part))
        {
            return Some(ct);
        }

        let ext = part.rsplit_once('.')?.1.to_lowercase();
        self.defaults
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, ct)| ct.as_str())
    }
}

/// Verify that `main_part` is declared as a Word main document.
///
/// # Errors
///
/// - [`Error::MissingComponent`] if the package has no `[Content_Types].xml`
/// - [`Error::NotWordDocument`] if the main part has another content type
pub fn ensure_word_document(container: &OoxmlContainer, main_part: &str) -> Result<()> {
    let xml = container.read_xml(CONTENT_TYPES_PART)?;
    let types = ContentTypes::parse(&xml)?;

    match types.content_type_of(main_part) {
        Some(ct) if WORD_MAIN_CONTENT_TYPES.contains(&ct) => Ok(()),
        Some(ct) => Err(Error::NotWordDocument(format!(
            "{} has content type {}",
            main_part, ct
        ))),
        None => Err(Error::NotWordDocument(format!(
            "{} has no declared content type",
            main_part
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

    #[test]
    fn test_content_type_lookup() {
        let types = ContentTypes::parse(CONTENT_TYPES).unwrap();
        assert_eq!(
            types.content_type_of("word/document.xml"),
            Some(WORD_MAIN_CONTENT_TYPES[0])
        );
        assert_eq!(types.content_type_of("word/styles.xml"), Some("application/xml"));
        assert_eq!(types.content_type_of("word/media/image1.png"), Some("image/png"));
        assert_eq!(types.content_type_of("word/media/clip.wmv"), None);
    }

    #[test]
    fn test_spreadsheet_main_part_rejected() {
        let types = ContentTypes::parse(CONTENT_TYPES).unwrap();
        let ct = types.content_type_of("xl/workbook.xml").unwrap();
        assert!(!WORD_MAIN_CONTENT_TYPES.contains(&ct));
    }
}
