//! [Content_Types].xml generation

use crate::docx::content_type_values;
use quick_xml::escape::escape;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Content types of the parts in a package, kept sorted for stable output
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by part name
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", content_type_values::RELATIONSHIPS);
        ct.add_default("xml", "application/xml");
        ct
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    /// Add an override for a specific part
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{part_name}")
        };
        self.overrides.insert(normalized, content_type.to_string());
    }

    /// Generate XML content for [Content_Types].xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        for (ext, ct) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape(ext.as_str()),
                escape(ct.as_str())
            );
        }
        for (part, ct) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape(part.as_str()),
                escape(ct.as_str())
            );
        }
        xml.push_str("</Types>");
        xml
    }
}

/// Content types every package starts with
pub fn create_default_content_types() -> ContentTypes {
    let mut ct = ContentTypes::new();
    ct.add_override("/word/document.xml", content_type_values::DOCUMENT);
    ct.add_override("/word/styles.xml", content_type_values::STYLES);
    ct.add_override("/word/settings.xml", content_type_values::SETTINGS);
    ct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parts() {
        let xml = create_default_content_types().to_xml();
        assert!(xml.contains(&format!(
            r#"<Override PartName="/word/document.xml" ContentType="{}"/>"#,
            content_type_values::DOCUMENT
        )));
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"PartName="/word/styles.xml""#));
    }

    #[test]
    fn test_override_path_is_normalized() {
        let mut ct = ContentTypes::new();
        ct.add_override("word/numbering.xml", content_type_values::NUMBERING);
        assert!(ct.to_xml().contains(r#"PartName="/word/numbering.xml""#));
    }
}
