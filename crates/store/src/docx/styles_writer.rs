//! Styles.xml writer
//!
//! Emits the fixed style sheet every exported document uses, with the
//! document font and line spacing as defaults.

use crate::docx::document_writer::xml_text;
use crate::docx::model::DocDefaults;
use crate::docx::namespaces;
use std::fmt::Write;

/// Heading sizes in half-points, level 1 first
const HEADING_SIZES: [u32; 6] = [32, 28, 26, 24, 22, 22];

/// Writer for styles.xml
pub struct StylesWriter<'a> {
    defaults: &'a DocDefaults,
}

impl<'a> StylesWriter<'a> {
    pub fn new(defaults: &'a DocDefaults) -> Self {
        Self { defaults }
    }

    /// Generate styles.xml content
    pub fn write(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(xml, r#"<w:styles xmlns:w="{}">"#, namespaces::W);

        self.write_doc_defaults(&mut xml);

        xml.push_str(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
        );
        write_paragraph_style(
            &mut xml,
            "Title",
            "Title",
            r#"<w:spacing w:after="240"/><w:jc w:val="center"/>"#,
            r#"<w:b/><w:sz w:val="48"/><w:szCs w:val="48"/>"#,
        );
        for (i, size) in HEADING_SIZES.iter().enumerate() {
            let level = i + 1;
            write_paragraph_style(
                &mut xml,
                &format!("Heading{level}"),
                &format!("heading {level}"),
                &format!(
                    r#"<w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{i}"/>"#
                ),
                &format!(r#"<w:b/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#),
            );
        }
        write_paragraph_style(
            &mut xml,
            "Quote",
            "Quote",
            r#"<w:spacing w:before="200" w:after="200"/><w:ind w:left="864" w:right="864"/><w:jc w:val="center"/>"#,
            "<w:i/>",
        );
        write_paragraph_style(
            &mut xml,
            "Caption",
            "caption",
            r#"<w:jc w:val="center"/>"#,
            r#"<w:i/><w:color w:val="666666"/><w:sz w:val="18"/><w:szCs w:val="18"/>"#,
        );
        write_paragraph_style(
            &mut xml,
            "TOCHeading",
            "TOC Heading",
            r#"<w:keepNext/><w:spacing w:before="240" w:after="120"/>"#,
            r#"<w:b/><w:sz w:val="32"/><w:szCs w:val="32"/>"#,
        );

        xml.push_str("</w:styles>");
        xml
    }

    fn write_doc_defaults(&self, xml: &mut String) {
        let font = xml_text(&self.defaults.font);
        xml.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
        let _ = write!(
            xml,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
        );
        xml.push_str(r#"<w:sz w:val="24"/><w:szCs w:val="24"/>"#);
        xml.push_str("</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>");
        let _ = write!(
            xml,
            r#"<w:spacing w:after="160" w:line="{}" w:lineRule="auto"/>"#,
            self.defaults.line
        );
        xml.push_str("</w:pPr></w:pPrDefault></w:docDefaults>");
    }
}

fn write_paragraph_style(xml: &mut String, id: &str, name: &str, ppr: &str, rpr: &str) {
    let _ = write!(
        xml,
        r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="{name}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr>{ppr}</w:pPr><w:rPr>{rpr}</w:rPr></w:style>"#
    );
}
