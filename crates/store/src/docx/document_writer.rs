//! Document.xml writer
//!
//! Serializes a [`DocxBody`] into WordprocessingML.

use crate::docx::model::*;
use crate::docx::namespaces;
use quick_xml::escape::escape;
use std::fmt::Write;

/// Writer for document.xml
#[derive(Debug, Default)]
pub struct DocumentWriter {
    header_rel: Option<String>,
    footer_rel: Option<String>,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a header part from the section properties
    pub fn with_header(mut self, rel_id: impl Into<String>) -> Self {
        self.header_rel = Some(rel_id.into());
        self
    }

    /// Reference a footer part from the section properties
    pub fn with_footer(mut self, rel_id: impl Into<String>) -> Self {
        self.footer_rel = Some(rel_id.into());
        self
    }

    /// Generate document.xml content
    pub fn write(&self, body: &DocxBody) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        );
        xml.push_str("<w:body>");

        for element in &body.elements {
            match element {
                BodyElement::Paragraph(paragraph) => write_paragraph(&mut xml, paragraph),
                BodyElement::Table(table) => write_table(&mut xml, table, &body.section),
            }
        }

        self.write_section(&mut xml, &body.section);
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn write_section(&self, xml: &mut String, section: &SectionProperties) {
        xml.push_str("<w:sectPr>");
        if let Some(id) = &self.header_rel {
            let _ = write!(xml, r#"<w:headerReference w:type="default" r:id="{id}"/>"#);
        }
        if let Some(id) = &self.footer_rel {
            let _ = write!(xml, r#"<w:footerReference w:type="default" r:id="{id}"/>"#);
        }
        let _ = write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}""#,
            section.page_width, section.page_height
        );
        if section.landscape {
            xml.push_str(r#" w:orient="landscape""#);
        }
        xml.push_str("/>");
        let m = section.margin;
        let _ = write!(
            xml,
            r#"<w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/>"#
        );
        xml.push_str("</w:sectPr>");
    }
}

/// Write a paragraph element
pub(crate) fn write_paragraph(xml: &mut String, paragraph: &DocxParagraph) {
    xml.push_str("<w:p>");
    write_paragraph_properties(xml, paragraph);
    for run in &paragraph.runs {
        write_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn write_paragraph_properties(xml: &mut String, paragraph: &DocxParagraph) {
    if paragraph.style.is_none()
        && paragraph.num_id.is_none()
        && paragraph.spacing.is_none()
        && paragraph.justification.is_none()
    {
        return;
    }

    xml.push_str("<w:pPr>");
    if let Some(style) = paragraph.style {
        let _ = write!(xml, r#"<w:pStyle w:val="{}"/>"#, style.style_id());
    }
    if let Some(num_id) = paragraph.num_id {
        let _ = write!(
            xml,
            r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{num_id}"/></w:numPr>"#
        );
    }
    if let Some(spacing) = paragraph.spacing {
        let _ = write!(
            xml,
            r#"<w:spacing w:before="{}" w:after="{}""#,
            spacing.before, spacing.after
        );
        if let Some(line) = spacing.line {
            let _ = write!(xml, r#" w:line="{line}" w:lineRule="auto""#);
        }
        xml.push_str("/>");
    }
    if let Some(jc) = paragraph.justification {
        let _ = write!(xml, r#"<w:jc w:val="{}"/>"#, jc.as_str());
    }
    xml.push_str("</w:pPr>");
}

fn write_run_properties(xml: &mut String, props: &RunProperties) {
    if props.is_empty() {
        return;
    }
    xml.push_str("<w:rPr>");
    if let Some(font) = &props.font {
        let font = xml_text(font);
        let _ = write!(
            xml,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
        );
    }
    if props.bold {
        xml.push_str("<w:b/>");
    }
    if props.italic {
        xml.push_str("<w:i/>");
    }
    if props.strike {
        xml.push_str("<w:strike/>");
    }
    if let Some(color) = &props.color {
        let _ = write!(xml, r#"<w:color w:val="{}"/>"#, xml_text(color));
    }
    if let Some(size) = props.size {
        let _ = write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#);
    }
    if props.underline {
        xml.push_str(r#"<w:u w:val="single"/>"#);
    }
    xml.push_str("</w:rPr>");
}

/// Whether XML 1.0 allows `c` in character data
fn is_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// Escape markup and drop characters XML 1.0 forbids
pub(crate) fn xml_text(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| is_xml_char(*c)).collect();
    escape(cleaned.as_str()).into_owned()
}

/// Text with embedded newlines becomes `w:t` segments separated by `w:br`;
/// tabs become `w:tab`
fn write_text(xml: &mut String, text: &str) {
    let normalized = text.replace("\r\n", "\n");
    for (i, line) in normalized.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                xml.push_str("<w:tab/>");
            }
            let segment = xml_text(segment);
            if !segment.is_empty() {
                let _ = write!(xml, r#"<w:t xml:space="preserve">{segment}</w:t>"#);
            }
        }
    }
}

fn write_run(xml: &mut String, run: &RunElement) {
    match run {
        RunElement::Text { text, props } => {
            xml.push_str("<w:r>");
            write_run_properties(xml, props);
            write_text(xml, text);
            xml.push_str("</w:r>");
        }
        RunElement::PageBreak => xml.push_str(r#"<w:r><w:br w:type="page"/></w:r>"#),
        RunElement::Field(field) => write_field(xml, *field),
    }
}

/// Complex field: begin, instruction, separate, cached result, end
pub(crate) fn write_field(xml: &mut String, field: FieldCode) {
    xml.push_str(r#"<w:r><w:fldChar w:fldCharType="begin" w:dirty="true"/></w:r>"#);
    let _ = write!(
        xml,
        r#"<w:r><w:instrText xml:space="preserve"> {} </w:instrText></w:r>"#,
        escape(field.instruction())
    );
    xml.push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
    let _ = write!(xml, "<w:r><w:t>{}</w:t></w:r>", escape(field.placeholder()));
    xml.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
}

fn write_table(xml: &mut String, table: &DocxTable, section: &SectionProperties) {
    let cols = table.col_count().max(1) as u32;
    let text_width = section.page_width.saturating_sub(2 * section.margin);
    let col_width = text_width / cols;
    let cell_pct = 5000 / cols;

    xml.push_str("<w:tbl><w:tblPr>");
    xml.push_str(r#"<w:tblW w:w="5000" w:type="pct"/>"#);
    xml.push_str("<w:tblBorders>");
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        let _ = write!(
            xml,
            r#"<w:{edge} w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#
        );
    }
    xml.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
    for _ in 0..cols {
        let _ = write!(xml, r#"<w:gridCol w:w="{col_width}"/>"#);
    }
    xml.push_str("</w:tblGrid>");

    for row in &table.rows {
        xml.push_str("<w:tr>");
        for cell in row {
            let _ = write!(
                xml,
                r#"<w:tc><w:tcPr><w:tcW w:w="{cell_pct}" w:type="pct"/></w:tcPr>"#
            );
            let paragraph = DocxParagraph::new()
                .with_run(RunElement::styled(cell.clone(), table.props.clone()));
            write_paragraph(xml, &paragraph);
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> SectionProperties {
        SectionProperties {
            page_width: 12240,
            page_height: 15840,
            landscape: false,
            margin: 1440,
            header_text: None,
            footer_text: None,
        }
    }

    fn body(elements: Vec<BodyElement>) -> DocxBody {
        DocxBody {
            elements,
            section: section(),
            defaults: DocDefaults {
                font: "Arial".into(),
                line: 240,
            },
            numbered_lists: Vec::new(),
            has_bullets: false,
            has_toc: false,
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = DocumentWriter::new().write(&body(vec![BodyElement::Paragraph(
            DocxParagraph::new().with_run(RunElement::text("a < b & c")),
        )]));
        assert!(xml.contains(r#"<w:t xml:space="preserve">a &lt; b &amp; c</w:t>"#));
    }

    #[test]
    fn test_newlines_become_breaks() {
        let mut xml = String::new();
        write_text(&mut xml, "one\ntwo");
        assert_eq!(
            xml,
            r#"<w:t xml:space="preserve">one</w:t><w:br/><w:t xml:space="preserve">two</w:t>"#
        );
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let mut xml = String::new();
        write_text(&mut xml, "page\u{0C}feed\u{01}\u{1F}");
        assert_eq!(xml, r#"<w:t xml:space="preserve">pagefeed</w:t>"#);

        let mut xml = String::new();
        write_text(&mut xml, "\u{0B}");
        assert!(xml.is_empty());
    }

    #[test]
    fn test_tabs_become_tab_elements() {
        let mut xml = String::new();
        write_text(&mut xml, "Name\tValue\t");
        assert_eq!(
            xml,
            r#"<w:t xml:space="preserve">Name</w:t><w:tab/><w:t xml:space="preserve">Value</w:t><w:tab/>"#
        );
    }

    #[test]
    fn test_paragraph_properties_order() {
        let mut xml = String::new();
        write_paragraph(
            &mut xml,
            &DocxParagraph::new()
                .with_style(ParagraphStyle::Heading(1))
                .with_numbering(2)
                .with_justification(Justification::Center),
        );
        assert_eq!(
            xml,
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="2"/></w:numPr><w:jc w:val="center"/></w:pPr></w:p>"#
        );
    }

    #[test]
    fn test_run_formatting() {
        let props = RunProperties {
            bold: true,
            underline: true,
            size: Some(24),
            ..Default::default()
        };
        let mut xml = String::new();
        write_run(&mut xml, &RunElement::styled("x", props));
        assert!(xml.contains(
            r#"<w:rPr><w:b/><w:sz w:val="24"/><w:szCs w:val="24"/><w:u w:val="single"/></w:rPr>"#
        ));
    }

    #[test]
    fn test_page_break_run() {
        let mut xml = String::new();
        write_paragraph(&mut xml, &DocxParagraph::page_break());
        assert_eq!(xml, r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
    }

    #[test]
    fn test_section_and_references() {
        let xml = DocumentWriter::new()
            .with_header("rId7")
            .write(&body(Vec::new()));
        assert!(xml.contains(r#"<w:headerReference w:type="default" r:id="rId7"/>"#));
        assert!(!xml.contains("footerReference"));
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="1440""#));
    }

    #[test]
    fn test_table_grid() {
        let table = DocxTable {
            rows: vec![vec!["a".into(), "b".into()]],
            props: RunProperties::default(),
        };
        let xml = DocumentWriter::new().write(&body(vec![BodyElement::Table(table)]));
        assert_eq!(xml.matches(r#"<w:gridCol w:w="4680"/>"#).count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 2);
    }

    #[test]
    fn test_toc_field() {
        let mut xml = String::new();
        write_field(&mut xml, FieldCode::TableOfContents);
        assert!(xml.contains(r#"TOC \o &quot;1-3&quot; \h \z \u"#));
        assert!(xml.contains(r#"w:fldCharType="end""#));
    }
}
