//! DOCX Writer Infrastructure
//!
//! Creates ZIP archives with correct DOCX structure.

use crate::docx::content_types::{create_default_content_types, ContentTypes};
use crate::docx::document_writer::{write_field, xml_text, DocumentWriter};
use crate::docx::error::DocxResult;
use crate::docx::model::{DocxBody, FieldCode};
use crate::docx::numbering_writer::NumberingWriter;
use crate::docx::relationships::{create_document_rels, create_root_rels, Relationships};
use crate::docx::styles_writer::StylesWriter;
use crate::docx::{content_type_values, namespaces, relationship_types};
use std::fmt::Write as _;
use std::io::{Seek, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
}

impl<W: Write + Seek> DocxWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
        }
    }

    /// Write a complete package and hand back the underlying writer
    pub fn write(mut self, body: &DocxBody) -> DocxResult<W> {
        let mut document_writer = DocumentWriter::new();

        if let Some(text) = &body.section.header_text {
            let id = self.doc_rels.add(relationship_types::HEADER, "header1.xml");
            self.content_types
                .add_override("/word/header1.xml", content_type_values::HEADER);
            self.write_file("word/header1.xml", &header_xml(text))?;
            document_writer = document_writer.with_header(id);
        }
        if let Some(text) = &body.section.footer_text {
            let id = self.doc_rels.add(relationship_types::FOOTER, "footer1.xml");
            self.content_types
                .add_override("/word/footer1.xml", content_type_values::FOOTER);
            self.write_file("word/footer1.xml", &footer_xml(text))?;
            document_writer = document_writer.with_footer(id);
        }

        if body.uses_numbering() {
            self.doc_rels
                .add(relationship_types::NUMBERING, "numbering.xml");
            self.content_types
                .add_override("/word/numbering.xml", content_type_values::NUMBERING);
            let numbering_xml = NumberingWriter::new().write(body);
            self.write_file("word/numbering.xml", &numbering_xml)?;
        }

        self.write_file("word/document.xml", &document_writer.write(body))?;
        self.write_file("word/styles.xml", &StylesWriter::new(&body.defaults).write())?;
        self.write_file("word/settings.xml", &generate_settings_xml(body.has_toc))?;

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;
        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        // [Content_Types].xml last, once every override is known
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        debug!(
            elements = body.elements.len(),
            rels = self.doc_rels.len(),
            "docx package written"
        );
        Ok(self.zip.finish()?)
    }

    /// Write a file to the ZIP archive
    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// settings.xml; `update_fields` asks the consumer to refresh fields on open
pub fn generate_settings_xml(update_fields: bool) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    let _ = write!(xml, r#"<w:settings xmlns:w="{}">"#, namespaces::W);
    if update_fields {
        xml.push_str(r#"<w:updateFields w:val="true"/>"#);
    }
    xml.push_str(r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#);
    xml.push_str("</w:settings>");
    xml
}

fn header_xml(text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="{}"><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p></w:hdr>"#,
        namespaces::W,
        xml_text(text)
    )
}

/// Footer text followed by the page number
fn footer_xml(text: &str) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:ftr xmlns:w="{}"><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t xml:space="preserve">{} </w:t></w:r>"#,
        namespaces::W,
        xml_text(text)
    );
    write_field(&mut xml, FieldCode::Page);
    xml.push_str("</w:p></w:ftr>");
    xml
}
