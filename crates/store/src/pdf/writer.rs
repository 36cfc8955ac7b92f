//! PDF Writer
//!
//! File structure (header, body, xref, trailer) with object offsets tracked
//! as the bytes are written.

use super::document::{create_catalog, create_pages, DocumentInfo, PDF_VERSION};
use super::fonts::create_standard_font_dict;
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::renderer::{PageRenderInfo, PdfRenderer};
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// (object number, byte offset)
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Reserve the next object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{PDF_VERSION}\n"))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.offsets.push((obj_num, self.position));
        self.write_str(&format!("{obj_num} 0 obj\n"))?;

        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str("\nendobj\n")
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(
        &mut self,
        catalog_ref: u32,
        info_ref: Option<u32>,
    ) -> Result<()> {
        let xref_offset = self.position;

        let mut entries = self.offsets.clone();
        entries.sort_by_key(|(num, _)| *num);

        self.write_str("xref\n")?;
        self.write_str(&format!("0 {}\n", self.next_obj_num))?;
        self.write_str("0000000000 65535 f \n")?;

        let mut expected_num = 1u32;
        for (obj_num, offset) in entries {
            // Allocated but unwritten numbers are listed as free
            while expected_num < obj_num {
                self.write_str("0000000000 65535 f \n")?;
                expected_num += 1;
            }
            self.write_str(&format!("{offset:010} 00000 n \n"))?;
            expected_num = obj_num + 1;
        }
        while expected_num < self.next_obj_num {
            self.write_str("0000000000 65535 f \n")?;
            expected_num += 1;
        }

        self.write_str("trailer\n")?;
        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(self.next_obj_num as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;

        self.write_str(&format!("\nstartxref\n{xref_offset}\n%%EOF\n"))
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// Writes laid-out pages as a complete PDF file
pub struct PdfDocumentWriter {
    info: DocumentInfo,
    compress: bool,
}

impl PdfDocumentWriter {
    pub fn new(info: DocumentInfo, compress: bool) -> Self {
        Self { info, compress }
    }

    /// Write a complete PDF document to a writer
    pub fn write<W: Write>(&self, pages: &[PageRenderInfo], writer: W) -> Result<W> {
        if pages.is_empty() {
            return Err(PdfError::InvalidDocument("No pages to export".to_string()));
        }

        let mut pdf = PdfWriter::new(writer);
        pdf.set_compression(self.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        // Rendering first tells us which fonts the pages need
        let mut renderer = PdfRenderer::new();
        let contents: Vec<_> = pages
            .iter()
            .map(|page| (page, renderer.render_page(page)))
            .collect();

        let font_refs: Vec<_> = renderer
            .font_manager()
            .fonts()
            .map(|(font, name)| (font, name.to_string(), pdf.allocate_object()))
            .collect();

        let page_refs: Vec<(u32, u32)> = contents
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        let kids: Vec<u32> = page_refs.iter().map(|(page, _)| *page).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;
        pdf.write_object(info_ref, &self.info.to_dictionary().into())?;

        for (font, _, font_ref) in &font_refs {
            pdf.write_object(*font_ref, &create_standard_font_dict(*font).into())?;
        }

        let mut font_resources = PdfDictionary::new();
        for (_, name, font_ref) in &font_refs {
            font_resources.insert(name.clone(), PdfObject::Reference(*font_ref));
        }

        for ((page_info, content), (page_ref, content_ref)) in
            contents.into_iter().zip(&page_refs)
        {
            pdf.write_stream_object(*content_ref, PdfStream::new(content.into_bytes()))?;

            let mut page_dict = PdfDictionary::new().with_type("Page");
            page_dict.insert("Parent", PdfObject::Reference(pages_ref));
            page_dict.insert(
                "MediaBox",
                PdfObject::Array(vec![
                    PdfObject::Integer(0),
                    PdfObject::Integer(0),
                    PdfObject::Real(page_info.width),
                    PdfObject::Real(page_info.height),
                ]),
            );
            page_dict.insert("Contents", PdfObject::Reference(*content_ref));

            let mut resources = PdfDictionary::new();
            if !font_refs.is_empty() {
                resources.insert("Font", PdfObject::Dictionary(font_resources.clone()));
            }
            resources.insert(
                "ProcSet",
                PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("Text")]),
            );
            page_dict.insert("Resources", PdfObject::Dictionary(resources));

            pdf.write_object(*page_ref, &page_dict.into())?;
        }

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        debug!(pages = pages.len(), fonts = font_refs.len(), "wrote PDF");
        pdf.finish()
    }

    /// Write a complete PDF document to bytes
    pub fn write_to_bytes(&self, pages: &[PageRenderInfo]) -> Result<Vec<u8>> {
        self.write(pages, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fonts::StandardFont;
    use crate::pdf::renderer::{PdfRenderItem, RgbColor, TextRenderInfo};

    fn create_test_page() -> PageRenderInfo {
        let mut page = PageRenderInfo::new(612.0, 792.0);
        page.add_item(PdfRenderItem::Text(TextRenderInfo {
            text: "Hello, PDF!".to_string(),
            x: 72.0,
            y: 72.0,
            font: StandardFont::Helvetica,
            font_size: 12.0,
            color: RgbColor::black(),
        }));
        page
    }

    fn writer(compress: bool) -> PdfDocumentWriter {
        let mut info = DocumentInfo::new();
        info.title = Some("Test Document".to_string());
        PdfDocumentWriter::new(info, compress)
    }

    #[test]
    fn test_pdf_writer_object() {
        let mut writer = PdfWriter::new(Vec::new());
        writer.write_header().unwrap();
        let obj_num = writer.allocate_object();
        writer.write_object(obj_num, &PdfObject::Integer(42)).unwrap();

        let buffer = writer.finish().unwrap();
        let output = String::from_utf8_lossy(&buffer);
        assert!(output.starts_with("%PDF-1.4"));
        assert!(output.contains("1 0 obj\n42\nendobj"));
    }

    #[test]
    fn test_document_structure() {
        let bytes = writer(true).write_to_bytes(&[create_test_page()]).unwrap();
        let pdf_str = String::from_utf8_lossy(&bytes);

        assert!(pdf_str.starts_with("%PDF-"));
        assert!(pdf_str.contains("/Type /Catalog"));
        assert!(pdf_str.contains("/Type /Pages"));
        assert!(pdf_str.contains("/BaseFont /Helvetica"));
        assert!(pdf_str.contains("/Filter /FlateDecode"));
        assert!(pdf_str.contains("(Test Document)"));
        assert!(pdf_str.contains("trailer"));
        assert!(pdf_str.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = writer(false).write_to_bytes(&[create_test_page()]).unwrap();
        let pdf_str = String::from_utf8_lossy(&bytes).into_owned();

        let xref_start = pdf_str.find("xref\n").unwrap();
        let table = &pdf_str[xref_start..];
        let first_entry = table
            .lines()
            .find(|line| line.ends_with(" n "))
            .unwrap();
        let offset: usize = first_entry[..10].parse().unwrap();
        assert!(bytes[offset..].starts_with(b"1 0 obj"));
    }

    #[test]
    fn test_uncompressed_content_is_readable() {
        let bytes = writer(false).write_to_bytes(&[create_test_page()]).unwrap();
        let pdf_str = String::from_utf8_lossy(&bytes);
        assert!(pdf_str.contains("(Hello, PDF!) Tj"));
    }

    #[test]
    fn test_empty_pages_error() {
        assert!(matches!(
            writer(true).write_to_bytes(&[]),
            Err(PdfError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_multiple_pages() {
        let pages = vec![create_test_page(), create_test_page(), create_test_page()];
        let bytes = writer(true).write_to_bytes(&pages).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/Count 3"));
    }
}
