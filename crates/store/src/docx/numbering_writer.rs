//! Numbering.xml writer
//!
//! Two abstract definitions are emitted: a bullet list and a decimal list.
//! Every numbered list block gets its own instance so its count restarts.

use crate::docx::builder::BULLET_NUM_ID;
use crate::docx::model::DocxBody;
use crate::docx::namespaces;
use std::fmt::Write;

const BULLET_ABSTRACT_ID: u32 = 0;
const DECIMAL_ABSTRACT_ID: u32 = 1;

/// Writer for numbering.xml
pub struct NumberingWriter;

impl NumberingWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate numbering.xml content
    pub fn write(&self, body: &DocxBody) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        let _ = write!(xml, r#"<w:numbering xmlns:w="{}">"#, namespaces::W);

        write_abstract_num(&mut xml, BULLET_ABSTRACT_ID, "bullet", "\u{2022}");
        write_abstract_num(&mut xml, DECIMAL_ABSTRACT_ID, "decimal", "%1.");

        let _ = write!(
            xml,
            r#"<w:num w:numId="{BULLET_NUM_ID}"><w:abstractNumId w:val="{BULLET_ABSTRACT_ID}"/></w:num>"#
        );
        for num_id in &body.numbered_lists {
            let _ = write!(
                xml,
                r#"<w:num w:numId="{num_id}"><w:abstractNumId w:val="{DECIMAL_ABSTRACT_ID}"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#
            );
        }

        xml.push_str("</w:numbering>");
        xml
    }
}

impl Default for NumberingWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_abstract_num(xml: &mut String, id: u32, format: &str, text: &str) {
    let _ = write!(
        xml,
        r#"<w:abstractNum w:abstractNumId="{id}"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="{format}"/><w:lvlText w:val="{text}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builder::{build_body, DocxOptions};
    use doc_model::{ContentBlock, Document, ListType};

    #[test]
    fn test_instance_per_numbered_list() {
        let document = Document::new().with_blocks(vec![
            ContentBlock::list(ListType::Numbered, "a"),
            ContentBlock::list(ListType::Numbered, "b"),
        ]);
        let body = build_body(&document, &DocxOptions::default());
        let xml = NumberingWriter::new().write(&body);

        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains(r#"<w:numFmt w:val="decimal"/>"#));
        assert!(xml.contains(r#"<w:num w:numId="2">"#));
        assert!(xml.contains(r#"<w:num w:numId="3">"#));
        assert_eq!(xml.matches("<w:startOverride").count(), 2);
    }
}
