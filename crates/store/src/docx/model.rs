//! In-memory object tree of a DOCX body
//!
//! Blocks are first lowered into this tree and only then serialized, so the
//! structure can be inspected in tests without parsing XML.

/// Paragraph styles defined in styles.xml
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Title,
    Heading(u8),
    Quote,
    Caption,
    TocHeading,
}

impl ParagraphStyle {
    pub fn style_id(&self) -> String {
        match self {
            ParagraphStyle::Title => "Title".to_string(),
            ParagraphStyle::Heading(level) => format!("Heading{}", (*level).clamp(1, 6)),
            ParagraphStyle::Quote => "Quote".to_string(),
            ParagraphStyle::Caption => "Caption".to_string(),
            ParagraphStyle::TocHeading => "TOCHeading".to_string(),
        }
    }
}

/// `w:jc` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Left,
    Center,
    Right,
    Both,
}

impl Justification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Both => "both",
        }
    }
}

/// Paragraph spacing in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
    /// Line spacing in 240ths of a line
    pub line: Option<u32>,
}

/// Direct run formatting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunProperties {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Font size in half-points
    pub size: Option<u32>,
    /// Hex color without the leading `#`
    pub color: Option<String>,
    pub font: Option<String>,
}

impl RunProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Complex fields the writer knows how to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCode {
    TableOfContents,
    Page,
}

impl FieldCode {
    pub fn instruction(&self) -> &'static str {
        match self {
            FieldCode::TableOfContents => r#"TOC \o "1-3" \h \z \u"#,
            FieldCode::Page => "PAGE",
        }
    }

    /// Text shown until the consumer updates the field
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldCode::TableOfContents => "Right-click to update the table of contents.",
            FieldCode::Page => "1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunElement {
    Text {
        text: String,
        props: RunProperties,
    },
    /// `<w:br w:type="page"/>`
    PageBreak,
    Field(FieldCode),
}

impl RunElement {
    pub fn text(text: impl Into<String>) -> Self {
        RunElement::Text {
            text: text.into(),
            props: RunProperties::default(),
        }
    }

    pub fn styled(text: impl Into<String>, props: RunProperties) -> Self {
        RunElement::Text {
            text: text.into(),
            props,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocxParagraph {
    pub style: Option<ParagraphStyle>,
    pub justification: Option<Justification>,
    /// `w:numId` of the list this paragraph belongs to
    pub num_id: Option<u32>,
    pub spacing: Option<Spacing>,
    pub runs: Vec<RunElement>,
}

impl DocxParagraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: ParagraphStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = Some(justification);
        self
    }

    pub fn with_numbering(mut self, num_id: u32) -> Self {
        self.num_id = Some(num_id);
        self
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn with_run(mut self, run: RunElement) -> Self {
        self.runs.push(run);
        self
    }

    /// Paragraph holding only a page break
    pub fn page_break() -> Self {
        Self::new().with_run(RunElement::PageBreak)
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self.runs.as_slice(), [RunElement::PageBreak])
    }

    /// Concatenated text of all text runs
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|run| match run {
                RunElement::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Bordered table spanning the full text width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxTable {
    pub rows: Vec<Vec<String>>,
    pub props: RunProperties,
}

impl DocxTable {
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyElement {
    Paragraph(DocxParagraph),
    Table(DocxTable),
}

impl BodyElement {
    pub fn as_paragraph(&self) -> Option<&DocxParagraph> {
        match self {
            BodyElement::Paragraph(p) => Some(p),
            BodyElement::Table(_) => None,
        }
    }
}

/// Page setup of the single section, in twips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProperties {
    pub page_width: u32,
    pub page_height: u32,
    pub landscape: bool,
    pub margin: u32,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
}

/// Document-wide run and paragraph defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocDefaults {
    pub font: String,
    /// Line spacing in 240ths of a line
    pub line: u32,
}

/// A fully lowered document body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxBody {
    pub elements: Vec<BodyElement>,
    pub section: SectionProperties,
    pub defaults: DocDefaults,
    /// `w:numId` of every numbered list, one per list block
    pub numbered_lists: Vec<u32>,
    pub has_bullets: bool,
    pub has_toc: bool,
}

impl DocxBody {
    pub fn paragraphs(&self) -> impl Iterator<Item = &DocxParagraph> {
        self.elements.iter().filter_map(BodyElement::as_paragraph)
    }

    pub fn uses_numbering(&self) -> bool {
        self.has_bullets || !self.numbered_lists.is_empty()
    }
}
