//! Academic report generator
//!
//! Expands [`AcademicReportData`] into the fixed report skeleton: cover page,
//! bonafide certificate, declaration, acknowledgement, abstract, table of
//! contents, seven chapters, and the reference list. A page break block
//! separates every section and precedes each chapter.

use super::{AcademicReportData, Reference, TemplateError, TemplateResult};
use doc_model::{
    BlockStyle, ContentBlock, Document, DocumentSettings, FontWeight, Orientation,
    PageSize, TextAlign,
};
use tracing::debug;

/// `template` field of generated reports
pub const ACADEMIC_REPORT_TEMPLATE: &str = "academic-report";

const REPORT_FONT: &str = "Times New Roman";
const REPORT_COLOR: &str = "#000000";

const TABLE_OF_CONTENTS: &str = "\
BONAFIDE CERTIFICATE\ti
DECLARATION\tii
ACKNOWLEDGEMENT\tiii
ABSTRACT\tiv
TABLE OF CONTENTS\tv

CHAPTER 1: INTRODUCTION\t1
CHAPTER 2: LITERATURE SURVEY\t5
CHAPTER 3: OBJECTIVES\t10
CHAPTER 4: METHODOLOGY\t12
CHAPTER 5: PROPOSED WORK\t18
CHAPTER 6: RESULTS AND DISCUSSIONS\t25
CHAPTER 7: CONCLUSIONS AND FUTURE WORK\t32

REFERENCES\t35";

/// Block style shared by every generated block
#[derive(Clone, Copy)]
struct Look {
    size: f32,
    weight: FontWeight,
    align: TextAlign,
    top: f32,
    bottom: f32,
    line: f32,
}

impl Look {
    const fn new(size: f32, weight: FontWeight, align: TextAlign) -> Self {
        Self {
            size,
            weight,
            align,
            top: 0.0,
            bottom: 0.0,
            line: 1.2,
        }
    }

    const fn margins(mut self, top: f32, bottom: f32) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }

    const fn line(mut self, line: f32) -> Self {
        self.line = line;
        self
    }

    fn style(self) -> BlockStyle {
        BlockStyle::default()
            .with_font_size(self.size)
            .with_weight(self.weight)
            .with_align(self.align)
            .with_color(REPORT_COLOR)
            .with_margins(self.top, self.bottom)
            .with_line_height(self.line)
            .with_font_family(REPORT_FONT)
    }
}

const CENTER: Look = Look::new(12.0, FontWeight::Normal, TextAlign::Center);
const CENTER_BOLD: Look = Look::new(16.0, FontWeight::Bold, TextAlign::Center);
const SECTION_HEADING: Look =
    Look::new(18.0, FontWeight::Bold, TextAlign::Center).margins(50.0, 30.0);
const CHAPTER_HEADING: Look =
    Look::new(16.0, FontWeight::Bold, TextAlign::Center).margins(50.0, 25.0);
const BODY: Look = Look::new(13.0, FontWeight::Normal, TextAlign::Justify)
    .margins(20.0, 40.0)
    .line(1.5);
const SIGNATURE: Look = Look::new(12.0, FontWeight::Normal, TextAlign::Left)
    .margins(40.0, 20.0)
    .line(1.3);

struct ReportBuilder {
    blocks: Vec<ContentBlock>,
}

impl ReportBuilder {
    fn paragraph(&mut self, content: impl Into<String>, look: Look) {
        self.blocks
            .push(ContentBlock::paragraph(content).with_style(look.style()));
    }

    fn heading(&mut self, content: impl Into<String>, look: Look) {
        self.blocks
            .push(ContentBlock::heading(1, content).with_style(look.style()));
    }

    fn page_break(&mut self) {
        let look = Look::new(12.0, FontWeight::Normal, TextAlign::Left).line(1.0);
        self.blocks
            .push(ContentBlock::page_break().with_style(look.style()));
    }
}

/// Check the fields the report cannot be generated without
pub fn validate_report_data(data: &AcademicReportData) -> TemplateResult<()> {
    if data.project_title.trim().is_empty() {
        return Err(TemplateError::validation("Project title is required"));
    }
    if data.students.is_empty() {
        return Err(TemplateError::validation("At least one student is required"));
    }
    Ok(())
}

/// Materialize an academic report document from structured data
pub fn create_from_structured_data(data: &AcademicReportData) -> TemplateResult<Document> {
    validate_report_data(data)?;

    let mut report = ReportBuilder { blocks: Vec::new() };
    cover_page(&mut report, data);
    report.page_break();
    bonafide_certificate(&mut report, data);
    report.page_break();
    declaration(&mut report, data);
    report.page_break();
    acknowledgement(&mut report, data);
    report.page_break();
    abstract_page(&mut report, data);
    report.page_break();
    contents_page(&mut report);
    chapters(&mut report, data);
    report.page_break();
    references(&mut report, data);

    debug!(blocks = report.blocks.len(), "generated academic report");

    let settings = DocumentSettings {
        page_margins: 72.0,
        page_size: PageSize::A4,
        font_family: REPORT_FONT.to_string(),
        page_orientation: Orientation::Portrait,
        line_spacing: 1.5,
        header_text: None,
        footer_text: None,
    };

    let mut document = Document::new()
        .with_title(data.project_title.clone())
        .with_blocks(report.blocks)
        .with_settings(settings);
    document.template = ACADEMIC_REPORT_TEMPLATE.to_string();
    Ok(document)
}

fn cover_page(report: &mut ReportBuilder, data: &AcademicReportData) {
    let institution = &data.institution;
    let department = data.department().to_uppercase();

    report.paragraph(&institution.logo_placeholder, CENTER.margins(40.0, 20.0));
    report.paragraph(
        institution.name.to_uppercase(),
        Look { size: 18.0, ..CENTER_BOLD }.margins(10.0, 5.0),
    );
    if let Some(status) = &institution.status {
        report.paragraph(status, Look { size: 14.0, ..CENTER }.margins(0.0, 5.0));
    }
    report.paragraph(&institution.address, CENTER.margins(0.0, 30.0));
    report.paragraph(
        format!("DEPARTMENT OF {department}"),
        CENTER_BOLD.margins(20.0, 40.0),
    );
    report.paragraph(
        data.project_title.to_uppercase(),
        Look { size: 20.0, ..CENTER_BOLD }.margins(20.0, 30.0).line(1.3),
    );
    report.paragraph(
        format!("A {} Report submitted to", data.project_type),
        Look { size: 14.0, ..CENTER }.margins(10.0, 5.0),
    );
    report.paragraph(
        &institution.name,
        Look { size: 14.0, ..CENTER_BOLD }.margins(0.0, 5.0),
    );
    report.paragraph(
        "in partial fulfillment of the requirements for the award of degree of",
        CENTER.margins(0.0, 5.0),
    );
    report.paragraph(
        format!("{} IN {department}", institution.degree.to_uppercase()),
        Look { size: 14.0, ..CENTER_BOLD }.margins(5.0, 30.0),
    );

    report.paragraph("SUBMITTED BY", Look { size: 14.0, ..CENTER_BOLD }.margins(10.0, 10.0));
    for student in &data.students {
        report.paragraph(
            format!("{} - {}", student.name.to_uppercase(), student.register_number),
            Look { size: 14.0, ..CENTER_BOLD }.margins(0.0, 5.0),
        );
    }

    report.paragraph("Under the guidance of", CENTER.margins(30.0, 5.0));
    report.paragraph(
        data.supervisor.name.to_uppercase(),
        Look { size: 14.0, ..CENTER_BOLD }.margins(0.0, 5.0),
    );
    report.paragraph(&data.supervisor.designation, CENTER.margins(0.0, 5.0));
    report.paragraph(
        format!("Department of {}", data.supervisor.department),
        CENTER.margins(0.0, 20.0),
    );

    if let Some(guide) = &data.industry_guide {
        report.paragraph("Industry Guide", CENTER.margins(10.0, 5.0));
        report.paragraph(
            guide.name.to_uppercase(),
            Look { size: 14.0, ..CENTER_BOLD }.margins(0.0, 5.0),
        );
        report.paragraph(&guide.designation, CENTER.margins(0.0, 5.0));
        report.paragraph(&guide.company, CENTER.margins(0.0, 20.0));
    }

    report.paragraph(
        format!("Academic Year: {}", data.academic_year),
        CENTER.margins(30.0, 5.0),
    );
    report.paragraph(&data.submission_date, CENTER.margins(0.0, 20.0));
}

fn bonafide_certificate(report: &mut ReportBuilder, data: &AcademicReportData) {
    let institution = &data.institution.name;
    let registers = data
        .students
        .iter()
        .map(|s| s.register_number.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    report.heading("BONAFIDE CERTIFICATE", SECTION_HEADING);
    report.paragraph(
        format!(
            "This is to certify that the project work entitled \"{}\" is a bonafide work \
             carried out by {} (Register Number: {registers}) in partial fulfillment of the \
             requirements for the award of {} in {} during the academic year {}.",
            data.project_title,
            data.student_names(", "),
            data.institution.degree,
            data.department(),
            data.academic_year,
        ),
        BODY,
    );
    report.paragraph(
        format!(
            "{}\n{}\nDepartment of {}\n{institution}",
            data.supervisor.name, data.supervisor.designation, data.supervisor.department
        ),
        SIGNATURE.margins(60.0, 20.0),
    );
    report.paragraph(
        format!(
            "{}\nHead of the Department\nDepartment of {}\n{institution}",
            data.hod.name, data.hod.department
        ),
        Look {
            align: TextAlign::Right,
            ..SIGNATURE
        }
        .margins(20.0, 50.0),
    );
}

fn declaration(report: &mut ReportBuilder, data: &AcademicReportData) {
    let institution = &data.institution.name;

    report.heading("DECLARATION", SECTION_HEADING);
    report.paragraph(
        format!(
            "We hereby declare that the project work entitled \"{}\" submitted to \
             {institution} is a record of an original work done by us under the guidance of \
             {}, {}, Department of {}, {institution} and it has not formed the basis for the \
             award of any degree/diploma/fellowship or similar title to any candidate of any \
             university.",
            data.project_title,
            data.supervisor.name,
            data.supervisor.designation,
            data.supervisor.department,
        ),
        BODY.margins(20.0, 50.0),
    );
    for student in &data.students {
        report.paragraph(
            format!(
                "{}\nRegister Number: {}\nDepartment of {}",
                student.name, student.register_number, student.department
            ),
            SIGNATURE.margins(20.0, 20.0),
        );
    }
    report.paragraph(
        format!(
            "Place: {}\nDate: {}",
            data.institution.place, data.submission_date
        ),
        SIGNATURE.margins(30.0, 20.0),
    );
}

fn acknowledgement(report: &mut ReportBuilder, data: &AcademicReportData) {
    let institution = &data.institution.name;

    report.heading("ACKNOWLEDGEMENT", SECTION_HEADING);
    report.paragraph(
        format!(
            "We would like to express our sincere gratitude to our project guide {}, {}, \
             Department of {}, {institution} for the continuous support, guidance and \
             encouragement throughout the project work.\n\n\
             We extend our heartfelt thanks to {}, Head of the Department of {}, for providing \
             necessary facilities and support.\n\n\
             We also thank all the faculty members of the Department of {} and our friends who \
             have directly or indirectly helped us in the successful completion of this project.",
            data.supervisor.name,
            data.supervisor.designation,
            data.supervisor.department,
            data.hod.name,
            data.hod.department,
            data.department(),
        ),
        BODY,
    );
    report.paragraph(
        data.student_names("\n"),
        Look {
            align: TextAlign::Right,
            ..SIGNATURE
        }
        .margins(40.0, 50.0),
    );
}

fn abstract_page(report: &mut ReportBuilder, data: &AcademicReportData) {
    let section = &data.abstract_section;
    let body = BODY.margins(10.0, 15.0);

    report.heading("ABSTRACT", SECTION_HEADING);
    for text in [
        &section.background,
        &section.objectives,
        &section.methodology,
        &section.results,
        &section.conclusions,
    ] {
        report.paragraph(text, body);
    }
    report.paragraph(
        format!("Keywords: {}.", section.keywords.join(", ")),
        Look {
            align: TextAlign::Left,
            ..body
        }
        .margins(15.0, 30.0),
    );
}

fn contents_page(report: &mut ReportBuilder) {
    report.heading("TABLE OF CONTENTS", SECTION_HEADING);
    report.paragraph(
        TABLE_OF_CONTENTS,
        Look {
            align: TextAlign::Left,
            ..BODY
        }
        .margins(20.0, 50.0)
        .line(1.8),
    );
}

fn chapters(report: &mut ReportBuilder, data: &AcademicReportData) {
    let chapters = &data.chapters;
    let closing = format!(
        "{}\n\n7.2 FUTURE WORK\n\n{}",
        chapters.conclusions, chapters.future_work
    );
    let entries = [
        ("CHAPTER 1: INTRODUCTION", chapters.introduction.as_str()),
        ("CHAPTER 2: LITERATURE SURVEY", chapters.literature_survey.as_str()),
        ("CHAPTER 3: OBJECTIVES", chapters.objectives.as_str()),
        ("CHAPTER 4: METHODOLOGY", chapters.methodology.as_str()),
        ("CHAPTER 5: PROPOSED WORK", chapters.proposed_work.as_str()),
        ("CHAPTER 6: RESULTS AND DISCUSSIONS", chapters.results.as_str()),
        ("CHAPTER 7: CONCLUSIONS AND FUTURE WORK", closing.as_str()),
    ];

    for (title, body) in entries {
        report.page_break();
        report.heading(title, CHAPTER_HEADING);
        report.paragraph(body, BODY.margins(15.0, 15.0));
    }
}

fn references(report: &mut ReportBuilder, data: &AcademicReportData) {
    report.heading("REFERENCES", SECTION_HEADING);
    for (index, reference) in data.references.iter().enumerate() {
        report.paragraph(
            format_reference(reference, index + 1),
            Look::new(12.0, FontWeight::Normal, TextAlign::Justify)
                .margins(8.0, 8.0)
                .line(1.4),
        );
    }
}

/// Render one reference in the report's citation style.
///
/// `[n] Authors, "Title," Journal, Vol. V, No. I, pp. P, Year. Publisher. DOI: d Available: url`
pub fn format_reference(reference: &Reference, number: usize) -> String {
    let mut out = format!(
        "[{number}] {}, \"{},\"",
        reference.authors.join(", "),
        reference.title
    );

    if let Some(journal) = &reference.journal {
        out.push(' ');
        out.push_str(journal);
        if let Some(volume) = &reference.volume {
            out.push_str(&format!(", Vol. {volume}"));
        }
        if let Some(issue) = &reference.issue {
            out.push_str(&format!(", No. {issue}"));
        }
    } else if let Some(conference) = &reference.conference {
        out.push_str(&format!(" in Proceedings of {conference}"));
    }

    if let Some(pages) = &reference.pages {
        out.push_str(&format!(", pp. {pages}"));
    }
    out.push_str(&format!(", {}.", reference.year));

    if let Some(publisher) = &reference.publisher {
        out.push_str(&format!(" {publisher}."));
    }
    if let Some(doi) = &reference.doi {
        out.push_str(&format!(" DOI: {doi}"));
    }
    if let Some(url) = &reference.url {
        out.push_str(&format!(" Available: {url}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::BlockType;

    #[test]
    fn test_journal_reference() {
        let reference = Reference {
            authors: vec!["A. Author".into(), "B. Author".into()],
            title: "On Things".into(),
            journal: Some("Journal of Things".into()),
            volume: Some("3".into()),
            issue: Some("2".into()),
            pages: Some("10-20".into()),
            year: 2021,
            publisher: Some("Pub".into()),
            doi: Some("10.1/x".into()),
            url: Some("https://example.org".into()),
            ..Default::default()
        };
        assert_eq!(
            format_reference(&reference, 1),
            "[1] A. Author, B. Author, \"On Things,\" Journal of Things, Vol. 3, No. 2, \
             pp. 10-20, 2021. Pub. DOI: 10.1/x Available: https://example.org"
        );
    }

    #[test]
    fn test_conference_reference() {
        let reference = Reference {
            authors: vec!["C. Lee".into()],
            title: "Search".into(),
            conference: Some("ICIR".into()),
            year: 2022,
            ..Default::default()
        };
        assert_eq!(
            format_reference(&reference, 4),
            "[4] C. Lee, \"Search,\" in Proceedings of ICIR, 2022."
        );
    }

    #[test]
    fn test_journal_wins_over_conference() {
        let reference = Reference {
            authors: vec!["X".into()],
            title: "T".into(),
            journal: Some("J".into()),
            conference: Some("C".into()),
            year: 2000,
            ..Default::default()
        };
        assert!(!format_reference(&reference, 1).contains("Proceedings"));
    }

    #[test]
    fn test_report_structure() {
        let data = AcademicReportData::sample();
        let doc = create_from_structured_data(&data).unwrap();

        assert_eq!(doc.title, data.project_title);
        assert_eq!(doc.template, ACADEMIC_REPORT_TEMPLATE);
        assert_eq!(doc.settings.font_family, "Times New Roman");
        assert!(doc.validate().is_ok());

        let headings: Vec<&str> = doc
            .blocks
            .iter()
            .filter(|b| b.block_type() == BlockType::Heading)
            .map(|b| b.content.as_str())
            .collect();
        assert_eq!(headings[..6], [
            "BONAFIDE CERTIFICATE",
            "DECLARATION",
            "ACKNOWLEDGEMENT",
            "ABSTRACT",
            "TABLE OF CONTENTS",
            "CHAPTER 1: INTRODUCTION",
        ]);
        assert_eq!(headings.last(), Some(&"REFERENCES"));
        assert_eq!(headings.len(), 5 + 7 + 1);
    }

    #[test]
    fn test_page_break_precedes_every_section_heading() {
        let doc = create_from_structured_data(&AcademicReportData::sample()).unwrap();

        for (i, block) in doc.blocks.iter().enumerate() {
            if block.block_type() == BlockType::Heading {
                assert_eq!(
                    doc.blocks[i - 1].block_type(),
                    BlockType::PageBreak,
                    "heading {:?} not preceded by a page break",
                    block.content
                );
            }
        }
        let breaks = doc
            .blocks
            .iter()
            .filter(|b| b.block_type() == BlockType::PageBreak)
            .count();
        assert_eq!(breaks, 5 + 7 + 1);
    }

    #[test]
    fn test_cover_lists_each_student() {
        let mut data = AcademicReportData::sample();
        data.industry_guide = None;
        let doc = create_from_structured_data(&data).unwrap();

        assert!(doc.blocks.iter().any(|b| b.content == "JOHN DOE - 19IT001"));
        assert!(doc.blocks.iter().any(|b| b.content == "JANE SMITH - 19IT002"));
        assert!(!doc.blocks.iter().any(|b| b.content == "Industry Guide"));
    }

    #[test]
    fn test_future_work_joins_chapter_seven() {
        let doc = create_from_structured_data(&AcademicReportData::sample()).unwrap();
        let idx = doc
            .blocks
            .iter()
            .position(|b| b.content == "CHAPTER 7: CONCLUSIONS AND FUTURE WORK")
            .unwrap();
        assert!(doc.blocks[idx + 1].content.contains("\n\n7.2 FUTURE WORK\n\n"));
    }

    #[test]
    fn test_validation_messages() {
        let mut data = AcademicReportData::sample();
        data.students.clear();
        let err = create_from_structured_data(&data).unwrap_err();
        assert_eq!(err.to_string(), "At least one student is required");

        let mut data = AcademicReportData::sample();
        data.project_title = "  ".into();
        let err = create_from_structured_data(&data).unwrap_err();
        assert_eq!(err.to_string(), "Project title is required");
    }

    #[test]
    fn test_custom_institution() {
        let mut data = AcademicReportData::sample();
        data.institution.name = "Example College".into();
        data.institution.status = None;
        let doc = create_from_structured_data(&data).unwrap();

        assert!(doc.blocks.iter().any(|b| b.content == "EXAMPLE COLLEGE"));
        assert!(!doc.blocks.iter().any(|b| b.content == "(Autonomous)"));
    }
}
