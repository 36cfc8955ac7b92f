//! Templates shipped with the editor

use super::{create_from_structured_data, AcademicReportData, Template, TemplateCategory};
use chrono::{DateTime, Utc};
use doc_model::{DocumentSettings, TemplateId};
use uuid::Uuid;

/// Fixed id of the built-in academic report template
pub const ACADEMIC_REPORT_TEMPLATE_ID: Uuid = Uuid::from_u128(0x6a1c_0000_0000_4000_8000_0000_0000_0001);

/// Fixed id of the built-in blank template
pub const BLANK_TEMPLATE_ID: Uuid = Uuid::from_u128(0x6a1c_0000_0000_4000_8000_0000_0000_0002);

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Academic report skeleton filled with sample data
pub fn academic_report_template() -> Template {
    let document = create_from_structured_data(&AcademicReportData::sample());
    let (blocks, settings) = match document {
        Ok(doc) => (doc.blocks, doc.settings),
        Err(e) => {
            tracing::warn!(error = %e, "sample report data failed to materialize");
            (Vec::new(), DocumentSettings::default())
        }
    };

    Template {
        id: TemplateId::from_uuid(ACADEMIC_REPORT_TEMPLATE_ID),
        name: "Academic Report".to_string(),
        description: "Project report with cover page, certificate, declaration, abstract, \
                      chapters, and references"
            .to_string(),
        category: TemplateCategory::BuiltIn,
        created_at: epoch(),
        created_by: None,
        blocks,
        settings,
        preview: Some(
            "Academic report template with cover page, abstract, introduction, methodology..."
                .to_string(),
        ),
    }
}

/// Empty document with Arial and tighter line spacing
pub fn blank_template() -> Template {
    Template {
        id: TemplateId::from_uuid(BLANK_TEMPLATE_ID),
        name: "Blank Document".to_string(),
        description: "Start with a clean, empty document".to_string(),
        category: TemplateCategory::BuiltIn,
        created_at: epoch(),
        created_by: None,
        blocks: Vec::new(),
        settings: DocumentSettings {
            font_family: "Arial".to_string(),
            line_spacing: 1.2,
            ..Default::default()
        },
        preview: Some("Empty document ready for your content".to_string()),
    }
}

/// All built-in templates in display order
pub fn builtin_templates() -> Vec<Template> {
    vec![academic_report_template(), blank_template()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_have_stable_ids() {
        let first = builtin_templates();
        let second = builtin_templates();
        let ids: Vec<_> = first.iter().map(|t| t.id).collect();
        assert_eq!(ids, second.iter().map(|t| t.id).collect::<Vec<_>>());
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_academic_template_is_populated() {
        let template = academic_report_template();
        assert!(template.is_builtin());
        assert!(!template.blocks.is_empty());
        assert_eq!(template.settings.font_family, "Times New Roman");
    }

    #[test]
    fn test_blank_template_settings() {
        let template = blank_template();
        assert!(template.blocks.is_empty());
        assert_eq!(template.settings.font_family, "Arial");
        assert_eq!(template.settings.line_spacing, 1.2);
    }
}
