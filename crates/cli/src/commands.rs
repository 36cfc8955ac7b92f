//! Subcommand implementations

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use doc_model::{BlockType, Document, TemplateId};
use edit_engine::DocumentState;
use layout_engine::paginate_with_breaks;
use store::templates::{
    create_from_structured_data, create_from_template, AcademicReportData, Template,
};
use store::{
    load_document, save_document, EditorSettings, ExportFormat, Exporter, FileSink, FileStore,
    SettingsManager, TemplateManager,
};
use tracing::info;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Document JSON file
    pub input: PathBuf,

    /// Output format; defaults to the format in settings
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Directory the exported file is written to
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Drop per-block styling
    #[arg(long)]
    pub no_styles: bool,

    /// Start a new page before every top-level heading
    #[arg(long)]
    pub page_breaks: bool,

    /// Insert a table of contents
    #[arg(long)]
    pub toc: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report data JSON file
    #[arg(required_unless_present = "sample", conflicts_with = "sample")]
    pub data: Option<PathBuf>,

    /// Use the bundled sample project instead of a data file
    #[arg(long)]
    pub sample: bool,

    /// Where to write the generated document
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct PaginateArgs {
    /// Document JSON file
    pub input: PathBuf,

    /// Page height budget in pixels; defaults to the editor page height
    #[arg(short, long)]
    pub budget: Option<f32>,

    /// Use the print page height instead of the editor one
    #[arg(long, conflicts_with = "budget")]
    pub print: bool,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List built-in and custom templates
    List,

    /// Save a document as a custom template
    Save {
        /// Document JSON file
        input: PathBuf,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        #[arg(long)]
        author: Option<String>,
    },

    /// Delete a custom template
    Delete {
        /// Template id
        id: TemplateId,
    },

    /// Create a document from a template
    Apply {
        /// Template id or exact name
        template: String,

        #[arg(short, long)]
        out: PathBuf,

        /// Title of the new document
        #[arg(short, long)]
        title: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct NewArgs {
    #[arg(short, long)]
    pub out: PathBuf,

    #[arg(short, long)]
    pub title: Option<String>,

    /// Comma separated block types to start with, e.g. `heading,paragraph`
    #[arg(short, long, value_delimiter = ',', value_parser = parse_block_type)]
    pub blocks: Vec<BlockType>,
}

fn parse_block_type(s: &str) -> std::result::Result<BlockType, String> {
    let s = s.trim();
    BlockType::ALL
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("Unknown block type: {s}"))
}

async fn read_document(path: &Path) -> Result<Document> {
    load_document(path)
        .await
        .with_context(|| format!("failed to load {}", path.display()))
}

pub async fn export(args: ExportArgs, settings: &SettingsManager) -> Result<()> {
    let document = read_document(&args.input).await?;

    let mut options = settings.get().export;
    if let Some(format) = args.format {
        options.format = format;
    }
    options.include_styles &= !args.no_styles;
    options.page_breaks |= args.page_breaks;
    options.table_of_contents |= args.toc;

    let sink = FileSink::new(&args.out);
    let notice = Exporter::new().export_to(&document, &options, &sink).await;
    if !notice.is_success() {
        bail!("{}", notice.message());
    }
    println!("{} ({})", notice.message(), args.out.display());
    Ok(())
}

pub async fn report(args: ReportArgs) -> Result<()> {
    let data = match &args.data {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<AcademicReportData>(&raw)
                .with_context(|| format!("invalid report data in {}", path.display()))?
        }
        None => AcademicReportData::sample(),
    };

    let document = create_from_structured_data(&data)?;
    save_document(&document, &args.out).await?;
    info!(blocks = document.blocks.len(), "generated report");
    println!("Wrote \"{}\" to {}", document.title, args.out.display());
    Ok(())
}

pub async fn paginate(args: PaginateArgs, settings: &SettingsManager) -> Result<()> {
    let document = read_document(&args.input).await?;
    let settings = settings.get();
    let budget = match args.budget {
        Some(budget) => budget,
        None if args.print => settings.print_page_height,
        None => settings.editor_page_height,
    };
    if !(budget.is_finite() && budget > 0.0) {
        bail!("page budget must be a positive number");
    }

    let estimator = &settings.estimator;
    let pages = paginate_with_breaks(&document.blocks, budget, |b| {
        b.height.unwrap_or_else(|| estimator.estimate(b))
    });

    println!("{} pages at {budget} px", pages.len());
    for (i, page) in pages.iter().enumerate() {
        println!("  page {}: {} blocks, {:.0} px", i + 1, page.len(), page.height);
    }
    Ok(())
}

fn open_templates(settings: &SettingsManager) -> Result<TemplateManager<FileStore>> {
    let dir = settings.storage_dir();
    let store = FileStore::open(&dir)
        .with_context(|| format!("failed to open template store at {}", dir.display()))?;
    Ok(TemplateManager::new(store))
}

fn resolve_template(manager: &TemplateManager<FileStore>, key: &str) -> Result<Template> {
    if let Ok(id) = key.parse::<TemplateId>() {
        return Ok(manager.find_template(id)?);
    }
    manager
        .find_by_name(key)?
        .ok_or_else(|| anyhow!("no template named \"{key}\""))
}

pub async fn template(command: TemplateCommand, settings: &SettingsManager) -> Result<()> {
    let manager = open_templates(settings)?;

    match command {
        TemplateCommand::List => {
            for template in manager.all_templates()? {
                println!("{}  [{}]  {}", template.id, template.category, template.name);
                if let Some(preview) = template.preview.as_deref().filter(|p| !p.is_empty()) {
                    println!("    {preview}");
                }
            }
        }
        TemplateCommand::Save {
            input,
            name,
            description,
            author,
        } => {
            let document = read_document(&input).await?;
            let template = manager.create_template_from_document(
                &document,
                &name,
                &description,
                author.as_deref(),
            )?;
            println!("Saved template {} ({})", template.name, template.id);
        }
        TemplateCommand::Delete { id } => {
            if !manager.delete_template(id)? {
                bail!("no custom template with id {id}");
            }
            println!("Deleted template {id}");
        }
        TemplateCommand::Apply { template, out, title } => {
            let template = resolve_template(&manager, &template)?;
            let document = create_from_template(&template, title.as_deref());
            save_document(&document, &out).await?;
            println!("Created \"{}\" from {}", document.title, template.name);
        }
    }
    Ok(())
}

/// Blank document seeded through the editing state so block defaults match the editor
pub fn build_new_document(
    title: Option<&str>,
    blocks: &[BlockType],
    settings: &EditorSettings,
) -> Document {
    let mut document = Document::new();
    document.settings = settings.document.clone();
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        document = document.with_title(title);
    }

    let mut state = DocumentState::with_history_limit(document, settings.history_limit);
    for block_type in blocks {
        state.add_block(*block_type, None);
    }
    state.ensure_tables_initialized();
    state.document().clone()
}

pub async fn new_document(args: NewArgs, settings: &SettingsManager) -> Result<()> {
    let document = build_new_document(args.title.as_deref(), &args.blocks, settings.get());
    save_document(&document, &args.out).await?;
    println!("Wrote \"{}\" to {}", document.title, args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::BlockKind;
    use tempfile::TempDir;

    #[test]
    fn test_parse_block_type() {
        assert_eq!(parse_block_type("Heading"), Ok(BlockType::Heading));
        assert_eq!(parse_block_type(" quote "), Ok(BlockType::Quote));
        assert!(parse_block_type("sidebar").is_err());
    }

    #[test]
    fn test_new_document_has_requested_blocks() {
        let document = build_new_document(
            Some("Notes"),
            &[BlockType::Heading, BlockType::Table, BlockType::Paragraph],
            &EditorSettings::default(),
        );
        assert_eq!(document.title, "Notes");
        let types: Vec<_> = document.blocks.iter().map(|b| b.block_type()).collect();
        assert_eq!(types, vec![BlockType::Heading, BlockType::Table, BlockType::Paragraph]);
        assert!(matches!(&document.blocks[1].kind, BlockKind::Table { grid: Some(_) }));
    }

    #[test]
    fn test_blank_title_keeps_default() {
        let document = build_new_document(Some("   "), &[], &EditorSettings::default());
        assert_eq!(document.title, Document::new().title);
        assert!(document.blocks.is_empty());
    }

    #[tokio::test]
    async fn test_template_round_trip_through_file_store() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsManager::new(dir.path());

        let source = dir.path().join("source.json");
        let blocks = [BlockType::Heading, BlockType::Paragraph];
        let document = build_new_document(Some("Source"), &blocks, &EditorSettings::default());
        save_document(&document, &source).await.unwrap();

        template(
            TemplateCommand::Save {
                input: source,
                name: "Memo".into(),
                description: "Short memo".into(),
                author: None,
            },
            &settings,
        )
        .await
        .unwrap();

        let out = dir.path().join("memo.json");
        template(
            TemplateCommand::Apply {
                template: "Memo".into(),
                out: out.clone(),
                title: Some("March memo".into()),
            },
            &settings,
        )
        .await
        .unwrap();

        let created = load_document(&out).await.unwrap();
        assert_eq!(created.title, "March memo");
        assert_eq!(created.blocks.len(), 2);

        let manager = open_templates(&settings).unwrap();
        let saved = resolve_template(&manager, "Memo").unwrap();
        assert!(manager.delete_template(saved.id).unwrap());
        assert!(resolve_template(&manager, "Memo").is_err());
    }

    #[tokio::test]
    async fn test_export_writes_into_out_dir() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsManager::new(dir.path());
        let input = dir.path().join("doc.json");
        let blocks = [BlockType::Heading, BlockType::List];
        let document =
            build_new_document(Some("Weekly Report"), &blocks, &EditorSettings::default());
        save_document(&document, &input).await.unwrap();

        export(
            ExportArgs {
                input,
                format: Some(ExportFormat::Markdown),
                out: dir.path().join("out"),
                no_styles: false,
                page_breaks: false,
                toc: false,
            },
            &settings,
        )
        .await
        .unwrap();

        assert!(dir.path().join("out").join("Weekly_Report.md").exists());
    }

    #[tokio::test]
    async fn test_sample_report() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("report.json");
        report(ReportArgs {
            data: None,
            sample: true,
            out: out.clone(),
        })
        .await
        .unwrap();
        assert!(!load_document(&out).await.unwrap().blocks.is_empty());
    }
}
