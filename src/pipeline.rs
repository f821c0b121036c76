//! Load, build, write: one linear pass per run.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::GeneratorConfig;
use crate::document::to_docx_bytes;
use crate::error::ResumeResult;
use crate::output::{write_document, OutputDescriptor};
use crate::records::load_records;
use crate::render::{OutlineEntry, ResumeBuilder};
use crate::style::StyleConfig;

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub style: StyleConfig,
    pub extension: String,
}

impl GenerateOptions {
    pub fn from_config(config: &GeneratorConfig, root: &Path) -> Self {
        Self {
            data_dir: config.data_path(root),
            output_dir: config.output_path(root),
            style: StyleConfig::for_variant(config.variant),
            extension: config.extension.trim_start_matches('.').to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub output: OutputDescriptor,
    pub outline: Vec<OutlineEntry>,
}

/// Generates one resume document.
///
/// Records are loaded in full before anything is rendered, and the output
/// directory is only touched once the document has been serialized, so a
/// bad input never leaves a partial file behind.
pub fn generate(options: &GenerateOptions) -> ResumeResult<GeneratedResume> {
    let records = load_records(&options.data_dir)?;

    let rendered = ResumeBuilder::new(options.style.clone()).render(&records);
    info!(
        variant = %options.style.variant,
        sections = rendered.outline.len(),
        "rendered resume"
    );

    let bytes = to_docx_bytes(&rendered.document)?;
    let output = write_document(
        &options.output_dir,
        &records.personal_info.name,
        &options.extension,
        &bytes,
    )?;

    Ok(GeneratedResume {
        output,
        outline: rendered.outline,
    })
}
