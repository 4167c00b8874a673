//! Pipeline orchestration for the CLI.
//!
//! `run_generate` is the whole program: read the structure document, build
//! the model, expand inheritance, and write the pages. The binary in
//! `main.rs` only parses arguments and maps the result to an exit code.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::RefmarkError;
use crate::expand::expand_model;
use crate::input::StructureDoc;
use crate::links::{LinkFormatter, DEFAULT_LINK_EXTENSION, DEFAULT_LINK_TEMPLATE};
use crate::output::write_docs;
use crate::parse::build_model;

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Link template; `%c` is replaced with the short type name.
    pub link_template: String,
    /// Extension the `.md` link targets are rewritten to.
    pub link_extension: String,
    /// Whether to write the `ApiIndex.md` namespace tree.
    pub index: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            link_template: DEFAULT_LINK_TEMPLATE.to_string(),
            link_extension: DEFAULT_LINK_EXTENSION.to_string(),
            index: true,
        }
    }
}

/// Result summary of a generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerateSummary {
    /// Types in the completed model.
    pub types: usize,
    /// Pages written, index included.
    pub pages: usize,
}

/// Run the full pipeline: input document → model → expansion → pages.
pub fn run_generate(
    input: &Path,
    out_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerateSummary, RefmarkError> {
    let raw = fs::read_to_string(input).map_err(|source| RefmarkError::InputRead {
        path: input.display().to_string(),
        source,
    })?;
    let doc: StructureDoc =
        serde_json::from_str(&raw).map_err(|source| RefmarkError::InputMalformed {
            path: input.display().to_string(),
            source,
        })?;

    let mut model = build_model(&doc);
    debug!(types = model.len(), "parsed structure document");

    expand_model(&mut model)?;
    debug!("inheritance expansion complete");

    let links = LinkFormatter::new(&model)
        .with_template(options.link_template.as_str())
        .with_extension(options.link_extension.as_str());
    let pages = write_docs(&model, out_dir, &links, options.index)?;

    info!(
        types = model.len(),
        pages,
        out_dir = %out_dir.display(),
        "generated reference pages"
    );

    Ok(GenerateSummary {
        types: model.len(),
        pages,
    })
}
