//! Page output.
//!
//! Writes the rendered Markdown pages to the output directory. Any I/O
//! failure is fatal and carries the offending path; the core never writes
//! partial output after an error.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::RefmarkError;
use crate::links::LinkFormatter;
use crate::model::Model;
use crate::render::{render_index, render_type_page, INDEX_FILE_NAME};

/// Render and write one page per type, plus the namespace index unless
/// disabled. Returns the number of pages written.
pub fn write_docs(
    model: &Model,
    out_dir: &Path,
    links: &LinkFormatter,
    with_index: bool,
) -> Result<usize, RefmarkError> {
    fs::create_dir_all(out_dir).map_err(|source| RefmarkError::OutputWrite {
        path: out_dir.display().to_string(),
        source,
    })?;

    let mut pages = 0;
    for (_, record) in model.iter() {
        let path = out_dir.join(&record.output_file_name);
        let page = render_type_page(record, links);
        write_page(&path, &page)?;
        debug!(page = %path.display(), "wrote type page");
        pages += 1;
    }

    if with_index {
        let path = out_dir.join(INDEX_FILE_NAME);
        write_page(&path, &render_index(model, links))?;
        debug!(page = %path.display(), "wrote index page");
        pages += 1;
    }

    Ok(pages)
}

fn write_page(path: &Path, contents: &str) -> Result<(), RefmarkError> {
    fs::write(path, contents).map_err(|source| RefmarkError::OutputWrite {
        path: path.display().to_string(),
        source,
    })
}
