//! Writing rendered documents and redirect stubs to disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::embed::build::{REDIRECT_HTML, RedirectVars};
use crate::utils::url::url_path;

/// Write a rendered document to `output_file`, creating parent directories.
pub fn write_page(output_file: &Path, html: &str) -> Result<()> {
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output_file, html)
        .with_context(|| format!("Failed to write {}", output_file.display()))
}

/// Write a redirect stub at `output_file` pointing to the percent-encoded
/// `/{canonical_path}`.
pub fn write_redirect(output_file: &Path, canonical_path: &str) -> Result<()> {
    let url = url_path(canonical_path);
    let html = REDIRECT_HTML.render(&RedirectVars {
        canonical_url: &url,
    });
    write_page(output_file, &html)
}
