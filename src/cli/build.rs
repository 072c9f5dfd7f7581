//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Init** - Clean output directory when requested
//! - **Load** - Read the stream export and select category documents
//! - **Plan** - Resolve paths and redirects, claim every output file
//! - **Render** - Parallel document rendering and redirect stubs
//! - **Finalize** - Sitemap, summary logging

use crate::{
    config::SiteConfig,
    debug,
    generator::sitemap::Sitemap,
    log,
    logger::ProgressLine,
    page::{
        PageTemplate, PathClaim, PathRegistry, RenderContext, page_output_file,
        redirect_output_file, write_page, write_redirect,
    },
    stream::{EntityRecord, load_stream},
    utils::plural_count,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{kind} path `{path}` of entity `{id}` cannot be written inside the output directory")]
    UnsafePath {
        id: String,
        kind: PathClaim,
        path: String,
    },
}

/// What a finished build wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub redirects: usize,
    pub sitemap: Option<PathBuf>,
}

/// One record with every output it claims.
struct PlannedPage<'a> {
    record: &'a EntityRecord,
    path: String,
    output: PathBuf,
    redirects: Vec<(String, PathBuf)>,
}

/// Build the whole site.
///
/// Pipeline: init -> load -> plan -> render -> finalize
pub fn build_site(config: &SiteConfig, template: &dyn PageTemplate) -> Result<BuildReport> {
    init_build(&config.build.output, config.build.clean)?;

    let records = load_stream(&config.build.input, &config.stream)?;
    let total = records.len();
    let records = config.stream.select(records);
    log!(
        "stream";
        "{} selected from {}",
        plural_count(records.len(), "record"),
        plural_count(total, "document")
    );

    let plan = plan_outputs(&records, template, &config.build.output)?;
    let report = render_outputs(&plan, template)?;

    let sitemap = write_sitemap(config, &plan)?;

    log!(
        "build";
        "done: {} and {}",
        plural_count(report.pages, "page"),
        plural_count(report.redirects, "redirect")
    );

    Ok(BuildReport { sitemap, ..report })
}

/// Prepare the output directory.
fn init_build(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
        debug!("build"; "cleared {}", output.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Resolve every path and claim its output file.
///
/// Fails on the first path that escapes the output directory or that
/// lands on a file another page or redirect already claimed.
fn plan_outputs<'a>(
    records: &'a [EntityRecord],
    template: &dyn PageTemplate,
    output_dir: &Path,
) -> Result<Vec<PlannedPage<'a>>> {
    let mut registry = PathRegistry::new();
    let mut plan = Vec::with_capacity(records.len());

    for record in records {
        let path = template.path(record);
        let output = page_output_file(output_dir, &path)
            .ok_or_else(|| unsafe_path(record, PathClaim::Page, &path))?;
        registry.claim(&output, &record.id, PathClaim::Page, &path)?;

        let mut redirects = Vec::new();
        for redirect in template.redirects(record) {
            let file = redirect_output_file(output_dir, &redirect)
                .ok_or_else(|| unsafe_path(record, PathClaim::Redirect, &redirect))?;
            registry.claim(&file, &record.id, PathClaim::Redirect, &redirect)?;
            redirects.push((redirect, file));
        }

        plan.push(PlannedPage {
            record,
            path,
            output,
            redirects,
        });
    }

    debug!("build"; "claimed {}", plural_count(registry.len(), "output file"));
    Ok(plan)
}

fn unsafe_path(record: &EntityRecord, kind: PathClaim, path: &str) -> BuildError {
    BuildError::UnsafePath {
        id: record.id.to_string(),
        kind,
        path: path.to_string(),
    }
}

/// Render documents and redirect stubs in parallel.
fn render_outputs(plan: &[PlannedPage<'_>], template: &dyn PageTemplate) -> Result<BuildReport> {
    let redirect_count = plan.iter().map(|p| p.redirects.len()).sum();
    let progress = ProgressLine::new(&[("pages", plan.len()), ("redirects", redirect_count)]);

    plan.par_iter().try_for_each(|page| -> Result<()> {
        let ctx = RenderContext::for_path(&page.path);
        let html = template.document(page.record, &ctx);
        write_page(&page.output, &html)?;
        progress.inc("pages");

        for (redirect, file) in &page.redirects {
            write_redirect(file, &page.path)?;
            debug!("redirect"; "{} -> {}", redirect, page.path);
            progress.inc("redirects");
        }
        Ok(())
    })?;

    progress.finish();

    Ok(BuildReport {
        pages: plan.len(),
        redirects: redirect_count,
        sitemap: None,
    })
}

/// Write the sitemap when enabled. Lists canonical pages only.
fn write_sitemap(config: &SiteConfig, plan: &[PlannedPage<'_>]) -> Result<Option<PathBuf>> {
    if !config.build.sitemap.enable {
        return Ok(None);
    }
    let Some(base_url) = config.site.url.as_deref() else {
        return Ok(None);
    };

    let file = config.sitemap_file();
    Sitemap::build(base_url, plan.iter().map(|p| p.path.as_str())).write(&file)?;
    Ok(Some(file))
}
