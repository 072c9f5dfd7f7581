//! `[build]` configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build input/output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Entity stream export (`.json` array or `.jsonl`).
    pub input: PathBuf,

    /// Output directory for generated documents.
    pub output: PathBuf,

    /// Remove the output directory before building.
    pub clean: bool,

    /// Sitemap generation.
    pub sitemap: SitemapConfig,
}

/// `[build.sitemap]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    /// Output path, relative to the output directory.
    pub path: PathBuf,
}

pub struct BuildFields {
    pub input: FieldPath,
    pub output: FieldPath,
    pub sitemap_path: FieldPath,
}

impl BuildSectionConfig {
    pub const FIELDS: BuildFields = BuildFields {
        input: FieldPath::new("build.input"),
        output: FieldPath::new("build.output"),
        sitemap_path: FieldPath::new("build.sitemap.path"),
    };

    /// Validate build settings. Paths must already be resolved against root.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.input.is_file() {
            diag.error_with_hint(
                Self::FIELDS.input,
                format!("entity stream `{}` not found", self.input.display()),
                "export the stream as JSON and point build.input (or --input) at it",
            );
        }

        if self.output.as_os_str().is_empty() {
            diag.error(Self::FIELDS.output, "output directory must not be empty");
        }

        if self.sitemap.enable && self.sitemap.path.is_absolute() {
            diag.error(
                Self::FIELDS.sitemap_path,
                "sitemap path must be relative to the output directory",
            );
        }
    }
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            input: "stream.json".into(),
            output: "public".into(),
            clean: false,
            sitemap: SitemapConfig::default(),
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: false,
            path: "sitemap.xml".into(),
        }
    }
}
