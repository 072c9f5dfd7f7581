//! Site configuration management for `aisle.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [build], [search]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[site]`    | Site title, url, language, favicon, logo          |
//! | `[build]`   | Stream input, output directory, sitemap           |
//! | `[search]`  | Hosted search client used by the product widget   |
//! | `[stream]`  | Data-fetch descriptor (fields, filter, locales)   |

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, normalize_path};

pub use section::{
    BuildSectionConfig, EndpointUrls, Endpoints, SearchConfig, SiteSectionConfig, SitemapConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    stream::StreamConfig,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing aisle.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub stream: StreamConfig,
}

impl SiteConfig {
    /// Load configuration for the CLI invocation.
    ///
    /// Searches upward from cwd for the config file; the project root is
    /// the directory containing it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            bail!(ConfigError::Validation(format!(
                "config file '{}' not found in this directory or any parent",
                cli.config.display()
            )));
        };

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        config.root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.apply_cli(cli);
        config.normalize_paths();
        config.validate(cli)?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // CLI options
    // ========================================================================

    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.input, cli.input.as_ref());

        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Query { args } => crate::logger::set_verbose(args.verbose),
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        self.build.clean |= args.clean;

        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve build paths against the project root.
    fn normalize_paths(&mut self) {
        self.build.input = normalize_path(&self.root.join(&self.build.input));
        self.build.output = normalize_path(&self.root.join(&self.build.output));
    }

    /// Sitemap file inside the output directory.
    pub fn sitemap_file(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        let diag = self.diagnostics(cli.is_build());
        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    fn diagnostics(&self, is_build: bool) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(self.build.sitemap.enable, &mut diag);
        self.build.validate(&mut diag);
        self.stream.validate(&mut diag);

        // Rendering needs the search client; querying paths does not.
        if is_build {
            self.search.validate(&mut diag);
        }
        diag
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
        [site]
        title = "NWC Supply"
        url = "https://shop.example.com"

        [build]
        input = "stream.json"
        output = "dist"

        [build.sitemap]
        enable = true

        [search]
        api_key = "abc123"
        endpoints = "production"

        [stream.localization]
        locales = ["en", "es"]
    "#;

    #[test]
    fn test_from_str_sections() {
        let config = SiteConfig::from_str(SAMPLE).unwrap();
        assert_eq!(config.site.title, "NWC Supply");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.sitemap.enable);
        assert_eq!(config.search.endpoints, Endpoints::Production);
        assert_eq!(config.search.vertical_key, "products");
        assert_eq!(config.stream.localization.locales, ["en", "es"]);
        assert_eq!(config.stream.filter.entity_types, ["ce_category"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.site.favicon, "/yext-favicon.ico");
        assert_eq!(config.build.input, PathBuf::from("stream.json"));
        assert_eq!(config.stream, StreamConfig::category());
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (_, ignored) = SiteConfig::parse_with_ignored(
            r#"
            [site]
            titel = "typo"
            [serch]
            api_key = "x"
            "#,
        )
        .unwrap();
        assert_eq!(ignored.len(), 2);
        assert!(ignored.iter().any(|f| f == "site.titel"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(SiteConfig::from_str("[site\ntitle = 1").is_err());
    }

    #[test]
    fn test_search_only_validated_for_build() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("stream.json");
        fs::write(&input, "[]").unwrap();

        let mut config = SiteConfig::from_str("").unwrap();
        config.build.input = input;
        config.build.output = dir.path().join("public");

        assert!(!config.diagnostics(false).has_errors());
        let diag = config.diagnostics(true);
        assert_eq!(diag.errors()[0].field, SearchConfig::FIELDS.api_key);
    }

    #[test]
    fn test_build_args_override_config() {
        let mut config = SiteConfig::from_str(SAMPLE).unwrap();
        config.apply_build_args(&BuildArgs {
            output: Some("out".into()),
            clean: true,
            sitemap: Some(false),
            site_url: Some("https://staging.example.com".into()),
            verbose: false,
        });
        assert_eq!(config.build.output, PathBuf::from("out"));
        assert!(config.build.clean);
        assert!(!config.build.sitemap.enable);
        assert_eq!(config.site.url.as_deref(), Some("https://staging.example.com"));
    }

    #[test]
    fn test_paths_resolve_against_root() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::from_str(SAMPLE).unwrap();
        config.root = dir.path().to_path_buf();
        config.normalize_paths();
        assert!(config.build.output.ends_with("dist"));
        assert!(config.build.output.is_absolute());
        assert_eq!(config.sitemap_file(), config.build.output.join("sitemap.xml"));
    }
}
