//! Configuration section definitions.
//!
//! Each module corresponds to a section in `aisle.toml`:
//!
//! | Module   | TOML Section  | Purpose                                  |
//! |----------|---------------|------------------------------------------|
//! | `build`  | `[build]`     | Entity stream input, output, sitemap     |
//! | `search` | `[search]`    | Hosted search client for the widget      |
//! | `site`   | `[site]`      | Site info, favicon, fallback logo        |
//!
//! The `[stream]` section is the data-fetch descriptor and lives with the
//! stream loader in `crate::stream`.

mod build;
mod search;
mod site;

pub use build::{BuildSectionConfig, SitemapConfig};
pub use search::{EndpointUrls, Endpoints, SearchConfig};
pub use site::SiteSectionConfig;
