//! Query command implementation.
//!
//! Resolves what a build would produce for each selected entity without
//! writing anything: canonical path, redirects and head config, printed
//! as JSON on stdout.

use anyhow::Result;
use serde::Serialize;

use crate::cli::QueryArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::page::{HeadConfig, PageTemplate, RenderContext};
use crate::stream::{EntityRecord, load_stream};
use crate::utils::plural_count;

/// Result for a single queried entity
#[derive(Debug, Serialize)]
pub struct EntityQueryResult {
    pub id: String,
    pub path: String,
    pub redirects: Vec<String>,
    pub head: HeadConfig,
}

/// Run the query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig, template: &dyn PageTemplate) -> Result<()> {
    if args.descriptor {
        println!("{}", to_json(&config.stream, args.pretty)?);
        return Ok(());
    }

    let records = config
        .stream
        .select(load_stream(&config.build.input, &config.stream)?);
    let results = query_records(&records, &args.ids, template);

    for id in &args.ids {
        if !results.iter().any(|r| &r.id == id) {
            log!("warning"; "entity `{}` not found in stream", id);
        }
    }

    if results.is_empty() {
        log!("query"; "no entities matched");
        return Ok(());
    }

    println!("{}", to_json(&results, args.pretty)?);
    crate::debug!("query"; "reported {}", plural_count(results.len(), "record"));
    Ok(())
}

/// Resolve records, keeping only `ids` when any are given.
pub fn query_records(
    records: &[EntityRecord],
    ids: &[String],
    template: &dyn PageTemplate,
) -> Vec<EntityQueryResult> {
    records
        .iter()
        .filter(|record| ids.is_empty() || ids.iter().any(|id| id == record.id.as_str()))
        .map(|record| {
            let path = template.path(record);
            let ctx = RenderContext::for_path(&path);
            EntityQueryResult {
                id: record.id.to_string(),
                redirects: template.redirects(record),
                head: template.head(record, &ctx),
                path,
            }
        })
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
