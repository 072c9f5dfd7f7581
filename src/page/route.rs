//! Output paths and legacy redirects for a record.

use crate::stream::EntityRecord;
use std::path::{Component, Path, PathBuf};

/// Canonical output path of a record.
///
/// A non-empty `slug` is returned unchanged. Otherwise the path is
/// synthesized as `{locale}/{region}/{city}/{line1}-{id}`. Segment values
/// are used as-is: no escaping, no empty-segment checks.
pub fn resolve_path(record: &EntityRecord) -> String {
    if let Some(slug) = record.slug.as_deref()
        && !slug.is_empty()
    {
        return slug.to_string();
    }

    let address = &record.address;
    format!(
        "{}/{}/{}/{}-{}",
        record.locale, address.region, address.city, address.line1, record.id
    )
}

/// Legacy paths that redirect to the canonical path.
pub fn resolve_redirects(record: &EntityRecord) -> Vec<String> {
    vec![format!("index-old/{}", record.id)]
}

/// `../` repeated once per directory level of `path`.
///
/// `widgets` -> `""`, `en/NY/Albany/Main St-7` -> `"../../../"`.
pub fn relative_prefix_to_root(path: &str) -> String {
    let depth = path.trim_matches('/').matches('/').count();
    "../".repeat(depth)
}

/// `widgets` -> `{output_dir}/widgets.html`
///
/// Trailing slashes are dropped, so `widgets/` maps to the same file and
/// matches the `/widgets` URL. Returns `None` when `path` would leave
/// `output_dir` (absolute, `..`, or empty).
pub fn page_output_file(output_dir: &Path, path: &str) -> Option<PathBuf> {
    let relative = safe_relative(path)?;
    let file = if relative.extension().is_some_and(|ext| ext == "html") {
        relative
    } else {
        let mut name = relative.into_os_string();
        name.push(".html");
        PathBuf::from(name)
    };
    Some(output_dir.join(file))
}

/// `index-old/42` -> `{output_dir}/index-old/42/index.html`
pub fn redirect_output_file(output_dir: &Path, path: &str) -> Option<PathBuf> {
    safe_relative(path).map(|relative| output_dir.join(relative).join("index.html"))
}

fn safe_relative(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_matches('/');
    let relative = Path::new(trimmed);
    let mut normal = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            _ => return None,
        }
    }
    (normal > 0).then(|| relative.to_path_buf())
}
