//! URL paths for rendered pages.
//!
//! Resolved page paths are filesystem-shaped (`en/NY/Albany/Main St #4-7`).
//! Every place that turns one into a link goes through `url_path` so that
//! `#`, `?` and spaces never end up as fragment, query or broken href.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode each `/`-separated segment of a page path.
///
/// Leading and trailing slashes are dropped: `"/a b/"` -> `"a%20b"`.
pub fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Root-relative URL of a page path: `widgets` -> `/widgets`.
pub fn url_path(path: &str) -> String {
    format!("/{}", encode_path(path))
}
