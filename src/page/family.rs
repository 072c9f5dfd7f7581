//! VDOM family for category pages.
//!
//! Page bodies are built as `Element<Raw>` trees and go through the
//! `Raw -> Indexed -> Processed` phases before rendering.

#![allow(dead_code)]

use tola_vdom::families::LinkFamily;
use tola_vdom::vdom::families;

/// Element families used by rendered pages.
///
/// Generates `AisleSite::Raw`, `AisleSite::Indexed`, `AisleSite::Processed`
/// and the `element`, `indexer`, `processor` constructors.
#[families]
pub struct AisleSite {
    link: LinkFamily,
}

/// Raw document type
pub type RawDocument = tola_vdom::Document<AisleSite::Raw>;

/// Raw element type
pub type RawElement = tola_vdom::Element<AisleSite::Raw>;

/// Raw phase type alias for convenience
pub type Raw = AisleSite::Raw;
