//! Embedded static resources.
//!
//! - `template` - Template types for typed variable injection
//! - `build` - Build-time templates (redirect.html)
//!
//! ```ignore
//! use embed::build::{REDIRECT_HTML, RedirectVars};
//!
//! let html = REDIRECT_HTML.render(&RedirectVars { canonical_url: "/widgets" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod build {
    use super::{Template, TemplateVars};
    use crate::utils::html::escape_attr;

    /// Variables for redirect.html template.
    pub struct RedirectVars<'a> {
        pub canonical_url: &'a str,
    }

    impl TemplateVars for RedirectVars<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__CANONICAL_URL__", &escape_attr(self.canonical_url))
        }
    }

    /// Redirect stub written at every legacy path.
    pub const REDIRECT_HTML: Template<RedirectVars<'static>> =
        Template::new(include_str!("build/redirect.html"));
}
