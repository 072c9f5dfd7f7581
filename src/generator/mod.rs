//! Site-level artifacts generated after all pages are written.

pub mod sitemap;
