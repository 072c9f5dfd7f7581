//! Configuration utility types.
//!
//! | Module   | Purpose                                  |
//! |----------|------------------------------------------|
//! | `error`  | `ConfigError` and grouped diagnostics    |
//! | `field`  | Dotted config field paths for messages   |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
