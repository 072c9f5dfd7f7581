//! Output path conflict detection.
//!
//! Every canonical page and every redirect stub claims one output file.
//! Two claims on the same file would silently overwrite each other, so the
//! build stops instead.

use crate::stream::EntityId;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClaim {
    Page,
    Redirect,
}

impl fmt::Display for PathClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page => f.write_str("page"),
            Self::Redirect => f.write_str("redirect"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub id: EntityId,
    pub kind: PathClaim,
    pub path: String,
}

#[derive(Debug, Error)]
#[error(
    "output `{}` is claimed twice: {} `{}` of entity `{}` and {} `{}` of entity `{}`",
    .output.display(),
    .first.kind, .first.path, .first.id,
    .second.kind, .second.path, .second.id
)]
pub struct PathConflict {
    pub output: PathBuf,
    pub first: Claim,
    pub second: Claim,
}

/// Output files claimed so far in one build.
#[derive(Debug, Default)]
pub struct PathRegistry {
    claims: FxHashMap<PathBuf, Claim>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `output` for `path` of entity `id`.
    pub fn claim(
        &mut self,
        output: &Path,
        id: &EntityId,
        kind: PathClaim,
        path: &str,
    ) -> Result<(), Box<PathConflict>> {
        let claim = Claim {
            id: id.clone(),
            kind,
            path: path.to_string(),
        };
        match self.claims.get(output) {
            Some(first) => Err(Box::new(PathConflict {
                output: output.to_path_buf(),
                first: first.clone(),
                second: claim,
            })),
            None => {
                self.claims.insert(output.to_path_buf(), claim);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }
}
