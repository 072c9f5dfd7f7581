//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from the current directory
///
/// ```text
/// /home/user/shop/data/        ← cwd
/// /home/user/shop/aisle.toml   ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

/// Absolute form of `path`, canonicalized when it exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_absolute_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("aisle.toml");
        assert_eq!(find_config_file(&config), None);

        std::fs::write(&config, "").unwrap();
        assert_eq!(find_config_file(&config), Some(config));
    }

    #[test]
    fn test_normalize_keeps_missing_absolute_path() {
        let path = Path::new("/no/such/dir/public");
        assert_eq!(normalize_path(path), PathBuf::from("/no/such/dir/public"));
    }
}
