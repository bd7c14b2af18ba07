//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "vault";
const APPLICATION: &str = "vault-table";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for temporary/regenerable data.
///
/// - Linux: `$XDG_CACHE_HOME/vault-table` or `~/.cache/vault-table`
/// - macOS: `~/Library/Caches/dev.vault.vault-table`
/// - Windows: `C:\Users\<User>\AppData\Local\vault\vault-table\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file, creating its directory.
///
/// Falls back to the working directory when no cache directory exists.
pub fn log_file() -> PathBuf {
    match cache_dir() {
        Some(dir) if fs::create_dir_all(&dir).is_ok() => dir.join("latest.log"),
        _ => PathBuf::from("vault-table.log"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_is_named_after_the_application() {
        if let Some(dir) = cache_dir() {
            let dir = dir.to_string_lossy();
            assert!(dir.contains(APPLICATION));
        }
    }

    #[test]
    fn test_log_file_name() {
        let file = log_file();
        let name = file.file_name().and_then(|n| n.to_str());
        assert!(matches!(name, Some("latest.log") | Some("vault-table.log")));
    }
}
