use anyhow::Result;
use glob::glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handles file system traversal and discovery of session log files.
///
/// Discovery is a collaborator of the engine, not part of it: the analyzer
/// consumes whatever list of paths it is handed, so callers are free to
/// enumerate files some other way.
pub struct FileDiscovery;

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// Recursively find all `.jsonl` session logs under the scan root.
    pub fn find_jsonl_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut seen_files = HashSet::new();

        let patterns = vec![root.join("*.jsonl"), root.join("**").join("*.jsonl")];

        for pattern in patterns {
            if let Ok(paths) = glob(&pattern.to_string_lossy()) {
                for entry in paths.flatten() {
                    // Deduplicate files that match multiple patterns
                    if entry.is_file() && seen_files.insert(entry.clone()) {
                        files.push(entry);
                    }
                }
            }
        }

        files.sort();
        debug!(root = %root.display(), count = files.len(), "Discovered session logs");
        Ok(files)
    }
}
