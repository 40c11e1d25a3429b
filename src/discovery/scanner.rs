// file: src/discovery/scanner.rs
// description: Directory walking and manifest discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::DiscoveryConfig;
use crate::error::{ManifestError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct ManifestScanner {
    config: DiscoveryConfig,
    patterns: Vec<(usize, Regex)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedManifest {
    pub path: PathBuf,
    pub relative_path: String,
}

impl ManifestScanner {
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|pattern| {
                let components = pattern.split('/').count();
                glob_to_regex(pattern).map(|re| (components, re))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { config, patterns })
    }

    /// Explicit files are returned as-is; directories are walked for manifest names.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedManifest>> {
        if root.is_file() {
            return Ok(vec![ScannedManifest {
                path: root.to_path_buf(),
                relative_path: root.display().to_string(),
            }]);
        }

        if !root.is_dir() {
            return Err(ManifestError::Discovery {
                path: root.to_path_buf(),
                message: "path does not exist".to_string(),
            });
        }

        info!("Scanning directory: {}", root.display());
        let mut files = Vec::new();
        let max_size = self.config.max_file_size_kb * 1024;

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            if self.should_skip(&relative_path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if !self.matches_manifest_name(&relative_path) {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > max_size {
                    debug!(
                        "Skipping large file ({} KB): {}",
                        metadata.len() / 1024,
                        path.display()
                    );
                    continue;
                }

                files.push(ScannedManifest {
                    path: path.to_path_buf(),
                    relative_path,
                });
            }
        }

        info!("Found {} manifest files", files.len());
        Ok(files)
    }

    /// Scans every root and drops repeated paths, keeping first-seen order.
    pub fn scan_all(&self, roots: &[PathBuf]) -> Result<Vec<ScannedManifest>> {
        let mut files: Vec<ScannedManifest> = Vec::new();

        for root in roots {
            for file in self.scan(root)? {
                if !files.iter().any(|existing| existing.path == file.path) {
                    files.push(file);
                }
            }
        }

        Ok(files)
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        let with_root = format!("/{}", relative_path);

        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if relative_path.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if with_root.contains(&format!("/{}", pattern.trim_start_matches('/'))) {
                return true;
            }
        }

        false
    }

    fn matches_manifest_name(&self, relative_path: &str) -> bool {
        let parts: Vec<&str> = relative_path.split('/').collect();

        self.patterns.iter().any(|(components, re)| {
            if parts.len() < *components {
                return false;
            }
            let tail = parts[parts.len() - components..].join("/");
            re.is_match(&tail)
        })
    }
}

fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let escaped = regex::escape(pattern).replace(r"\*", "[^/]*");
    Regex::new(&format!("^{}$", escaped))
        .map_err(|e| ManifestError::Config(format!("invalid discovery pattern {}: {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> ManifestScanner {
        ManifestScanner::new(DiscoveryConfig::default()).unwrap()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "numpy\n").unwrap();
    }

    #[test]
    fn test_scan_directory_matches_manifest_names() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "requirements.txt");
        touch(temp.path(), "requirements-dev.txt");
        touch(temp.path(), "docs-requirements.txt");
        touch(temp.path(), "requirements/base.txt");
        touch(temp.path(), "notes.txt");
        touch(temp.path(), "src/main.py");

        let files = scanner().scan(temp.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "docs-requirements.txt",
                "requirements/base.txt",
                "requirements-dev.txt",
                "requirements.txt",
            ]
        );
    }

    #[test]
    fn test_skip_patterns() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "requirements.txt");
        touch(temp.path(), ".venv/lib/requirements.txt");
        touch(temp.path(), "node_modules/pkg/requirements.txt");

        let files = scanner().scan(temp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "requirements.txt");
    }

    #[test]
    fn test_skip_does_not_match_name_suffixes() {
        let scanner = scanner();
        assert!(scanner.should_skip("venv/requirements.txt"));
        assert!(!scanner.should_skip("myvenv/requirements.txt"));
    }

    #[test]
    fn test_explicit_file_is_always_returned() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "deps.in");

        let path = temp.path().join("deps.in");
        let files = scanner().scan(&path).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, path);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = scanner().scan(&temp.path().join("missing"));
        assert!(matches!(result, Err(ManifestError::Discovery { .. })));
    }

    #[test]
    fn test_scan_all_deduplicates() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "requirements.txt");
        let file = temp.path().join("requirements.txt");

        let files = scanner()
            .scan_all(&[file.clone(), file])
            .unwrap();
        assert_eq!(files.len(), 1);
    }
}
