// file: src/imports/scanner.rs
// description: python source walking and top-level import extraction
// reference: https://docs.rs/walkdir

use crate::error::{ManifestError, Result};
use crate::parser::patterns::{FROM_IMPORT, IMPORT_STATEMENT};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSite {
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    /// Top-level module name to every place it is imported.
    pub modules: BTreeMap<String, Vec<ImportSite>>,
    /// File stems and package directories belonging to the scanned tree itself.
    pub local_modules: BTreeSet<String>,
    pub files_scanned: usize,
}

impl ImportSet {
    pub fn record(&mut self, module: &str, site: ImportSite) {
        self.modules.entry(module.to_string()).or_default().push(site);
    }
}

pub struct ImportScanner {
    skip_patterns: Vec<String>,
}

impl ImportScanner {
    pub fn new(skip_patterns: Vec<String>) -> Self {
        Self { skip_patterns }
    }

    pub fn scan(&self, root: &Path) -> Result<ImportSet> {
        if !root.is_dir() {
            return Err(ManifestError::Discovery {
                path: root.to_path_buf(),
                message: "source path is not a directory".to_string(),
            });
        }

        info!("Scanning python sources in {}", root.display());
        let mut imports = ImportSet::default();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "py") {
                continue;
            }

            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            if self.should_skip(&relative) {
                debug!("Skipping source file: {}", relative);
                continue;
            }

            record_local_names(&mut imports, &relative);

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Cannot read {}: {}", path.display(), e);
                    continue;
                }
            };

            for (module, line) in extract_imports(&content) {
                imports.record(
                    &module,
                    ImportSite {
                        file: relative.clone(),
                        line,
                    },
                );
            }
            imports.files_scanned += 1;
        }

        info!(
            "Found {} distinct top-level imports in {} files",
            imports.modules.len(),
            imports.files_scanned
        );
        Ok(imports)
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        let with_root = format!("/{}", relative_path);
        self.skip_patterns
            .iter()
            .filter(|pattern| !pattern.contains('*'))
            .any(|pattern| with_root.contains(&format!("/{}", pattern.trim_start_matches('/'))))
    }
}

fn record_local_names(imports: &mut ImportSet, relative: &str) {
    let mut parts: Vec<&str> = relative.split('/').collect();
    if let Some(file) = parts.pop()
        && let Some(stem) = file.strip_suffix(".py")
        && stem != "__init__"
    {
        imports.local_modules.insert(stem.to_string());
    }
    for dir in parts {
        imports.local_modules.insert(dir.to_string());
    }
}

/// Returns `(top_level_module, line_number)` for every absolute import in `source`.
pub fn extract_imports(source: &str) -> Vec<(String, usize)> {
    let mut found = Vec::new();
    let mut in_string_block = false;

    for (idx, line) in source.lines().enumerate() {
        let quotes = line.matches("\"\"\"").count() + line.matches("'''").count();
        let starts_in_block = in_string_block;
        if quotes % 2 == 1 {
            in_string_block = !in_string_block;
        }
        if starts_in_block || line.trim_start().starts_with("\"\"\"") {
            continue;
        }

        let number = idx + 1;

        if let Some(caps) = FROM_IMPORT.captures(line) {
            let relative = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            if !relative && let Some(module) = caps.get(2) {
                found.push((top_level(module.as_str()), number));
            }
            continue;
        }

        if let Some(caps) = IMPORT_STATEMENT.captures(line) {
            for item in caps[1].split(',') {
                if let Some(name) = item.split_whitespace().next() {
                    found.push((top_level(name), number));
                }
            }
        }
    }

    found
}

fn top_level(dotted: &str) -> String {
    dotted.split('.').next().unwrap_or(dotted).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_extract_import_forms() {
        let source = "import os\nimport numpy as np\nimport os.path, sys\nfrom sklearn.metrics import f1_score\nfrom . import sibling\nfrom ..database.connection import get_connection\n    import spacy\n";
        let modules: Vec<(String, usize)> = extract_imports(source);

        assert_eq!(
            modules,
            vec![
                ("os".to_string(), 1),
                ("numpy".to_string(), 2),
                ("os".to_string(), 3),
                ("sys".to_string(), 3),
                ("sklearn".to_string(), 4),
                ("spacy".to_string(), 7),
            ]
        );
    }

    #[test]
    fn test_docstrings_are_ignored() {
        let source = "\"\"\"Module docs.\nimport fake_module\nfrom other import thing\n\"\"\"\nimport gensim\n";
        let names: Vec<String> = extract_imports(source).into_iter().map(|(m, _)| m).collect();
        assert_eq!(names, vec!["gensim".to_string()]);
    }

    #[test]
    fn test_scan_tree_collects_local_modules() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("src/analysis");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(temp.path().join("main.py"), "from src.analysis.topics import run\nimport nltk\n").unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();
        fs::write(pkg.join("topics.py"), "import gensim\nfrom nltk import pos_tag\n").unwrap();

        let venv = temp.path().join(".venv/lib");
        fs::create_dir_all(&venv).unwrap();
        fs::write(venv.join("site.py"), "import should_not_appear\n").unwrap();

        let scanner = ImportScanner::new(vec![".venv/".to_string()]);
        let imports = scanner.scan(temp.path()).unwrap();

        assert_eq!(imports.files_scanned, 3);
        assert!(imports.local_modules.contains("src"));
        assert!(imports.local_modules.contains("main"));
        assert!(imports.local_modules.contains("topics"));
        assert!(!imports.local_modules.contains("__init__"));
        assert!(!imports.modules.contains_key("should_not_appear"));
        assert_eq!(imports.modules["nltk"].len(), 2);
        assert_eq!(imports.modules["gensim"][0].file, "src/analysis/topics.py");
    }

    #[test]
    fn test_scan_requires_directory() {
        let temp = TempDir::new().unwrap();
        let scanner = ImportScanner::new(vec![]);
        assert!(scanner.scan(&temp.path().join("nope")).is_err());
    }
}
