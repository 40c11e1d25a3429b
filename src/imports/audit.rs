// file: src/imports/audit.rs
// description: cross-check of python imports against declared manifest packages
// reference: internal analysis

use crate::config::ImportsConfig;
use crate::imports::mapping::{is_stdlib, known_distribution};
use crate::imports::scanner::{ImportSet, ImportSite};
use crate::models::Manifest;
use crate::parser::normalize_name;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingImport {
    pub module: String,
    pub distribution: String,
    pub sites: Vec<ImportSite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedPackage {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportAudit {
    pub missing: Vec<MissingImport>,
    pub unused: Vec<UnusedPackage>,
    pub declared: usize,
    pub third_party_imports: usize,
}

impl ImportAudit {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

pub struct ImportAuditor {
    module_map: BTreeMap<String, String>,
    ignored: HashSet<String>,
}

impl ImportAuditor {
    pub fn new(config: &ImportsConfig) -> Self {
        Self {
            module_map: config
                .module_map
                .iter()
                .map(|(module, dist)| (module.clone(), dist.clone()))
                .collect(),
            ignored: config.ignore_modules.iter().cloned().collect(),
        }
    }

    /// Distribution that provides `module`, normalized for comparison with manifest names.
    pub fn distribution_for(&self, module: &str) -> String {
        let distribution = self
            .module_map
            .get(module)
            .map(String::as_str)
            .or_else(|| known_distribution(module))
            .unwrap_or(module);
        normalize_name(distribution)
    }

    pub fn audit(&self, manifest: &Manifest, imports: &ImportSet) -> ImportAudit {
        // An extras qualifier such as `transformers[torch]` also provides the extra's namesake.
        let mut declared: HashSet<String> = HashSet::new();
        for (_, req) in manifest.requirements() {
            declared.insert(req.normalized_name.clone());
            declared.extend(req.extras.iter().map(|extra| normalize_name(extra)));
        }

        let mut used: HashSet<String> = HashSet::new();
        let mut missing = Vec::new();
        let mut third_party_imports = 0;

        for (module, sites) in &imports.modules {
            if self.is_excluded(module, imports) {
                continue;
            }

            third_party_imports += 1;
            let distribution = self.distribution_for(module);
            debug!("Import {} resolves to distribution {}", module, distribution);

            if declared.contains(&distribution) {
                used.insert(distribution);
            } else {
                missing.push(MissingImport {
                    module: module.clone(),
                    distribution,
                    sites: sites.clone(),
                });
            }
        }

        let unused = manifest
            .requirements()
            .filter(|(_, req)| !used.contains(&req.normalized_name))
            .map(|(line, req)| UnusedPackage {
                name: req.name.clone(),
                line,
            })
            .collect();

        ImportAudit {
            missing,
            unused,
            declared: manifest.requirement_count(),
            third_party_imports,
        }
    }

    fn is_excluded(&self, module: &str, imports: &ImportSet) -> bool {
        self.ignored.contains(module)
            || is_stdlib(module)
            || imports.local_modules.contains(module)
    }
}
