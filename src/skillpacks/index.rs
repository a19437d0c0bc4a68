//! Skill pack discovery and indexing.

use super::error::{Result, SkillError};
use super::package::{load_package, SkillPackage};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Parse every immediate subdirectory of `root` as a skill package.
///
/// Directories that are not packages (no SKILL.md) are skipped; any other
/// failure aborts discovery. Results are ordered by directory name
/// regardless of `parallel`.
pub fn discover_packages(root: &Path, parallel: bool) -> Result<Vec<SkillPackage>> {
    let candidates = candidate_dirs(root)?;
    tracing::debug!(
        "Scanning {} candidate dir(s) under {}",
        candidates.len(),
        root.display()
    );

    let results: Vec<Result<SkillPackage>> = if parallel {
        candidates.par_iter().map(load_package).collect()
    } else {
        candidates.iter().map(load_package).collect()
    };

    let mut packages = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(pkg) => packages.push(pkg),
            Err(e) if e.is_not_a_package() => {
                tracing::debug!("Skipping {}: {}", e.path().display(), e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(packages)
}

fn candidate_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SkillError::MissingDirectory {
                path: root.to_path_buf(),
            }
        } else {
            SkillError::Io {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SkillError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

/// Index of all discovered skills, keyed by name.
#[derive(Debug, Default)]
pub struct SkillIndex {
    skills: BTreeMap<String, SkillPackage>,
}

impl SkillIndex {
    /// Build index from search roots.
    ///
    /// Later roots take priority: a skill with the same name replaces the one
    /// found earlier. Roots that do not exist are ignored.
    pub fn build(roots: &[PathBuf], parallel: bool) -> Result<Self> {
        let mut index = SkillIndex::default();

        for root in roots {
            if !root.is_dir() {
                tracing::debug!("Skills root not found, skipping: {}", root.display());
                continue;
            }
            for pkg in discover_packages(root, parallel)? {
                index.insert(pkg);
            }
        }

        Ok(index)
    }

    fn insert(&mut self, pkg: SkillPackage) {
        let key = index_key(&pkg);
        if let Some(previous) = self.skills.insert(key, pkg) {
            tracing::debug!(
                "Skill '{}' at {} overridden",
                previous.name(),
                previous.path().display()
            );
        }
    }

    /// All skills, ordered by name.
    pub fn all(&self) -> impl Iterator<Item = &SkillPackage> {
        self.skills.values()
    }

    /// Get skill by name
    pub fn get(&self, name: &str) -> Option<&SkillPackage> {
        self.skills.get(name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Case-insensitive substring match on name or description.
    pub fn search(&self, query: &str) -> Vec<&SkillPackage> {
        let query = query.to_lowercase();
        self.skills
            .values()
            .filter(|pkg| {
                pkg.name().to_lowercase().contains(&query)
                    || pkg.description().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Format skill list for system prompt injection
    pub fn format_for_prompt(&self, max_entries: usize) -> String {
        if self.skills.is_empty() {
            return String::new();
        }

        let mut lines = vec!["Available skill packs:".to_string()];

        for (count, pkg) in self.skills.values().enumerate() {
            if count >= max_entries {
                let remaining = self.skills.len() - max_entries;
                lines.push(format!(
                    "  (+{} more; use `skillpack list` to view)",
                    remaining
                ));
                break;
            }
            lines.push(format!("- {}: {}", pkg.name(), pkg.description()));
        }

        lines.join("\n")
    }
}

/// Metadata name, or the directory name when the name is blank.
fn index_key(pkg: &SkillPackage) -> String {
    if !pkg.name().is_empty() {
        return pkg.name().to_string();
    }
    pkg.path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
