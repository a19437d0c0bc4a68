//! Skill package assembly: a directory, its SKILL.md and its resource files.

use super::error::{Result, SkillError};
use super::metadata::SkillMetadata;
use super::parser::{parse_document, SkillDocument};
use super::resources::SkillResources;
use super::segmenter::BodySegment;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Canonical definition document inside a package directory.
pub const DEFINITION_FILE: &str = "SKILL.md";

/// A fully parsed skill package.
///
/// Only produced whole by [`SkillPackage::assemble`] or [`load_package`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillPackage {
    path: PathBuf,
    #[serde(rename = "meta")]
    metadata: SkillMetadata,
    #[serde(rename = "body")]
    segments: Vec<BodySegment>,
    resources: SkillResources,
}

impl SkillPackage {
    pub fn assemble(path: PathBuf, document: SkillDocument, resources: SkillResources) -> Self {
        Self {
            path,
            metadata: document.metadata,
            segments: document.segments,
            resources,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &SkillMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn description(&self) -> &str {
        &self.metadata.description
    }

    pub fn segments(&self) -> &[BodySegment] {
        &self.segments
    }

    pub fn resources(&self) -> &SkillResources {
        &self.resources
    }

    /// Path of the definition document.
    pub fn definition_path(&self) -> PathBuf {
        self.path.join(DEFINITION_FILE)
    }

    /// Every file making up the package: SKILL.md, then each resource file.
    pub fn files(&self) -> Vec<PathBuf> {
        std::iter::once(self.definition_path())
            .chain(self.resources.iter().map(|r| self.path.join(r)))
            .collect()
    }
}

/// Load and parse the skill package rooted at `dir`.
///
/// All-or-nothing: any failure returns an error and no package.
pub fn load_package(dir: impl AsRef<Path>) -> Result<SkillPackage> {
    let dir = dir.as_ref();
    tracing::debug!("Loading skill package: {}", dir.display());

    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(SkillError::MissingDirectory {
                path: dir.to_path_buf(),
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SkillError::MissingDirectory {
                path: dir.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(SkillError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    }

    let definition = dir.join(DEFINITION_FILE);
    let content = std::fs::read(&definition).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SkillError::MissingDefinitionFile {
                path: dir.to_path_buf(),
            }
        } else {
            SkillError::Io {
                path: definition.clone(),
                source,
            }
        }
    })?;

    let document =
        parse_document(&content).map_err(|e| SkillError::from_document(&definition, e))?;
    let resources = SkillResources::scan(dir)?;

    tracing::debug!(
        "Parsed skill '{}': {} segment(s), {} resource file(s)",
        document.metadata.name,
        document.segments.len(),
        resources.len()
    );

    Ok(SkillPackage::assemble(dir.to_path_buf(), document, resources))
}
