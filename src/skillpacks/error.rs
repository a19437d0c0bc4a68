//! Error types for skill package parsing.

use std::path::{Path, PathBuf};

/// Failures of the in-memory document pipeline (no filesystem involved).
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    /// Fewer than two `---` delimiter lines in the document.
    #[error("no YAML frontmatter found (expected two '---' delimiter lines)")]
    MissingFrontmatter,

    /// The frontmatter block is not valid YAML for the metadata schema.
    #[error("failed to parse frontmatter: {source}")]
    InvalidMetadataSyntax {
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type for package-level operations.
pub type Result<T> = std::result::Result<T, SkillError>;

/// Errors that can occur while loading a skill package from disk.
///
/// Every variant carries the path it concerns. Errors are terminal for the
/// package they belong to; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum SkillError {
    /// The package path does not exist or is not a directory.
    #[error("skill directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    /// The directory exists but holds no definition document.
    #[error("SKILL.md not found in skill directory: {}", path.display())]
    MissingDefinitionFile { path: PathBuf },

    #[error("no YAML frontmatter found in {}", path.display())]
    MissingFrontmatter { path: PathBuf },

    #[error("failed to parse SKILL.md frontmatter in {}: {source}", path.display())]
    InvalidMetadataSyntax {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Walking a resource subtree failed part way.
    #[error("error scanning resources under {}: {source}", path.display())]
    ResourceScanIo {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Any other I/O failure (unreadable definition file, unreadable root).
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SkillError {
    /// Attach the document path to a pipeline error.
    pub fn from_document(path: &Path, err: DocumentError) -> Self {
        match err {
            DocumentError::MissingFrontmatter => Self::MissingFrontmatter {
                path: path.to_path_buf(),
            },
            DocumentError::InvalidMetadataSyntax { source } => Self::InvalidMetadataSyntax {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// True for the kinds batch discovery treats as "not a package".
    #[must_use]
    pub const fn is_not_a_package(&self) -> bool {
        matches!(
            self,
            Self::MissingDirectory { .. } | Self::MissingDefinitionFile { .. }
        )
    }

    /// Path the error concerns.
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingDirectory { path }
            | Self::MissingDefinitionFile { path }
            | Self::MissingFrontmatter { path }
            | Self::InvalidMetadataSyntax { path, .. }
            | Self::ResourceScanIo { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_display() {
        let err = SkillError::MissingDirectory {
            path: PathBuf::from("/non/existent"),
        };
        let display = err.to_string();
        assert!(display.contains("skill directory not found"));
        assert!(display.contains("/non/existent"));
    }

    #[test]
    fn test_not_a_package_kinds() {
        let missing_dir = SkillError::MissingDirectory {
            path: PathBuf::from("a"),
        };
        let missing_def = SkillError::MissingDefinitionFile {
            path: PathBuf::from("b"),
        };
        let no_frontmatter = SkillError::MissingFrontmatter {
            path: PathBuf::from("c"),
        };

        assert!(missing_dir.is_not_a_package());
        assert!(missing_def.is_not_a_package());
        assert!(!no_frontmatter.is_not_a_package());
    }

    #[test]
    fn test_from_document_keeps_path() {
        let err = SkillError::from_document(Path::new("x/SKILL.md"), DocumentError::MissingFrontmatter);
        assert!(matches!(err, SkillError::MissingFrontmatter { .. }));
        assert_eq!(err.path(), Path::new("x/SKILL.md"));
    }
}
