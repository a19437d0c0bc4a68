//! Resource file discovery under `scripts/`, `references/` and `assets/`.

use super::error::{Result, SkillError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resource subtree of a skill package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Scripts,
    References,
    Assets,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Scripts,
        ResourceCategory::References,
        ResourceCategory::Assets,
    ];

    /// Directory name under the package root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ResourceCategory::Scripts => "scripts",
            ResourceCategory::References => "references",
            ResourceCategory::Assets => "assets",
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// Resource files of a package, relative to the package root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillResources {
    pub scripts: Vec<PathBuf>,
    pub references: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
}

impl SkillResources {
    /// Walk all three category subtrees of `root`.
    pub fn scan(root: &Path) -> Result<Self> {
        Ok(Self {
            scripts: scan_category(root, ResourceCategory::Scripts)?,
            references: scan_category(root, ResourceCategory::References)?,
            assets: scan_category(root, ResourceCategory::Assets)?,
        })
    }

    pub fn get(&self, category: ResourceCategory) -> &[PathBuf] {
        match category {
            ResourceCategory::Scripts => &self.scripts,
            ResourceCategory::References => &self.references,
            ResourceCategory::Assets => &self.assets,
        }
    }

    /// All resource paths, scripts first, then references, then assets.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.scripts
            .iter()
            .chain(self.references.iter())
            .chain(self.assets.iter())
    }

    pub fn len(&self) -> usize {
        self.scripts.len() + self.references.len() + self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List every file under `root/<category>`, recursively, sorted by name.
///
/// A missing subtree is an empty list, not an error.
pub fn scan_category(root: &Path, category: ResourceCategory) -> Result<Vec<PathBuf>> {
    let scan_dir = root.join(category.dir_name());
    if !scan_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&scan_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| SkillError::ResourceScanIo {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| scan_dir.clone()),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());
        files.push(relative);
    }

    tracing::debug!(
        "Found {} {} file(s) under {}",
        files.len(),
        category,
        root.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_subtrees_are_empty() {
        let temp = TempDir::new().unwrap();
        let resources = SkillResources::scan(temp.path()).unwrap();
        assert!(resources.is_empty());
    }

    #[test]
    fn test_nested_files_are_relative_to_root() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("scripts").join("subdir").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("nested.sh"), "echo 'nested'").unwrap();
        fs::write(temp.path().join("scripts").join("top.sh"), "echo").unwrap();

        let scripts = scan_category(temp.path(), ResourceCategory::Scripts).unwrap();
        assert_eq!(
            scripts,
            vec![
                Path::new("scripts")
                    .join("subdir")
                    .join("deeper")
                    .join("nested.sh"),
                Path::new("scripts").join("top.sh"),
            ]
        );
    }

    #[test]
    fn test_scan_all_categories() {
        let temp = TempDir::new().unwrap();
        for (dir, file) in [
            ("scripts", "test.sh"),
            ("references", "doc.txt"),
            ("assets", "image.png"),
        ] {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
            fs::write(temp.path().join(dir).join(file), "x").unwrap();
        }

        let resources = SkillResources::scan(temp.path()).unwrap();
        assert_eq!(resources.scripts, vec![Path::new("scripts").join("test.sh")]);
        assert_eq!(
            resources.get(ResourceCategory::References),
            &[Path::new("references").join("doc.txt")]
        );
        assert_eq!(resources.assets, vec![Path::new("assets").join("image.png")]);
        assert_eq!(resources.len(), 3);
        assert_eq!(resources.iter().count(), 3);
    }

    #[test]
    fn test_empty_directories_contribute_nothing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("assets").join("empty")).unwrap();
        let assets = scan_category(temp.path(), ResourceCategory::Assets).unwrap();
        assert!(assets.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_fails_scan_and_discovery() {
        use crate::skillpacks::index::discover_packages;
        use crate::skillpacks::package::DEFINITION_FILE;
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let package = temp.path().join("locked-skill");
        let locked = package.join("scripts").join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("hidden.sh"), "echo").unwrap();
        fs::write(
            package.join(DEFINITION_FILE),
            "---\nname: locked-skill\ndescription: d\n---\nbody\n",
        )
        .unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind root.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let scan = scan_category(&package, ResourceCategory::Scripts);
        let discovery = discover_packages(temp.path(), false);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = scan.unwrap_err();
        assert!(matches!(err, SkillError::ResourceScanIo { .. }));
        assert_eq!(err.path(), locked.as_path());

        let err = discovery.unwrap_err();
        assert!(matches!(err, SkillError::ResourceScanIo { .. }));
        assert!(!err.is_not_a_package());
    }
}
