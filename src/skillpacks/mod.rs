//! Skill Packs: a directory holding a SKILL.md definition plus resource files.
//!
//! SKILL.md starts with YAML frontmatter between `---` lines. The body after
//! it is split into typed segments (titles, sections, markdown, and
//! language-tagged implementation blocks). Resource files live under
//! `scripts/`, `references/` and `assets/`.

pub mod error;
pub mod frontmatter;
pub mod index;
pub mod metadata;
pub mod package;
pub mod parser;
pub mod render;
pub mod resources;
pub mod segmenter;

pub use error::{DocumentError, SkillError};
pub use index::{discover_packages, SkillIndex};
pub use metadata::{MetadataIssue, SkillMetadata};
pub use package::{load_package, SkillPackage, DEFINITION_FILE};
pub use parser::{parse_document, SkillDocument};
pub use resources::{ResourceCategory, SkillResources};
pub use segmenter::{segment_body, BodySegment, SegmenterState};
