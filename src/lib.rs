//! Skill package parsing.
//!
//! A skill package is a directory holding a `SKILL.md` definition (YAML
//! frontmatter plus a marker-annotated markdown body) and optional resource
//! files under `scripts/`, `references/` and `assets/`.
//!
//! ```no_run
//! use skillpack::skillpacks::{load_package, BodySegment};
//!
//! # fn main() -> Result<(), skillpack::skillpacks::SkillError> {
//! let pkg = load_package("skills/pdf-tools")?;
//! for segment in pkg.segments() {
//!     if let BodySegment::Implementation { language, code } = segment {
//!         println!("{language}: {} bytes", code.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod skillpacks;
