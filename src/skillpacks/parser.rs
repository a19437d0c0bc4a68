//! SKILL.md document parser: frontmatter split, metadata decode, body segmentation.

use super::error::DocumentError;
use super::frontmatter::split_frontmatter;
use super::metadata::{decode_metadata, SkillMetadata};
use super::segmenter::{segment_body, BodySegment};

/// A parsed definition document, not yet tied to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDocument {
    pub metadata: SkillMetadata,
    pub segments: Vec<BodySegment>,
}

/// Parse a complete SKILL.md document held in memory.
pub fn parse_document(data: &[u8]) -> Result<SkillDocument, DocumentError> {
    let (frontmatter, body) = split_frontmatter(data)?;
    let metadata = decode_metadata(frontmatter)?;
    let segments = segment_body(&body);

    Ok(SkillDocument { metadata, segments })
}
