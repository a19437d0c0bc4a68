//! Frontmatter decoding into [`SkillMetadata`].

use super::error::DocumentError;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory limits checked by [`SkillMetadata::lint`].
const MAX_NAME_LEN: usize = 64;
const MAX_DESCRIPTION_LEN: usize = 1024;

/// Typed SKILL.md frontmatter.
///
/// Optional fields that are absent (or `null`) decode to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    #[serde(rename = "allowed-tools")]
    pub allowed_tools: Vec<String>,
    pub model: String,
    pub author: String,
    pub version: String,
    pub license: String,
}

/// Allowed tools as written: a CSV string or a YAML list of scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AllowedTools(Vec<String>);

impl AllowedTools {
    fn from_csv(s: &str) -> Self {
        Self(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for AllowedTools {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AllowedToolsVisitor)
    }
}

struct AllowedToolsVisitor;

impl<'de> Visitor<'de> for AllowedToolsVisitor {
    type Value = AllowedTools;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a comma-separated string or a list of tool names")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AllowedTools::from_csv(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AllowedTools(vec![v.to_string()]))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AllowedTools(vec![v.to_string()]))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AllowedTools(vec![v.to_string()]))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AllowedTools(vec![v.to_string()]))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AllowedTools::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut tools = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Scalar(tool)) = seq.next_element()? {
            tools.push(tool);
        }
        Ok(AllowedTools(tools))
    }
}

/// Any YAML scalar, kept as its source text: `version: 1.0` stays `"1.0"`.
///
/// Requested as a string so the YAML deserializer hands over the scalar
/// untouched; the numeric arms only run for deserializers that resolve
/// numbers first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ScalarVisitor).map(Scalar)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

/// Wire shape of the frontmatter; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    #[serde(default)]
    name: Option<Scalar>,
    #[serde(default)]
    description: Option<Scalar>,
    #[serde(default, rename = "allowed-tools")]
    allowed_tools: Option<AllowedTools>,
    #[serde(default)]
    model: Option<Scalar>,
    #[serde(default)]
    author: Option<Scalar>,
    #[serde(default)]
    version: Option<Scalar>,
    #[serde(default)]
    license: Option<Scalar>,
}

fn text(value: Option<Scalar>) -> String {
    value.map(|Scalar(s)| s).unwrap_or_default()
}

impl From<RawFrontmatter> for SkillMetadata {
    fn from(raw: RawFrontmatter) -> Self {
        Self {
            name: text(raw.name),
            description: text(raw.description),
            allowed_tools: raw
                .allowed_tools
                .map(|AllowedTools(tools)| tools)
                .unwrap_or_default(),
            model: text(raw.model),
            author: text(raw.author),
            version: text(raw.version),
            license: text(raw.license),
        }
    }
}

/// Decode the frontmatter block.
///
/// A blank block yields default (all-empty) metadata. Missing `name` or
/// `description` are not errors here; see [`SkillMetadata::lint`].
pub fn decode_metadata(frontmatter: &[u8]) -> Result<SkillMetadata, DocumentError> {
    let yaml = String::from_utf8_lossy(frontmatter);
    if yaml.trim().is_empty() {
        return Ok(SkillMetadata::default());
    }

    let raw: RawFrontmatter = serde_yaml::from_str(&yaml)
        .map_err(|source| DocumentError::InvalidMetadataSyntax { source })?;
    Ok(raw.into())
}

/// Non-fatal problem found in otherwise decodable metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataIssue {
    EmptyName,
    EmptyDescription,
    NameTooLong(usize),
    DescriptionTooLong(usize),
    NameNotKebabCase,
}

impl std::fmt::Display for MetadataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is empty"),
            Self::EmptyDescription => write!(f, "description is empty"),
            Self::NameTooLong(len) => {
                write!(f, "name is {} chars (limit {})", len, MAX_NAME_LEN)
            }
            Self::DescriptionTooLong(len) => write!(
                f,
                "description is {} chars (limit {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::NameNotKebabCase => write!(
                f,
                "name should be lowercase letters, numbers, hyphens only"
            ),
        }
    }
}

impl SkillMetadata {
    /// Advisory checks. Parsing never fails on these.
    pub fn lint(&self) -> Vec<MetadataIssue> {
        let mut issues = Vec::new();

        if self.name.is_empty() {
            issues.push(MetadataIssue::EmptyName);
        } else {
            let len = self.name.chars().count();
            if len > MAX_NAME_LEN {
                issues.push(MetadataIssue::NameTooLong(len));
            }
            if !self
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            {
                issues.push(MetadataIssue::NameNotKebabCase);
            }
        }

        if self.description.is_empty() {
            issues.push(MetadataIssue::EmptyDescription);
        } else {
            let len = self.description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                issues.push(MetadataIssue::DescriptionTooLong(len));
            }
        }

        issues
    }
}
