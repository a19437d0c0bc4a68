//! Text renderings of a parsed package.

use super::package::SkillPackage;
use super::resources::ResourceCategory;
use super::segmenter::{BodySegment, FENCE};

/// Reassemble the body from its segments, markers included.
pub fn body_markdown(segments: &[BodySegment]) -> String {
    let blocks: Vec<String> = segments
        .iter()
        .map(|segment| match segment {
            BodySegment::Title { text } => format!("[Title]: {}", text),
            BodySegment::Section { title, content } if content.is_empty() => {
                format!("[Section]: title: \"{}\"", title)
            }
            BodySegment::Section { title, content } => {
                format!("[Section]: title: \"{}\"\n{}", title, content)
            }
            BodySegment::Markdown { content } => content.clone(),
            BodySegment::Implementation { language, code } => format!(
                "This is the implementation in {lang}\n{fence}{lang}\n{code}{fence}",
                lang = language,
                code = code,
                fence = FENCE,
            ),
        })
        .collect();
    blocks.join("\n\n")
}

/// Context handed to a language model when the skill is activated.
pub fn prompt_context(pkg: &SkillPackage) -> String {
    let mut out = body_markdown(pkg.segments());
    out.push_str("\n\n## SKILL CONTEXT\n");
    out.push_str(&format!("Skill Root Path: {}\n", pkg.path().display()));

    let resources = pkg.resources();
    if !resources.is_empty() {
        out.push_str("Available Resources:\n");
        for category in ResourceCategory::ALL {
            let files = resources.get(category);
            if files.is_empty() {
                continue;
            }
            out.push_str(&format!("- {}:\n", category));
            for file in files {
                out.push_str(&format!("  - {}\n", file.display()));
            }
        }
    }

    out.push_str(
        "\nWhen reading resource files mentioned in the skill definition, \
         use the full path or a path relative to the Skill Root Path.\n",
    );
    out
}

/// One line per segment, for quick inspection.
pub fn outline(segments: &[BodySegment]) -> Vec<String> {
    segments
        .iter()
        .map(|segment| match segment {
            BodySegment::Title { text } => format!("[Title]: {}", text),
            BodySegment::Section { title, content } => {
                format!("[Section]: {} ({} chars)", title, content.chars().count())
            }
            BodySegment::Markdown { content } => {
                format!("[Markdown]: {}", preview(content, 40))
            }
            BodySegment::Implementation { language, code } => {
                format!("[Implementation]: {} ({} lines)", language, code.lines().count())
            }
        })
        .collect()
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skillpacks::parser::SkillDocument;
    use crate::skillpacks::resources::SkillResources;
    use crate::skillpacks::segmenter::segment_body;
    use std::path::PathBuf;

    const BODY: &str = r#"[Title]: Demo

Intro.

[Section]: title: "Steps"
1. First
2. Second

This is the implementation in bash
```bash
echo hi
```"#;

    #[test]
    fn test_body_markdown_resegments_identically() {
        let segments = segment_body(BODY);
        let rendered = body_markdown(&segments);
        assert_eq!(segment_body(&rendered), segments);
    }

    #[test]
    fn test_prompt_context_lists_resources() {
        let pkg = SkillPackage::assemble(
            PathBuf::from("/skills/demo"),
            SkillDocument {
                metadata: Default::default(),
                segments: segment_body(BODY),
            },
            SkillResources {
                scripts: vec![PathBuf::from("scripts/run.sh")],
                ..Default::default()
            },
        );

        let context = prompt_context(&pkg);
        assert!(context.starts_with("[Title]: Demo"));
        assert!(context.contains("## SKILL CONTEXT"));
        assert!(context.contains("Skill Root Path: /skills/demo"));
        assert!(context.contains("- scripts:\n  - scripts/run.sh"));
        assert!(!context.contains("- assets:"));
    }

    #[test]
    fn test_outline() {
        let lines = outline(&segment_body(BODY));
        assert_eq!(
            lines,
            vec![
                "[Title]: Demo",
                "[Markdown]: Intro.",
                "[Section]: Steps (18 chars)",
                "[Implementation]: bash (1 lines)",
            ]
        );
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short", 40), "short");
        assert_eq!(preview(&"x".repeat(50), 10), format!("{}...", "x".repeat(10)));
    }
}
