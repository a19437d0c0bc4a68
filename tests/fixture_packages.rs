//! Loads the on-disk packages under `fixtures/skills`.

use skillpack::skillpacks::{
    discover_packages, load_package, BodySegment, SkillError, SkillIndex,
};
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("skills")
}

#[test]
fn hello_bash_package() {
    let dir = fixtures_root().join("hello-bash");
    let pkg = load_package(&dir).expect("fixture should parse");

    let meta = pkg.metadata();
    assert_eq!(meta.name, "Test Skill");
    assert_eq!(meta.description, "A skill for testing purposes.");
    assert_eq!(meta.allowed_tools, vec!["tool1", "tool2"]);
    assert_eq!(meta.model, "gpt-4");
    assert_eq!(meta.version, "0.1.0");
    assert_eq!(meta.license, "MIT");

    assert_eq!(
        pkg.segments(),
        &[
            BodySegment::Title {
                text: "Test Skill Title".to_string()
            },
            BodySegment::Markdown {
                content: "This is the main body of the skill. It contains instructions and other markdown content."
                    .to_string()
            },
            BodySegment::Section {
                title: "Section 1".to_string(),
                content: "- Item 1\n- Item 2".to_string(),
            },
            BodySegment::Implementation {
                language: "bash".to_string(),
                code: "echo \"Hello from bash\"\n".to_string(),
            },
        ]
    );

    let resources = pkg.resources();
    assert_eq!(
        resources.scripts,
        vec![
            Path::new("scripts").join("greet.sh"),
            Path::new("scripts").join("lib").join("util.sh"),
        ]
    );
    assert_eq!(
        resources.references,
        vec![Path::new("references").join("guide.md")]
    );
    assert_eq!(resources.assets, vec![Path::new("assets").join("logo.txt")]);
}

#[test]
fn plain_notes_is_single_markdown_segment() {
    let pkg = load_package(fixtures_root().join("plain-notes")).unwrap();
    assert_eq!(
        pkg.segments(),
        &[BodySegment::Markdown {
            content: "# Plain notes\n\nJust prose, nothing else.\n\n- a list\n- of things"
                .to_string()
        }]
    );
    assert!(pkg.metadata().allowed_tools.is_empty());
    assert!(pkg.resources().is_empty());
}

#[test]
fn directory_without_definition() {
    let err = load_package(fixtures_root().join("not-a-skill")).unwrap_err();
    assert!(matches!(err, SkillError::MissingDefinitionFile { .. }));
    assert!(err.is_not_a_package());
}

#[test]
fn reparsing_is_deterministic() {
    let dir = fixtures_root().join("hello-bash");
    assert_eq!(load_package(&dir).unwrap(), load_package(&dir).unwrap());
}

#[test]
fn discovery_over_fixtures() {
    let packages = discover_packages(&fixtures_root(), true).unwrap();
    let dirs: Vec<_> = packages
        .iter()
        .map(|p| p.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs, vec!["hello-bash", "plain-notes"]);

    let index = SkillIndex::build(&[fixtures_root()], false).unwrap();
    assert_eq!(index.len(), 2);
    assert!(index.get("Test Skill").is_some());
    assert_eq!(index.search("prose").len(), 0);
    assert_eq!(index.search("markers").len(), 1);
}

#[test]
fn json_interchange_form() {
    let pkg = load_package(fixtures_root().join("hello-bash")).unwrap();
    let value = serde_json::to_value(&pkg).unwrap();

    assert!(value["path"].as_str().unwrap().ends_with("hello-bash"));
    assert_eq!(value["meta"]["model"], "gpt-4");
    let body = value["body"].as_array().unwrap();
    let kinds: Vec<_> = body.iter().map(|s| s["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["Title", "Markdown", "Section", "Implementation"]);
    assert_eq!(body[2]["title"], "Section 1");
    assert_eq!(value["resources"]["scripts"].as_array().unwrap().len(), 2);
    assert_eq!(value["resources"]["references"][0], "references/guide.md");
}
