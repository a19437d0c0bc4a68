//! Command-line interface for inspecting skill packages.
//!
//! Each command returns its rendered output as a string; `main` prints it.

use crate::config::{Config, OutputFormat};
use crate::skillpacks::render::{body_markdown, outline, prompt_context};
use crate::skillpacks::{load_package, ResourceCategory, SkillIndex, SkillPackage};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Parse, inspect and search skill packages.
#[derive(Parser, Debug)]
#[command(name = "skillpack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json); overrides the config file
    #[arg(long, global = true, value_parser = parse_format)]
    pub format: Option<OutputFormat>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(s).ok_or_else(|| format!("unknown format '{}'", s))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a skill package and display its structure
    Parse {
        path: PathBuf,
        /// Output the parsed structure as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Display metadata, body and resources of a skill package
    Detail { path: PathBuf },
    /// List every file making up a skill package
    Files { path: PathBuf },
    /// List all valid skills under the skill roots
    List {
        #[arg(env = "SKILLPACK_SKILLS_DIR")]
        root: Option<PathBuf>,
    },
    /// Search skills by name or description (case-insensitive)
    Search {
        query: String,
        #[arg(long, env = "SKILLPACK_SKILLS_DIR")]
        root: Option<PathBuf>,
    },
    /// Print the model-facing context for a skill package
    Context { path: PathBuf },
    /// Print the skill index as injected into a system prompt
    Index {
        #[arg(env = "SKILLPACK_SKILLS_DIR")]
        root: Option<PathBuf>,
    },
    /// Report advisory metadata issues
    Check { path: PathBuf },
}

#[derive(Serialize)]
struct SkillSummary<'a> {
    name: &'a str,
    description: &'a str,
    path: &'a Path,
}

impl<'a> From<&'a SkillPackage> for SkillSummary<'a> {
    fn from(pkg: &'a SkillPackage) -> Self {
        Self {
            name: pkg.name(),
            description: pkg.description(),
            path: pkg.path(),
        }
    }
}

/// Run the selected command and return what should be printed.
pub fn execute(cli: &Cli, config: &Config) -> Result<String> {
    let format = cli.format.unwrap_or_else(|| config.output_format());

    match &cli.command {
        Commands::Parse { path, json } => {
            let pkg = load(path)?;
            if *json || format == OutputFormat::Json {
                to_json(&pkg)
            } else {
                Ok(format_parse(&pkg))
            }
        }
        Commands::Detail { path } => {
            let pkg = load(path)?;
            match format {
                OutputFormat::Json => to_json(&pkg),
                OutputFormat::Text => Ok(format_detail(&pkg)),
            }
        }
        Commands::Files { path } => {
            let pkg = load(path)?;
            let files = pkg.files();
            match format {
                OutputFormat::Json => to_json(&files),
                OutputFormat::Text => {
                    let mut lines = vec![format!("Files for skill: {}", pkg.name())];
                    lines.extend(files.iter().map(|f| format!("- {}", f.display())));
                    Ok(lines.join("\n"))
                }
            }
        }
        Commands::List { root } => {
            let index = build_index(root.as_deref(), config)?;
            let skills: Vec<&SkillPackage> = index.all().collect();
            format_listing(&skills, format, "No valid skills found.")
        }
        Commands::Search { query, root } => {
            let index = build_index(root.as_deref(), config)?;
            let hits = index.search(query);
            format_listing(&hits, format, "No matching skills found.")
        }
        Commands::Context { path } => {
            let pkg = load(path)?;
            match format {
                OutputFormat::Json => to_json(&json!({
                    "name": pkg.name(),
                    "context": prompt_context(&pkg),
                })),
                OutputFormat::Text => Ok(prompt_context(&pkg)),
            }
        }
        Commands::Index { root } => {
            let index = build_index(root.as_deref(), config)?;
            Ok(index.format_for_prompt(config.max_prompt_entries()))
        }
        Commands::Check { path } => {
            let pkg = load(path)?;
            let issues: Vec<String> = pkg
                .metadata()
                .lint()
                .iter()
                .map(ToString::to_string)
                .collect();
            match format {
                OutputFormat::Json => to_json(&json!({
                    "name": pkg.name(),
                    "issues": issues,
                })),
                OutputFormat::Text if issues.is_empty() => {
                    Ok(format!("{}: OK", pkg.path().display()))
                }
                OutputFormat::Text => {
                    let mut lines = vec![format!("{}:", pkg.path().display())];
                    lines.extend(issues.iter().map(|i| format!("  - {}", i)));
                    Ok(lines.join("\n"))
                }
            }
        }
    }
}

fn load(path: &Path) -> Result<SkillPackage> {
    load_package(path).with_context(|| format!("failed to parse skill package {}", path.display()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to format output as JSON")
}

/// Explicit root must exist; configured roots are best-effort.
fn build_index(root: Option<&Path>, config: &Config) -> Result<SkillIndex> {
    let roots = match root {
        Some(root) => {
            if !root.is_dir() {
                bail!("could not read skills directory '{}'", root.display());
            }
            vec![root.to_path_buf()]
        }
        None => config.skills_dirs.clone(),
    };
    SkillIndex::build(&roots, config.parallel_discovery()).context("skill discovery failed")
}

fn format_listing(skills: &[&SkillPackage], format: OutputFormat, empty: &str) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let summaries: Vec<SkillSummary> = skills.iter().map(|p| (*p).into()).collect();
            to_json(&summaries)
        }
        OutputFormat::Text if skills.is_empty() => Ok(empty.to_string()),
        OutputFormat::Text => Ok(skills
            .iter()
            .map(|p| format!("- {:<20}: {}", p.name(), p.description()))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn format_parse(pkg: &SkillPackage) -> String {
    let meta = pkg.metadata();
    let mut lines = vec![format!("--- Skill: {} ---", meta.name), String::new()];

    lines.push("[Meta]".to_string());
    lines.push(format!("  Description: {}", meta.description));
    if !meta.model.is_empty() {
        lines.push(format!("  Model: {}", meta.model));
    }
    if !meta.allowed_tools.is_empty() {
        lines.push(format!("  Allowed Tools: {}", meta.allowed_tools.join(", ")));
    }
    lines.push(String::new());

    lines.push("[Body]".to_string());
    lines.extend(outline(pkg.segments()).into_iter().map(|l| format!("  {}", l)));
    lines.push(String::new());

    lines.push("[Resources]".to_string());
    lines.extend(resource_lines(pkg));

    lines.join("\n")
}

fn format_detail(pkg: &SkillPackage) -> String {
    let meta = pkg.metadata();
    let mut lines = vec![
        format!("--- Skill Details: {} ---", meta.name),
        format!("Path: {}", pkg.path().display()),
        format!("Description: {}", meta.description),
        format!("Allowed Tools: {}", meta.allowed_tools.join(", ")),
    ];
    for (label, value) in [
        ("Model", &meta.model),
        ("Author", &meta.author),
        ("Version", &meta.version),
        ("License", &meta.license),
    ] {
        if !value.is_empty() {
            lines.push(format!("{}: {}", label, value));
        }
    }

    lines.push(String::new());
    lines.push("--- SKILL.md Body ---".to_string());
    lines.push(body_markdown(pkg.segments()));

    lines.push(String::new());
    lines.push("--- Resources ---".to_string());
    lines.extend(resource_lines(pkg));

    lines.join("\n")
}

fn resource_lines(pkg: &SkillPackage) -> Vec<String> {
    let resources = pkg.resources();
    if resources.is_empty() {
        return vec!["No resources found.".to_string()];
    }

    let mut lines = Vec::new();
    for category in ResourceCategory::ALL {
        let files = resources.get(category);
        if files.is_empty() {
            continue;
        }
        lines.push(format!("{}:", category));
        lines.extend(files.iter().map(|f| format!("  - {}", f.display())));
    }
    lines
}
