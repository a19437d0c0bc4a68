//! Body segmentation: turns the SKILL.md body into typed segments.
//!
//! The body is scanned once, line by line. Three marker lines are recognized
//! outside of code fences:
//!
//! ```text
//! [Title]: <text>
//! [Section]: title: "<title>"
//! This is the implementation in <language>
//! ```
//!
//! Everything else accumulates as plain markdown. Text following a section
//! marker becomes that section's content. An implementation marker swallows
//! the fenced block right after it.
//!
//! Fence tracking is a plain toggle on any line starting with three
//! backticks. A stray fence in prose flips the state for the rest of the
//! document; that is how the format is defined.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Fence token that opens and closes a code block.
pub const FENCE: &str = "```";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[Title\]\s*:\s*(.*)$").expect("valid title regex"));
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[Section\]\s*:\s*title:\s*"(.*)""#).expect("valid section regex")
});
static IMPLEMENTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^This is the implementation in (.+)$").expect("valid implementation regex")
});

/// One typed unit of a skill body, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum BodySegment {
    Title { text: String },
    Section { title: String, content: String },
    Markdown { content: String },
    Implementation { language: String, code: String },
}

impl BodySegment {
    /// Discriminator used in the serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            BodySegment::Title { .. } => "Title",
            BodySegment::Section { .. } => "Section",
            BodySegment::Markdown { .. } => "Markdown",
            BodySegment::Implementation { .. } => "Implementation",
        }
    }
}

/// Where the scan is relative to an implementation block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ImplementationScan {
    #[default]
    Idle,
    /// Saw the marker, expecting the opening fence.
    AwaitingFence { language: String },
    /// Inside the implementation's fenced block.
    Collecting { language: String, code: String },
}

/// Explicit scanner state, advanced one line at a time.
#[derive(Debug, Default)]
pub struct SegmenterState {
    open_fence: bool,
    buffer: String,
    segments: Vec<BodySegment>,
    implementation: ImplementationScan,
}

impl SegmenterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a plain (non-implementation) fence is open.
    #[cfg(test)]
    fn in_fence(&self) -> bool {
        self.open_fence
    }

    /// Segments emitted so far.
    pub fn segments(&self) -> &[BodySegment] {
        &self.segments
    }

    /// Feed one line (without its terminator).
    pub fn step(&mut self, line: &str) {
        match std::mem::take(&mut self.implementation) {
            ImplementationScan::Idle => self.step_text(line),
            ImplementationScan::AwaitingFence { language } => {
                if line.starts_with(FENCE) {
                    self.implementation = ImplementationScan::Collecting {
                        language,
                        code: String::new(),
                    };
                } else if line.trim().is_empty() {
                    self.implementation = ImplementationScan::AwaitingFence { language };
                } else {
                    // No block follows the marker.
                    self.segments.push(BodySegment::Implementation {
                        language,
                        code: String::new(),
                    });
                    self.step_text(line);
                }
            }
            ImplementationScan::Collecting { language, mut code } => {
                if line.starts_with(FENCE) {
                    self.segments
                        .push(BodySegment::Implementation { language, code });
                } else {
                    code.push_str(line);
                    code.push('\n');
                    self.implementation = ImplementationScan::Collecting { language, code };
                }
            }
        }
    }

    fn step_text(&mut self, line: &str) {
        if line.starts_with(FENCE) {
            self.open_fence = !self.open_fence;
            self.push_line(line);
            return;
        }

        if self.open_fence {
            self.push_line(line);
            return;
        }

        if let Some(caps) = TITLE_RE.captures(line) {
            self.flush();
            self.segments.push(BodySegment::Title {
                text: caps[1].trim_end().to_string(),
            });
        } else if let Some(caps) = SECTION_RE.captures(line) {
            self.flush();
            self.segments.push(BodySegment::Section {
                title: caps[1].to_string(),
                content: String::new(),
            });
        } else if let Some(caps) = IMPLEMENTATION_RE.captures(line) {
            self.flush();
            self.implementation = ImplementationScan::AwaitingFence {
                language: caps[1].trim().to_string(),
            };
        } else {
            self.push_line(line);
        }
    }

    fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Move buffered text into a pending section, or emit it as markdown.
    fn flush(&mut self) {
        let content = self.buffer.trim().to_string();
        self.buffer.clear();
        if content.is_empty() {
            return;
        }

        if let Some(BodySegment::Section { content: pending, .. }) = self.segments.last_mut() {
            if pending.is_empty() {
                *pending = content;
                return;
            }
        }
        self.segments.push(BodySegment::Markdown { content });
    }

    /// End of input: close any dangling implementation and flush the buffer.
    pub fn finish(mut self) -> Vec<BodySegment> {
        match std::mem::take(&mut self.implementation) {
            ImplementationScan::Idle => {}
            ImplementationScan::AwaitingFence { language } => {
                self.segments.push(BodySegment::Implementation {
                    language,
                    code: String::new(),
                });
            }
            ImplementationScan::Collecting { language, code } => {
                self.segments
                    .push(BodySegment::Implementation { language, code });
            }
        }
        self.flush();
        self.segments
    }
}

/// Segment a (trimmed) body. Deterministic; empty input gives no segments.
pub fn segment_body(body: &str) -> Vec<BodySegment> {
    let mut state = SegmenterState::new();
    for line in body.lines() {
        state.step(line);
    }
    state.finish()
}
