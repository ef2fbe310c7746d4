//! PR content generation
//!
//! Titles and descriptions come from the model when an API key is set and
//! from commit/file heuristics otherwise, or when the model fails.

pub mod generator;
pub mod heuristic;
pub mod markdown;
pub mod resources;

pub use generator::{ContentGenerator, GenerationRequest};

/// Which parts of the PR a command produces or saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parts {
    Title,
    Description,
    Both,
}

impl Parts {
    pub fn includes_title(self) -> bool {
        matches!(self, Parts::Title | Parts::Both)
    }

    pub fn includes_description(self) -> bool {
        matches!(self, Parts::Description | Parts::Both)
    }

    /// Whether every part in `other` is also in `self`
    pub fn covers(self, other: Parts) -> bool {
        (!other.includes_title() || self.includes_title())
            && (!other.includes_description() || self.includes_description())
    }

    pub fn name(self) -> &'static str {
        match self {
            Parts::Title => "title",
            Parts::Description => "description",
            Parts::Both => "both",
        }
    }
}

/// Where generated content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Ai,
    Heuristic,
}

/// A generated title and/or description
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub parts: Parts,
    pub title: String,
    pub description: String,
    pub source: ContentSource,
    /// Non-fatal problems hit while generating
    pub warnings: Vec<String>,
    /// Estimated API cost in USD
    pub cost_usd: f64,
}

impl GeneratedContent {
    /// Text for the clipboard: `title\n\ndescription`, or the single part
    pub fn clipboard_text(&self) -> String {
        match self.parts {
            Parts::Title => self.title.clone(),
            Parts::Description => self.description.clone(),
            Parts::Both => format!("{}\n\n{}", self.title, self.description),
        }
    }
}
