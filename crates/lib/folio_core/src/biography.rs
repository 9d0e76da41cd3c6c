//! Biography document describing the portfolio subject.
//!
//! The document is loaded once at process start and never mutated. A copy is
//! bundled into the binary so the relay works without any files on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_BIOGRAPHY: &str = include_str!("../data/aryan.json");

/// Errors that can occur while loading a biography document.
#[derive(Debug, Error)]
pub enum BiographyError {
    #[error("Failed to read biography: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse biography: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A project entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech: Vec<String>,
}

/// A work experience entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

/// An education entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Structured record of the portfolio subject.
///
/// Top-level fields this type does not know about are kept in `extra` and
/// serialized back unchanged, so the prompt always sees the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biography {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Skill category → skills.
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Biography {
    /// Parse the biography bundled with the crate.
    pub fn embedded() -> Result<Self, BiographyError> {
        Self::from_json(EMBEDDED_BIOGRAPHY)
    }

    /// Read and parse a biography from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BiographyError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a biography from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, BiographyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize with two-space indentation, the form embedded in prompts.
    pub fn to_pretty_json(&self) -> Result<String, BiographyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
