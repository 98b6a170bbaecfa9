//! Prefix-qualified identifiers for project elements.
//!
//! Random ids are `"{prefix}-{uuid v4}"`, so repeated calls never collide
//! without any shared registry. Sequential ids take a counter owned by the
//! caller.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{ModelError, Result};

/// Element types that can be given an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Project,
    Sequence,
    Track,
    ClipItem,
    File,
    Effect,
    Media,
}

impl ElementType {
    /// Prefix used in generated ids.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Sequence => "sequence",
            Self::Track => "track",
            Self::ClipItem => "clipitem",
            Self::File => "file",
            Self::Effect => "effect",
            Self::Media => "media",
        }
    }

    /// Generate a random, globally unique id for this element type.
    #[must_use]
    pub fn random_id(&self) -> String {
        format!("{}-{}", self.prefix(), Uuid::new_v4())
    }

    /// Generate `"{prefix}-{counter}"`.
    #[must_use]
    pub fn sequential_id(&self, counter: u64) -> String {
        format!("{}-{counter}", self.prefix())
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for ElementType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "sequence" => Ok(Self::Sequence),
            "track" => Ok(Self::Track),
            "clipitem" => Ok(Self::ClipItem),
            "file" => Ok(Self::File),
            "effect" => Ok(Self::Effect),
            "media" => Ok(Self::Media),
            _ => Err(ModelError::UnrecognizedElementType {
                element_type: s.to_string(),
            }),
        }
    }
}

/// Generate a unique id for the named element type.
///
/// # Errors
///
/// Returns [`ModelError::UnrecognizedElementType`] when `element_type` has
/// no known prefix.
pub fn generate_id(element_type: &str) -> Result<String> {
    let kind = parse_element_type(element_type)?;
    let id = kind.random_id();
    debug!(%id, element_type, "generated id");
    Ok(id)
}

/// Generate a sequential id from an externally held counter.
///
/// # Errors
///
/// Returns [`ModelError::UnrecognizedElementType`] when `element_type` has
/// no known prefix.
pub fn generate_sequential_id(element_type: &str, counter: u64) -> Result<String> {
    let kind = parse_element_type(element_type)?;
    let id = kind.sequential_id(counter);
    debug!(%id, element_type, "generated sequential id");
    Ok(id)
}

fn parse_element_type(element_type: &str) -> Result<ElementType> {
    element_type.parse().inspect_err(|_| {
        error!(element_type, "unknown element type for ID generation");
    })
}

/// Caller-owned counter for sequential ids.
///
/// Each counter starts at 1 and is independent of every other counter.
#[derive(Debug, Clone)]
pub struct IdCounter {
    kind: ElementType,
    next: u64,
}

impl IdCounter {
    pub fn new(kind: ElementType) -> Self {
        Self { kind, next: 1 }
    }

    /// Return the next id and advance the counter.
    pub fn next_id(&mut self) -> String {
        let id = self.kind.sequential_id(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_random_ids_are_unique_and_prefixed() {
        let ids: HashSet<String> = (0..10_000)
            .map(|_| generate_id("file").unwrap())
            .collect();
        assert_eq!(ids.len(), 10_000);
        assert!(ids.iter().all(|id| id.starts_with("file-")));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let id = generate_id("ClipItem").unwrap();
        assert!(id.starts_with("clipitem-"));
    }

    #[test]
    fn test_unknown_element_type_is_rejected() {
        let err = generate_id("transition").unwrap_err();
        assert!(matches!(
            err,
            ModelError::UnrecognizedElementType { ref element_type } if element_type == "transition"
        ));
        assert!(generate_sequential_id("", 1).is_err());
    }

    #[test]
    fn test_sequential_ids() {
        assert_eq!(generate_sequential_id("sequence", 7).unwrap(), "sequence-7");

        let mut files = IdCounter::new(ElementType::File);
        let mut clips = IdCounter::new(ElementType::ClipItem);
        assert_eq!(files.next_id(), "file-1");
        assert_eq!(files.next_id(), "file-2");
        assert_eq!(clips.next_id(), "clipitem-1");
    }
}
