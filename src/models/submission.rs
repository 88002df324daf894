//! Submission model

use serde::{Deserialize, Serialize};

use crate::constants::languages;

/// Programming language of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python3,
    Javascript,
    Julia,
    C,
}

impl Language {
    /// Parse a language tag as it appears on the wire
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            languages::PYTHON3 => Some(Self::Python3),
            languages::JAVASCRIPT => Some(Self::Javascript),
            languages::JULIA => Some(Self::Julia),
            languages::C => Some(Self::C),
            _ => None,
        }
    }

    /// Render the wire tag for this language
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Python3 => languages::PYTHON3,
            Self::Javascript => languages::JAVASCRIPT,
            Self::Julia => languages::JULIA,
            Self::C => languages::C,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// A single client request: user code, language tag, and problem key.
/// Discarded once the report for it has been returned.
#[derive(Debug, Clone)]
pub struct Submission {
    pub language: Language,
    pub source: Vec<u8>,
    pub problem: String,
}
