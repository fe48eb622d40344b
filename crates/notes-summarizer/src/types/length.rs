//! Summary length presets

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Output length bounds passed to the model, in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min_length: u32,
    pub max_length: u32,
}

/// User-selectable summary length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    /// All presets in display order
    pub const ALL: [SummaryLength; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Token bounds for this preset
    pub const fn bounds(self) -> LengthBounds {
        let (min_length, max_length) = match self {
            Self::Short => (40, 120),
            Self::Medium => (80, 200),
            Self::Long => (120, 300),
        };
        LengthBounds {
            min_length,
            max_length,
        }
    }

    /// Lowercase identifier used in forms and JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Capitalized label for display
    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(Error::InvalidRequest(format!("Unknown summary length: {}", other))),
        }
    }
}
