//! Fixed organisational teams tasks are assigned to.

use super::ParseTeamError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organisational category a task belongs to.
///
/// Teams are a fixed enumeration, orthogonal to the status workflow. The
/// team code doubles as the prefix of every task code allocated for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    /// Requirements elicitation.
    Requirements,
    /// Design and UX.
    Design,
    /// Development.
    Development,
    /// Testing and QA.
    Testing,
}

impl Team {
    /// All teams, in board display order.
    pub const ALL: [Self; 4] = [
        Self::Requirements,
        Self::Design,
        Self::Development,
        Self::Testing,
    ];

    /// Returns the canonical short code used in task codes and storage.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Requirements => "REQ",
            Self::Design => "DES",
            Self::Development => "DEV",
            Self::Testing => "TES",
        }
    }

    /// Returns the human-readable team name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Requirements => "Requirements Elicitation",
            Self::Design => "Design & UX",
            Self::Development => "Development",
            Self::Testing => "Testing & QA",
        }
    }
}

impl TryFrom<&str> for Team {
    type Error = ParseTeamError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "REQ" => Ok(Self::Requirements),
            "DES" => Ok(Self::Design),
            "DEV" => Ok(Self::Development),
            "TES" => Ok(Self::Testing),
            _ => Err(ParseTeamError(value.to_owned())),
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
