use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-valued answer to a yes/no survey question.
///
/// `Unknown` marks an answer that was present but could not be resolved; rows
/// carrying it on a required flag are dropped during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::True => "true",
            Self::False => "false",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
