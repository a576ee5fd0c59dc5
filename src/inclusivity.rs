use std::str::FromStr;

use crate::prelude::*;

/// Whether a range's bounds count as inside the range during membership
/// tests, written in interval notation: `[]`, `[)`, `(]`, `()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Inclusivity {
    /// Both bounds inside: `[]`
    #[default]
    #[display(fmt = "[]")]
    Closed,
    /// Lower bound inside, upper outside: `[)`
    #[display(fmt = "[)")]
    ClosedOpen,
    /// Lower bound outside, upper inside: `(]`
    #[display(fmt = "(]")]
    OpenClosed,
    /// Both bounds outside: `()`
    #[display(fmt = "()")]
    Open,
}

/// Error for unrecognized inclusivity notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid inclusivity {0:?} (expected \"[]\", \"[)\", \"(]\", or \"()\")")]
pub struct InvalidInclusivity(String);

impl Inclusivity {
    /// True when the lower bound itself counts as inside.
    pub const fn lower_inclusive(self) -> bool {
        matches!(self, Self::Closed | Self::ClosedOpen)
    }

    /// True when the upper bound itself counts as inside.
    pub const fn upper_inclusive(self) -> bool {
        matches!(self, Self::Closed | Self::OpenClosed)
    }
}

impl FromStr for Inclusivity {
    type Err = InvalidInclusivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "[]" => Ok(Self::Closed),
            "[)" => Ok(Self::ClosedOpen),
            "(]" => Ok(Self::OpenClosed),
            "()" => Ok(Self::Open),
            other => Err(InvalidInclusivity(other.to_owned())),
        }
    }
}

impl serde::Serialize for Inclusivity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Inclusivity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
