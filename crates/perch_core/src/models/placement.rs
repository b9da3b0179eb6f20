//! Placement side of a tooltip relative to its anchor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PerchError;

/// Side of the anchor the tooltip sits on.
///
/// Parsed from the lowercase names used in markup and config. Any other
/// value is a fatal configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Placement {
    /// Above the anchor
    Top,
    /// Right of the anchor
    Right,
    /// Below the anchor
    #[default]
    Bottom,
    /// Left of the anchor
    Left,
}

/// Axis along which a placement pushes the tooltip away from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal (x)
    X,
    /// Vertical (y)
    Y,
}

impl Placement {
    /// All placements, in clockwise order from the top.
    pub const ALL: [Placement; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side across the anchor.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// The axis the tooltip is offset along.
    pub fn primary_axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// CSS class naming this side.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = PerchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            other => Err(PerchError::invalid_placement(other)),
        }
    }
}

impl TryFrom<String> for Placement {
    type Error = PerchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(placement: Placement) -> Self {
        placement.as_str().to_string()
    }
}
