//! Presentation variants and intensity levels

use crate::error::ThemeError;
use crate::intensity::{self, IntensityParameterTable};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the two mutually exclusive presentation modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationVariant {
    /// Flat, opaque surfaces.
    #[default]
    #[serde(rename = "classic")]
    Classic,
    /// Frosted glass surfaces driven by [`IntensityLevel`].
    #[serde(rename = "liquid-glass")]
    Glass,
}

impl PresentationVariant {
    /// Stable id for storage and config.
    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Glass => "liquid-glass",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Glass => "Liquid Glass",
        }
    }

    pub fn all() -> &'static [PresentationVariant] {
        const VARIANTS: [PresentationVariant; 2] =
            [PresentationVariant::Classic, PresentationVariant::Glass];
        &VARIANTS
    }

    /// The other variant.
    pub fn toggle(self) -> Self {
        match self {
            Self::Classic => Self::Glass,
            Self::Glass => Self::Classic,
        }
    }

    pub fn is_glass(self) -> bool {
        self == Self::Glass
    }

    /// Dense index, used for per-variant tables.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Classic => 0,
            Self::Glass => 1,
        }
    }
}

impl FromStr for PresentationVariant {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "liquid-glass" => Ok(Self::Glass),
            _ => Err(ThemeError::UnknownVariant(s.to_string())),
        }
    }
}

impl Display for PresentationVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Visual strength of glass effects, weakest first.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum IntensityLevel {
    Whisper,
    Light,
    #[default]
    Medium,
    Heavy,
    Extreme,
}

impl IntensityLevel {
    pub fn id(self) -> &'static str {
        match self {
            Self::Whisper => "whisper",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Extreme => "extreme",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Whisper => "Whisper",
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
            Self::Extreme => "Extreme",
        }
    }

    pub fn all() -> &'static [IntensityLevel] {
        const LEVELS: [IntensityLevel; 5] = [
            IntensityLevel::Whisper,
            IntensityLevel::Light,
            IntensityLevel::Medium,
            IntensityLevel::Heavy,
            IntensityLevel::Extreme,
        ];
        &LEVELS
    }

    /// Parameter table for this level.
    pub fn parameters(self) -> &'static IntensityParameterTable {
        intensity::resolve(self)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for IntensityLevel {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|level| level.id() == normalized)
            .ok_or_else(|| ThemeError::UnknownIntensity(s.to_string()))
    }
}

impl Display for IntensityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
