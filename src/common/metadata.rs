use std::ops::{Deref, Not};
use std::str::FromStr;

use super::error::{QRError, QRResult};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub(crate) const fn new_unchecked(version: usize) -> Self {
        debug_assert!(1 <= version && version <= 40, "Invalid version");
        Self(version)
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        21 + 4 * (self.0 - 1)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 - 1
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


// Error correction level
//------------------------------------------------------------------------------

/// Error tolerance of a symbol. `L`, `M`, `Q` and `H` are also known as very low (~7%),
/// low (~15%), medium (~25%) and high (~30%) tolerance respectively.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    #[default]
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Strongest level first.
    pub const DESCENDING: [ECLevel; 4] = [ECLevel::H, ECLevel::Q, ECLevel::M, ECLevel::L];

    /// Two bit indicator used by the format information, ISO/IEC 18004 Table 12.
    pub const fn format_indicator(self) -> u8 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "verylow" => Ok(Self::L),
            "m" | "low" => Ok(Self::M),
            "q" | "medium" => Ok(Self::Q),
            "h" | "high" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}


// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Color {
    #[default]
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
