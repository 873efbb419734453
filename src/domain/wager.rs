//! Core wager domain types.
//!
//! Defines the wager types offered on a race, the bet methods that expand
//! a selection into lines, and the concrete wager line itself.
//! These types are the foundation of the hexagonal architecture's inner ring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Saddle-cloth number of a runner. Always `>= 1`.
pub type HorseNumber = u8;

// ────────────────────────────────────────────
// Wager types
// ────────────────────────────────────────────

/// Wager types offered on a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerType {
    /// 1st place.
    Win,
    /// Top 3 (top 2 on small fields).
    Place,
    /// Top 2, any order.
    Quinella,
    /// Any 2 of the top 3, any order. Also known as "wide".
    #[serde(alias = "wide")]
    QuinellaPlace,
    /// Top 2 in exact order.
    Exacta,
    /// Top 3, any order.
    Trio,
    /// Top 3 in exact order.
    Trifecta,
}

impl WagerType {
    /// Every wager type, in display order.
    pub const ALL: [Self; 7] = [
        Self::Win,
        Self::Place,
        Self::Quinella,
        Self::QuinellaPlace,
        Self::Exacta,
        Self::Trio,
        Self::Trifecta,
    ];

    /// Number of horses that make up one wager line.
    pub const fn required_horse_count(self) -> usize {
        match self {
            Self::Win | Self::Place => 1,
            Self::Quinella | Self::QuinellaPlace | Self::Exacta => 2,
            Self::Trio | Self::Trifecta => 3,
        }
    }

    /// Whether finishing order matters.
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Exacta | Self::Trifecta)
    }

    /// Canonical snake-case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Place => "place",
            Self::Quinella => "quinella",
            Self::QuinellaPlace => "quinella_place",
            Self::Exacta => "exacta",
            Self::Trio => "trio",
            Self::Trifecta => "trifecta",
        }
    }
}

impl fmt::Display for WagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WagerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "wide" {
            return Ok(Self::QuinellaPlace);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| DomainError::UnknownWagerType(s.to_string()))
    }
}

// ────────────────────────────────────────────
// Bet methods
// ────────────────────────────────────────────

/// How a selection is expanded into wager lines.
///
/// Digits name the finishing positions an axis horse is pinned to;
/// `_multi` variants let the axis land in any position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BetMethod {
    /// Exact selection, no expansion.
    #[serde(rename = "normal")]
    Normal,
    /// Every combination/permutation of one pool.
    #[serde(rename = "box")]
    Box,
    /// Unordered axis + partners.
    #[serde(rename = "nagashi")]
    Nagashi,
    #[serde(rename = "nagashi_1")]
    Nagashi1,
    /// Axis pinned to 2nd on ordered types; two-horse axis on trio.
    #[serde(rename = "nagashi_2")]
    Nagashi2,
    #[serde(rename = "nagashi_3")]
    Nagashi3,
    /// Exacta axis in either position.
    #[serde(rename = "nagashi_multi")]
    NagashiMulti,
    /// Trifecta single axis in any of the three positions.
    #[serde(rename = "nagashi_1_multi")]
    Nagashi1Multi,
    #[serde(rename = "nagashi_12")]
    Nagashi12,
    #[serde(rename = "nagashi_13")]
    Nagashi13,
    #[serde(rename = "nagashi_23")]
    Nagashi23,
    /// Trifecta two axis horses in any two positions.
    #[serde(rename = "nagashi_2_multi")]
    Nagashi2Multi,
    /// Independent pools per position (or per slot).
    #[serde(rename = "formation")]
    Formation,
}

impl BetMethod {
    /// Every bet method.
    pub const ALL: [Self; 13] = [
        Self::Normal,
        Self::Box,
        Self::Nagashi,
        Self::Nagashi1,
        Self::Nagashi2,
        Self::Nagashi3,
        Self::NagashiMulti,
        Self::Nagashi1Multi,
        Self::Nagashi12,
        Self::Nagashi13,
        Self::Nagashi23,
        Self::Nagashi2Multi,
        Self::Formation,
    ];

    /// Canonical snake-case identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Box => "box",
            Self::Nagashi => "nagashi",
            Self::Nagashi1 => "nagashi_1",
            Self::Nagashi2 => "nagashi_2",
            Self::Nagashi3 => "nagashi_3",
            Self::NagashiMulti => "nagashi_multi",
            Self::Nagashi1Multi => "nagashi_1_multi",
            Self::Nagashi12 => "nagashi_12",
            Self::Nagashi13 => "nagashi_13",
            Self::Nagashi23 => "nagashi_23",
            Self::Nagashi2Multi => "nagashi_2_multi",
            Self::Formation => "formation",
        }
    }
}

impl fmt::Display for BetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| DomainError::UnknownBetMethod(s.to_string()))
    }
}

// ────────────────────────────────────────────
// Wager line
// ────────────────────────────────────────────

/// One concrete, priceable bet.
///
/// `horses` is in finishing order for ordered types and ascending
/// for unordered types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WagerLine {
    pub wager_type: WagerType,
    pub horses: Vec<HorseNumber>,
}

impl WagerLine {
    /// Build a line, normalizing unordered lines to ascending order.
    pub fn new(wager_type: WagerType, mut horses: Vec<HorseNumber>) -> Self {
        if !wager_type.is_ordered() {
            horses.sort_unstable();
        }
        Self { wager_type, horses }
    }
}

impl fmt::Display for WagerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.wager_type.is_ordered() { "-" } else { "=" };
        let joined = self
            .horses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(sep);
        write!(f, "{} {joined}", self.wager_type)
    }
}
