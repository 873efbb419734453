//! Domain layer - Core betting logic and models.
//!
//! This module contains the pure bet-combination engine: wager types,
//! the selection state manager, the line calculator and the method catalog.
//! No I/O and no logging here (hexagonal architecture inner ring).

pub mod calculator;
pub mod catalog;
pub mod combinatorics;
pub mod selection;
pub mod stake;
pub mod wager;

use thiserror::Error;

// Re-export core types for convenience
pub use calculator::{calculate_bet_count, enumerate_lines, CountingRule};
pub use catalog::MethodEntry;
pub use selection::{Column, ColumnConfig, ColumnRole, ColumnSelections, SelectionShape, SelectionState};
pub use stake::{StakePolicy, StakeViolation};
pub use wager::{BetMethod, HorseNumber, WagerLine, WagerType};

/// Errors raised when parsing domain identifiers.
///
/// Counting and toggling never fail; only text input can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown wager type: {0}")]
    UnknownWagerType(String),
    #[error("unknown bet method: {0}")]
    UnknownBetMethod(String),
}
