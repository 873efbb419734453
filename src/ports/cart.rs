//! Cart Port - Wager Cart Submission Interface
//!
//! Defines the trait through which finalized tickets leave the engine.
//! The purchase channel behind it (HTTP broker, settlement, loss limits)
//! is outside this crate; adapters only need to accept entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BetMethod, ColumnSelections, WagerLine, WagerType};

/// A priced ticket ready for the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
  /// Unique entry identifier.
  pub id: Uuid,
  /// Wager type of every line.
  pub wager_type: WagerType,
  /// Method the lines were expanded with.
  pub method: BetMethod,
  /// Selection the lines came from.
  pub selections: ColumnSelections,
  /// Enumerated wager lines.
  pub lines: Vec<WagerLine>,
  /// Number of lines (always `lines.len()`).
  pub line_count: u64,
  /// Amount per line in yen.
  pub amount_per_line: Decimal,
  /// `line_count × amount_per_line`.
  pub total: Decimal,
  /// When the entry was built.
  pub created_at: DateTime<Utc>,
}

/// Acknowledgement from a cart sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartReceipt {
  /// Entry that was accepted.
  pub entry_id: Uuid,
  /// Number of entries in the cart after this one.
  pub cart_size: usize,
}

/// Trait for cart providers.
#[async_trait]
pub trait CartSink: Send + Sync + 'static {
  /// Append an entry to the cart.
  async fn submit(&self, entry: &CartEntry) -> anyhow::Result<CartReceipt>;

  /// All entries currently in the cart, oldest first.
  async fn entries(&self) -> anyhow::Result<Vec<CartEntry>>;

  /// Check if the cart backend is usable.
  async fn is_healthy(&self) -> bool;
}
