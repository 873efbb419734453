//! Ticket Builder - Priced Cart Entries from Selections
//!
//! Turns a finalized selection into a `CartEntry`:
//! - Rejects (wager type, method) pairs the engine cannot count
//! - Rejects selections with zero lines
//! - Enforces the stake policy (unit, per-line range, ticket total)
//! - Hands valid entries to the cart port

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
  calculate_bet_count, catalog, enumerate_lines, BetMethod, ColumnSelections, SelectionState,
  StakePolicy, StakeViolation, WagerType,
};
use crate::ports::cart::{CartEntry, CartReceipt, CartSink};

/// Why a selection cannot become a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
  #[error("{wager_type} does not offer method {method}")]
  UnsupportedMethod {
    wager_type: WagerType,
    method: BetMethod,
  },
  #[error("selection produces no wager lines")]
  NoLines,
  #[error(transparent)]
  Stake(#[from] StakeViolation),
}

/// Builds and submits priced tickets.
pub struct TicketBuilder<C: CartSink> {
  /// Cart port.
  cart: Arc<C>,
  /// Stake limits.
  policy: StakePolicy,
}

impl<C: CartSink> TicketBuilder<C> {
  /// Create a builder over a cart with the given stake limits.
  pub const fn new(cart: Arc<C>, policy: StakePolicy) -> Self {
    Self { cart, policy }
  }

  /// Price a selection without submitting it.
  pub fn build(
    &self,
    wager_type: WagerType,
    method: BetMethod,
    selections: &ColumnSelections,
    amount_per_line: Decimal,
  ) -> Result<CartEntry, TicketError> {
    if !catalog::is_supported(wager_type, method) {
      return Err(TicketError::UnsupportedMethod { wager_type, method });
    }

    let line_count = calculate_bet_count(wager_type, method, selections);
    if line_count == 0 {
      return Err(TicketError::NoLines);
    }

    let total = self.policy.price(line_count, amount_per_line)?;
    let lines = enumerate_lines(wager_type, method, selections);
    debug_assert_eq!(lines.len() as u64, line_count);

    Ok(CartEntry {
      id: Uuid::new_v4(),
      wager_type,
      method,
      selections: selections.clone(),
      lines,
      line_count,
      amount_per_line,
      total,
      created_at: Utc::now(),
    })
  }

  /// Price the current state of a selection screen.
  pub fn build_from_state(
    &self,
    state: &SelectionState,
    amount_per_line: Decimal,
  ) -> Result<CartEntry, TicketError> {
    self.build(state.wager_type(), state.method(), state.selections(), amount_per_line)
  }

  /// Price a selection and append it to the cart.
  #[instrument(skip_all, fields(wager_type = %wager_type, method = %method, amount = %amount_per_line))]
  pub async fn submit(
    &self,
    wager_type: WagerType,
    method: BetMethod,
    selections: &ColumnSelections,
    amount_per_line: Decimal,
  ) -> Result<CartReceipt> {
    let entry = match self.build(wager_type, method, selections, amount_per_line) {
      Ok(entry) => entry,
      Err(e) => {
        warn!(error = %e, "Ticket rejected");
        return Err(e.into());
      }
    };

    debug!(entry_id = %entry.id, lines = entry.line_count, "Ticket priced");
    let receipt = self.cart.submit(&entry).await?;

    info!(
      entry_id = %receipt.entry_id,
      lines = entry.line_count,
      total = %entry.total,
      cart_size = receipt.cart_size,
      "Ticket added to cart"
    );
    Ok(receipt)
  }

  /// Stake limits in use.
  pub const fn policy(&self) -> &StakePolicy {
    &self.policy
  }
}
