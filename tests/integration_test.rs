//! Integration Tests - Selection to Cart
//!
//! Drives the selection state manager, the calculator and the ticket
//! use case together. Uses mockall for the cart port and tokio::test
//! for async tests.

use std::sync::Arc;

use mockall::mock;
use rust_decimal_macros::dec;

use keiba_bet_engine::adapters::cart::MemoryCart;
use keiba_bet_engine::domain::{
    calculate_bet_count, enumerate_lines, BetMethod, Column, ColumnSelections, SelectionState,
    StakePolicy, WagerType,
};
use keiba_bet_engine::ports::cart::{CartEntry, CartReceipt, CartSink};
use keiba_bet_engine::usecases::ticket_builder::TicketBuilder;

// ---- Mock Definitions ----

mock! {
    pub Cart {}

    #[async_trait::async_trait]
    impl CartSink for Cart {
        async fn submit(&self, entry: &CartEntry) -> anyhow::Result<CartReceipt>;
        async fn entries(&self) -> anyhow::Result<Vec<CartEntry>>;
        async fn is_healthy(&self) -> bool;
    }
}

fn state_with(
    wager_type: WagerType,
    method: BetMethod,
    picks: &[(u8, Column)],
) -> SelectionState {
    let mut state = SelectionState::new(wager_type, method);
    for &(horse, column) in picks {
        state.toggle(horse, column);
    }
    state
}

fn horses(state: &SelectionState) -> Vec<Vec<u8>> {
    state.lines().into_iter().map(|l| l.horses).collect()
}

// ---- End-to-end scenarios ----

#[test]
fn test_win_normal_single_line() {
    let state = state_with(WagerType::Win, BetMethod::Normal, &[(7, Column::Col1)]);
    assert_eq!(state.bet_count(), 1);
    assert_eq!(horses(&state), vec![vec![7]]);
}

#[test]
fn test_quinella_nagashi_three_lines() {
    let state = state_with(
        WagerType::Quinella,
        BetMethod::Nagashi,
        &[
            (1, Column::Col1),
            (2, Column::Col2),
            (3, Column::Col2),
            (4, Column::Col2),
        ],
    );
    assert_eq!(state.bet_count(), 3);
    assert_eq!(horses(&state), vec![vec![1, 2], vec![1, 3], vec![1, 4]]);
}

#[test]
fn test_trifecta_nagashi_12_three_lines() {
    let state = state_with(
        WagerType::Trifecta,
        BetMethod::Nagashi12,
        &[
            (1, Column::Col1),
            (2, Column::Col3),
            (3, Column::Col2),
            (4, Column::Col2),
            (5, Column::Col2),
        ],
    );
    assert_eq!(state.bet_count(), 3);
    assert_eq!(
        horses(&state),
        vec![vec![1, 3, 2], vec![1, 4, 2], vec![1, 5, 2]]
    );
}

#[test]
fn test_axis_pick_moves_horse_out_of_partners() {
    let mut state = state_with(
        WagerType::Trio,
        BetMethod::Nagashi,
        &[(1, Column::Col2), (2, Column::Col2), (3, Column::Col2)],
    );
    assert_eq!(state.bet_count(), 0);
    state.toggle(1, Column::Col1);
    assert!(!state.selections().contains(Column::Col2, 1));
    assert_eq!(state.bet_count(), 1);
    state.toggle(4, Column::Col2);
    assert_eq!(state.bet_count(), 3);
}

#[test]
fn test_switching_method_discards_columns() {
    let mut state = state_with(
        WagerType::Exacta,
        BetMethod::Formation,
        &[(1, Column::Col1), (2, Column::Col2)],
    );
    assert_eq!(state.bet_count(), 1);
    state.set_context(WagerType::Exacta, BetMethod::Box);
    assert_eq!(state.bet_count(), 0);
    assert!(state.selections().is_empty());
}

#[test]
fn test_formation_examples() {
    let quinella = ColumnSelections::from_columns([1, 2], [2, 3], []);
    assert_eq!(calculate_bet_count(WagerType::Quinella, BetMethod::Formation, &quinella), 3);

    let trifecta = ColumnSelections::from_columns([1, 2], [2, 3], [3, 4]);
    assert_eq!(calculate_bet_count(WagerType::Trifecta, BetMethod::Formation, &trifecta), 4);
    assert_eq!(enumerate_lines(WagerType::Trifecta, BetMethod::Formation, &trifecta).len(), 4);
}

// ---- Cart hand-off ----

#[tokio::test]
async fn test_ticket_submitted_to_cart_port() {
    let mut cart = MockCart::new();
    cart.expect_submit()
        .withf(|entry: &CartEntry| {
            entry.wager_type == WagerType::Trifecta
                && entry.line_count == 3
                && entry.total == dec!(600)
                && entry.lines.len() == 3
        })
        .times(1)
        .returning(|entry| {
            Ok(CartReceipt {
                entry_id: entry.id,
                cart_size: 1,
            })
        });

    let builder = TicketBuilder::new(Arc::new(cart), StakePolicy::default());
    let state = state_with(
        WagerType::Trifecta,
        BetMethod::Nagashi13,
        &[
            (4, Column::Col1),
            (6, Column::Col3),
            (1, Column::Col2),
            (2, Column::Col2),
            (3, Column::Col2),
        ],
    );
    let receipt = builder
        .submit(state.wager_type(), state.method(), state.selections(), dec!(200))
        .await
        .unwrap();
    assert_eq!(receipt.cart_size, 1);
}

#[tokio::test]
async fn test_incomplete_selection_never_reaches_cart() {
    let mut cart = MockCart::new();
    cart.expect_submit().times(0);

    let builder = TicketBuilder::new(Arc::new(cart), StakePolicy::default());
    let state = state_with(WagerType::Trifecta, BetMethod::Nagashi2Multi, &[(1, Column::Col1)]);
    let result = builder
        .submit(state.wager_type(), state.method(), state.selections(), dec!(100))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cart_failure_propagates() {
    let mut cart = MockCart::new();
    cart.expect_submit()
        .returning(|_| Err(anyhow::anyhow!("purchase channel unavailable")));

    let builder = TicketBuilder::new(Arc::new(cart), StakePolicy::default());
    let sel = ColumnSelections::from_columns([3, 8], [], []);
    let err = builder
        .submit(WagerType::QuinellaPlace, BetMethod::Normal, &sel, dec!(100))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unavailable"));
}

#[tokio::test]
async fn test_total_cap_enforced_before_cart() {
    let mut cart = MockCart::new();
    cart.expect_submit().times(0);

    let policy = StakePolicy::new(dec!(100), dec!(100), dec!(10000), dec!(10000));
    let builder = TicketBuilder::new(Arc::new(cart), policy);
    // 18-horse trifecta box is 4896 lines
    let sel = ColumnSelections::from_columns(1..=18, [], []);
    let result = builder
        .submit(WagerType::Trifecta, BetMethod::Box, &sel, dec!(100))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_memory_cart_collects_entries() {
    let cart = Arc::new(MemoryCart::new());
    let builder = TicketBuilder::new(Arc::clone(&cart), StakePolicy::default());

    let exacta = state_with(
        WagerType::Exacta,
        BetMethod::NagashiMulti,
        &[(5, Column::Col1), (1, Column::Col2), (2, Column::Col2)],
    );
    builder
        .submit(exacta.wager_type(), exacta.method(), exacta.selections(), dec!(100))
        .await
        .unwrap();

    let trio = state_with(
        WagerType::Trio,
        BetMethod::Box,
        &[(1, Column::Col1), (2, Column::Col1), (3, Column::Col1), (4, Column::Col1)],
    );
    builder
        .submit(trio.wager_type(), trio.method(), trio.selections(), dec!(300))
        .await
        .unwrap();

    let entries = cart.entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].line_count, 4);
    assert_eq!(entries[1].line_count, 4);
    assert_eq!(cart.grand_total().await, dec!(1600));
}
