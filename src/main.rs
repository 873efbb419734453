//! Keiba Bet Engine - Entry Point
//!
//! Evaluates the tickets listed in the configuration and appends the
//! valid ones to the JSONL cart log.
//!
//! Wiring sequence:
//! 1. Load config.toml (path from the first argument) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the JSONL cart log
//! 4. Replay each ticket through the selection state manager
//! 5. Count, enumerate, price and submit

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use keiba_bet_engine::adapters::cart::JsonlCartLog;
use keiba_bet_engine::config::{self, TicketConfig};
use keiba_bet_engine::domain::{Column, SelectionState};
use keiba_bet_engine::ports::cart::CartSink;
use keiba_bet_engine::usecases::ticket_builder::TicketBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = config::loader::load_config(&path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.app.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        tickets = config.tickets.len(),
        "Starting Keiba Bet Engine"
    );

    // ── 3. Open the cart log ────────────────────────────────
    let cart = Arc::new(
        JsonlCartLog::new(&config.cart.data_dir)
            .await
            .context("Failed to open cart log")?,
    );
    if !cart.is_healthy().await {
        warn!(dir = %config.cart.data_dir, "Cart directory is not writable");
    }
    let builder = TicketBuilder::new(Arc::clone(&cart), config.stake.policy());

    // ── 4-5. Evaluate tickets ───────────────────────────────
    let mut accepted = 0usize;
    for ticket in &config.tickets {
        let state = replay(ticket);
        let name = ticket.display_name();

        if state.selections() != &ticket.selections() {
            warn!(
                ticket = %name,
                "Some picks were dropped by column limits or axis/partner exclusion"
            );
        }

        let lines = state.lines();
        info!(
            ticket = %name,
            count = state.bet_count(),
            lines = %lines.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            "Selection evaluated"
        );

        match builder
            .submit(state.wager_type(), state.method(), state.selections(), ticket.amount)
            .await
        {
            Ok(_) => accepted += 1,
            Err(e) => warn!(ticket = %name, error = %e, "Ticket not added"),
        }
    }

    info!(
        accepted,
        rejected = config.tickets.len() - accepted,
        "Done"
    );
    Ok(())
}

/// Feed a ticket's columns through the selection state manager, as a UI would.
fn replay(ticket: &TicketConfig) -> SelectionState {
    let mut state = SelectionState::new(ticket.wager_type, ticket.method);
    let columns = [
        (Column::Col1, &ticket.col1),
        (Column::Col2, &ticket.col2),
        (Column::Col3, &ticket.col3),
    ];
    for (column, horses) in columns {
        for &horse in horses {
            if !state.selections().contains(column, horse) {
                state.toggle(horse, column);
            }
        }
    }
    state
}
