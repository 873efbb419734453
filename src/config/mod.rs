//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Stake limits and the cart location are externalized here;
//! the domain layer only receives the resulting `StakePolicy`.

pub mod loader;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::{BetMethod, ColumnSelections, HorseNumber, StakePolicy, WagerType};

/// Top-level configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any ticket is evaluated.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Identity and logging.
  pub app: AppSection,
  /// Stake limits.
  #[serde(default)]
  pub stake: StakeConfig,
  /// Cart log location.
  #[serde(default)]
  pub cart: CartConfig,
  /// Selections evaluated by the binary.
  #[serde(default)]
  pub tickets: Vec<TicketConfig>,
}

/// Identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Stake limits in yen.
#[derive(Debug, Clone, Deserialize)]
pub struct StakeConfig {
  /// Per-line amounts must be multiples of this.
  #[serde(default = "default_unit_amount")]
  pub unit_amount: Decimal,
  /// Smallest per-line amount.
  #[serde(default = "default_min_line_amount")]
  pub min_line_amount: Decimal,
  /// Largest per-line amount.
  #[serde(default = "default_max_line_amount")]
  pub max_line_amount: Decimal,
  /// Largest ticket total (lines × amount).
  #[serde(default = "default_max_ticket_total")]
  pub max_ticket_total: Decimal,
}

impl StakeConfig {
  /// Build the domain stake policy.
  pub const fn policy(&self) -> StakePolicy {
    StakePolicy::new(
      self.unit_amount,
      self.min_line_amount,
      self.max_line_amount,
      self.max_ticket_total,
    )
  }
}

impl Default for StakeConfig {
  fn default() -> Self {
    Self {
      unit_amount: default_unit_amount(),
      min_line_amount: default_min_line_amount(),
      max_line_amount: default_max_line_amount(),
      max_ticket_total: default_max_ticket_total(),
    }
  }
}

/// Cart log configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CartConfig {
  /// Directory for JSONL cart logs.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

impl Default for CartConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
    }
  }
}

/// One selection to evaluate.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketConfig {
  /// Optional label used in logs.
  #[serde(default)]
  pub name: Option<String>,
  pub wager_type: WagerType,
  pub method: BetMethod,
  #[serde(default)]
  pub col1: Vec<HorseNumber>,
  #[serde(default)]
  pub col2: Vec<HorseNumber>,
  #[serde(default)]
  pub col3: Vec<HorseNumber>,
  /// Amount per line in yen.
  pub amount: Decimal,
}

impl TicketConfig {
  /// Column selections described by this ticket.
  pub fn selections(&self) -> ColumnSelections {
    ColumnSelections::from_columns(
      self.col1.iter().copied(),
      self.col2.iter().copied(),
      self.col3.iter().copied(),
    )
  }

  /// Name for logs, falling back to `type/method`.
  pub fn display_name(&self) -> String {
    self
      .name
      .clone()
      .unwrap_or_else(|| format!("{}/{}", self.wager_type, self.method))
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_unit_amount() -> Decimal {
  dec!(100)
}

fn default_min_line_amount() -> Decimal {
  dec!(100)
}

fn default_max_line_amount() -> Decimal {
  dec!(100000)
}

fn default_max_ticket_total() -> Decimal {
  dec!(1000000)
}

fn default_data_dir() -> String {
  "data".to_string()
}
