//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;
use crate::domain::catalog;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    tickets = config.tickets.len(),
    unit = %config.stake.unit_amount,
    data_dir = %config.cart.data_dir,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Positive, ordered stake limits
/// - Non-empty cart directory
/// - Tickets naming a countable (wager type, method) pair
fn validate_config(config: &AppConfig) -> Result<()> {
  let stake = &config.stake;

  anyhow::ensure!(
    stake.unit_amount > Decimal::ZERO,
    "unit_amount must be positive, got {}",
    stake.unit_amount
  );
  anyhow::ensure!(
    stake.min_line_amount >= stake.unit_amount,
    "min_line_amount ({}) must be at least unit_amount ({})",
    stake.min_line_amount,
    stake.unit_amount
  );
  anyhow::ensure!(
    stake.min_line_amount <= stake.max_line_amount,
    "min_line_amount ({}) must not exceed max_line_amount ({})",
    stake.min_line_amount,
    stake.max_line_amount
  );
  anyhow::ensure!(
    stake.max_ticket_total >= stake.max_line_amount,
    "max_ticket_total ({}) must be at least max_line_amount ({})",
    stake.max_ticket_total,
    stake.max_line_amount
  );

  anyhow::ensure!(
    !config.cart.data_dir.trim().is_empty(),
    "cart.data_dir must not be empty"
  );

  for (i, ticket) in config.tickets.iter().enumerate() {
    anyhow::ensure!(
      catalog::is_supported(ticket.wager_type, ticket.method),
      "Ticket {} ({}) uses method {} which does not apply to {}",
      i,
      ticket.display_name(),
      ticket.method,
      ticket.wager_type
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;
  use crate::domain::{BetMethod, WagerType};

  const SAMPLE: &str = r#"
[app]
name = "keiba"

[stake]
unit_amount = 100
max_line_amount = 5000
max_ticket_total = 50000

[[tickets]]
name = "trifecta dual axis"
wager_type = "trifecta"
method = "nagashi_12"
col1 = [1]
col2 = [3, 4, 5]
col3 = [2]
amount = 200

[[tickets]]
wager_type = "wide"
method = "box"
col1 = [1, 2, 3]
amount = 100
"#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_parse_sample() {
    let config = parse_config(SAMPLE).unwrap();
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.stake.min_line_amount, dec!(100));
    assert_eq!(config.stake.max_line_amount, dec!(5000));
    assert_eq!(config.cart.data_dir, "data");
    assert_eq!(config.tickets.len(), 2);
    assert_eq!(config.tickets[0].method, BetMethod::Nagashi12);
    assert_eq!(config.tickets[0].amount, dec!(200));
    assert_eq!(config.tickets[1].wager_type, WagerType::QuinellaPlace);
    assert_eq!(config.tickets[1].display_name(), "quinella_place/box");
  }

  #[test]
  fn test_rejects_inapplicable_method() {
    let text = r#"
[app]
name = "keiba"

[[tickets]]
wager_type = "exacta"
method = "nagashi_12"
col1 = [1]
amount = 100
"#;
    let err = parse_config(text).unwrap_err();
    assert!(err.to_string().contains("does not apply"));
  }

  #[test]
  fn test_rejects_inverted_limits() {
    let text = r#"
[app]
name = "keiba"

[stake]
min_line_amount = 1000
max_line_amount = 500
"#;
    assert!(parse_config(text).is_err());
  }

  #[test]
  fn test_rejects_unknown_method() {
    let text = r#"
[app]
name = "keiba"

[[tickets]]
wager_type = "trio"
method = "nagashi_9"
amount = 100
"#;
    assert!(parse_config(text).is_err());
  }
}
