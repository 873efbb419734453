//! In-memory cart.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::ports::cart::{CartEntry, CartReceipt, CartSink};

/// Cart held in process memory, lost on drop.
#[derive(Debug, Default)]
pub struct MemoryCart {
    entries: RwLock<Vec<CartEntry>>,
}

impl MemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total of every entry's `total`.
    pub async fn grand_total(&self) -> rust_decimal::Decimal {
        self.entries.read().await.iter().map(|e| e.total).sum()
    }

    /// Remove every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl CartSink for MemoryCart {
    async fn submit(&self, entry: &CartEntry) -> Result<CartReceipt> {
        let mut entries = self.entries.write().await;
        entries.push(entry.clone());
        debug!(entry_id = %entry.id, cart_size = entries.len(), "Entry added to memory cart");
        Ok(CartReceipt {
            entry_id: entry.id,
            cart_size: entries.len(),
        })
    }

    async fn entries(&self) -> Result<Vec<CartEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{BetMethod, ColumnSelections, WagerType};

    fn entry(total: rust_decimal::Decimal) -> CartEntry {
        CartEntry {
            id: Uuid::new_v4(),
            wager_type: WagerType::Win,
            method: BetMethod::Normal,
            selections: ColumnSelections::from_columns([3], [], []),
            lines: Vec::new(),
            line_count: 1,
            amount_per_line: total,
            total,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_submit_and_list() {
        tokio_test::block_on(async {
            let cart = MemoryCart::new();
            let first = entry(dec!(100));
            let receipt = cart.submit(&first).await.unwrap();
            assert_eq!(receipt.entry_id, first.id);
            assert_eq!(receipt.cart_size, 1);
            cart.submit(&entry(dec!(300))).await.unwrap();
            assert_eq!(cart.entries().await.unwrap().len(), 2);
            assert_eq!(cart.grand_total().await, dec!(400));
            cart.clear().await;
            assert!(cart.entries().await.unwrap().is_empty());
        });
    }
}
