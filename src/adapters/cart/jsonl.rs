//! Cart Log - Append-only JSONL Cart Entries
//!
//! Persists cart entries to daily JSONL files in the format
//! `cart/YYYY-MM-DD.jsonl`. Each line is a self-contained JSON
//! record, so a partial write loses at most one entry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::ports::cart::{CartEntry, CartReceipt, CartSink};

/// Append-only JSONL cart log with daily file rotation.
pub struct JsonlCartLog {
    /// Directory holding the daily files.
    cart_dir: PathBuf,
    /// Entries written so far, including those found at startup.
    count: AtomicUsize,
}

impl JsonlCartLog {
    /// Open (or create) the cart log under `data_dir/cart`.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let cart_dir = Path::new(data_dir).join("cart");

        fs::create_dir_all(&cart_dir)
            .await
            .context("Failed to create cart directory")?;

        let existing = read_entries(&cart_dir).await?.len();
        info!(dir = %cart_dir.display(), existing, "Cart log opened");

        Ok(Self {
            cart_dir,
            count: AtomicUsize::new(existing),
        })
    }
}

#[async_trait]
impl CartSink for JsonlCartLog {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, lines = entry.line_count))]
    async fn submit(&self, entry: &CartEntry) -> Result<CartReceipt> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let path = self.cart_dir.join(format!("{date}.jsonl"));

        let mut json = serde_json::to_string(entry)
            .context("Failed to serialize cart entry")?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .context("Failed to open cart log file")?;

        file.write_all(json.as_bytes())
            .await
            .context("Failed to write cart entry")?;

        file.flush().await.context("Failed to flush cart log")?;

        let cart_size = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CartReceipt {
            entry_id: entry.id,
            cart_size,
        })
    }

    #[instrument(skip(self))]
    async fn entries(&self) -> Result<Vec<CartEntry>> {
        let entries = read_entries(&self.cart_dir).await?;
        info!(count = entries.len(), "Loaded cart entries");
        Ok(entries)
    }

    async fn is_healthy(&self) -> bool {
        let test_path = self.cart_dir.join(".health_check");
        let result = fs::write(&test_path, b"ok").await;
        let _ = fs::remove_file(&test_path).await;
        result.is_ok()
    }
}

/// Every entry from every daily file, oldest first. Malformed lines are skipped.
async fn read_entries(cart_dir: &Path) -> Result<Vec<CartEntry>> {
    let mut entries = Vec::new();
    let mut dir = fs::read_dir(cart_dir)
        .await
        .with_context(|| format!("Failed to read {}", cart_dir.display()))?;

    while let Some(item) = dir.next_entry().await? {
        let path = item.path();
        if path.extension().is_none_or(|ext| ext != "jsonl") {
            continue;
        }
        let content = fs::read_to_string(&path).await?;
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CartEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(
                        file = %path.display(),
                        error = %e,
                        "Skipping malformed cart entry"
                    );
                }
            }
        }
    }

    entries.sort_by_key(|e| e.created_at);
    Ok(entries)
}
