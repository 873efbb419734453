//! Cart Adapters - Implementations of the CartSink port
//!
//! `MemoryCart` keeps entries in process (tests, previews);
//! `JsonlCartLog` appends them to daily JSONL files.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlCartLog;
pub use memory::MemoryCart;
