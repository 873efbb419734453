//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure (file I/O, in-process storage).
//!
//! Adapter categories:
//! - `cart`: In-memory cart and JSONL cart log

pub mod cart;
