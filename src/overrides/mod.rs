//! Local override subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request target (path + query)
//!     → table.rs (exact lookup in the frozen override table)
//!     → store.rs (read the backing file, if it is there)
//!     → Return: file bytes, or nothing and the request goes upstream
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime (shared via Arc, no locks)
//! - Exact string match only; no prefixes, no patterns
//! - A missing backing file is not an error, it is a fall-through

pub mod store;
pub mod table;

pub use store::read_override;
pub use table::OverrideTable;
