//! Tallypad: a calculator input/evaluation engine.
//!
//! Tallypad is the headless core of a calculator: a textual expression
//! buffer that accumulates digit and operator tokens, collapses
//! redundant operators, evaluates on demand, and records results into
//! a bounded history persisted through an injected key-value store.
//! Presentation (buttons, keyboard, rendering) lives outside the crate
//! and drives the engine through its operation set.
//!
//! # Core Concepts
//!
//! - **Buffer**: the live expression text, never empty, defaulting to `"0"`
//! - **Operator collapsing**: a trailing operator is replaced, never stacked
//! - **History**: the last 20 successful evaluations, most recent first
//! - **Stores**: pluggable persistence via the [`store::HistoryStore`] trait
//!
//! # Example
//!
//! ```rust
//! use tallypad::engine::Engine;
//! use tallypad::store::MemoryStore;
//!
//! let mut engine = Engine::new(MemoryStore::new());
//! for token in "7x8".chars() {
//!     engine.append_token(token);
//! }
//! engine.evaluate();
//!
//! assert_eq!(engine.buffer(), "56");
//! assert_eq!(engine.history().newest().unwrap().expression, "7x8");
//! ```
//!
//! Every operation is synchronous and infallible from the caller's
//! perspective: evaluation failures surface as the `"Error"` buffer
//! text, persistence failures are logged (via `tracing`) and absorbed.

pub mod engine;
pub mod eval;
pub mod history;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use engine::{Engine, ERROR_MARKER};
pub use history::{History, HistoryEntry, HISTORY_CAP};
pub use store::{FileStore, HistoryStore, MemoryStore, HISTORY_KEY};
