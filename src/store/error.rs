//! Store error types.

use thiserror::Error;

/// Errors that can occur while talking to a history store.
///
/// The engine treats every store failure as non-fatal: it logs and
/// carries on with its in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be mapped to a record location
    #[error("invalid store key {0:?}")]
    InvalidKey(String),

    /// Reading or writing the backing file failed
    #[error("I/O failure for key {key:?}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
