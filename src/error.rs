//! Library error types.

use thiserror::Error;

/// Errors surfaced to the host.
///
/// Unregistered action kinds are deliberately absent: they resolve to
/// identity transitions, not failures. Reducer panics are not caught and
/// propagate to the dispatching caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A binding lookup ran without a live snapshot/dispatch pair.
    #[error("container '{container}' is not initialized: no live store has been provided")]
    ContainerNotInitialized { container: &'static str },
}
