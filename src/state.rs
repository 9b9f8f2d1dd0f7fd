//! Base trait for container state snapshots.

/// Marker trait for state snapshot values.
///
/// Snapshots should be:
/// - Immutable (Clone to create successor states, never mutate in place)
/// - Self-contained (all data a consumer needs to act on the container)
/// - Shareable (snapshots are handed out behind `Arc` to concurrent readers)
pub trait State: Clone + Send + Sync + 'static {}
