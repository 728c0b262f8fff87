//! Common types used throughout the solver system.

// Re-export commonly used ethereum types
pub use alloy_primitives::{Address, Bytes, B256, U256};

/// Timestamp (Unix seconds)
pub type Timestamp = u64;
