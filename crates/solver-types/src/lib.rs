//! Shared domain types for the OTC settlement solver.
//!
//! This crate defines the venue-agnostic order model, token classification
//! and substitution, and the settlement call descriptions that venue
//! adapters produce.

pub mod account;
pub mod common;
pub mod order;
pub mod settlement;
pub mod tokens;

pub use account::*;
pub use common::*;
pub use order::*;
pub use settlement::*;
pub use tokens::*;
