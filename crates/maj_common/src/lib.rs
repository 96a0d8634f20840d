//! Shared foundational types used across the majority synthesis workspace.
//!
//! This crate provides the internal-error result type and content hashing
//! used to fingerprint synthesized logic models.

#![warn(missing_docs)]

pub mod hash;
pub mod result;

pub use hash::ContentHash;
pub use result::{InternalError, MajResult};
