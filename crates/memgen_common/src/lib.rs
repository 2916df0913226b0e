//! Shared foundational types used across the memgen RAM generator.
//!
//! This crate provides the logic-level constants used for tied-off ports and
//! literals, and the internal error type for generator bugs.

#![warn(missing_docs)]

pub mod logic;
pub mod logic_vec;
pub mod result;

pub use logic::Logic;
pub use logic_vec::LogicVec;
pub use result::{GenResult, InternalError};
