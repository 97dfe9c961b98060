//! Version comparison and update evaluation
//!
//! The only piece of real logic in this tool: deciding whether a latest
//! version string is strictly newer than the current one.
//!
//! # Modules
//!
//! - [`compare`]: dotted-integer release comparison with zero-padding
//! - [`evaluator`]: update decision built on top of the comparison

pub mod compare;
pub mod evaluator;
