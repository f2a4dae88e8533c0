#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the Ronda workspace.
//!
//! This crate provides the foundational abstractions shared by the factor,
//! combination and evaluation crates: the date × symbol [`Panel`], the
//! [`Factor`] trait, cross-sectional statistics and the error type.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod factor;
pub mod panel;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use factor::Factor;
pub use panel::Panel;
pub use types::{DATE_FORMAT, Date, Symbol, parse_date};
