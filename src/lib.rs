//! Threshold secret sharing by hyperplane intersection over GF(256)
//!
//! [`split`] turns a secret into N shares, any K of which rebuild it with
//! [`combine`]. The [`codec`] module renders shares as BIP39 word phrases for
//! transport, and [`commands`] glues both together for the command line.

#[cfg(feature = "cli")]
pub mod cli;
pub mod codec;
pub mod commands;
pub mod domain;
pub mod error;
pub mod field;
pub mod sharing;
pub mod solver;

pub use error::{Error, Result, ValidationError};
pub use sharing::{Share, combine, split, split_with_rng};
