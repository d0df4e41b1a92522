//! Domain types for the command-line and encoding layers
//!
//! This module contains validated newtypes and configuration:
//! - [`Threshold`] - Minimum shares required for reconstruction (2..=255)
//! - [`ShareIndex`] - Zero-based share position (0..=254)
//! - [`ShareCount`] - Total number of shares to create (2..=255)
//! - [`SplitConfig`] - Validated threshold and share count pair

mod config;
mod share_count;
mod share_index;
mod threshold;

pub use config::SplitConfig;
pub use share_count::ShareCount;
pub use share_index::ShareIndex;
pub use threshold::Threshold;
