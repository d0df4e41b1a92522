use clap::{Parser, Subcommand};

use crate::domain::{ShareCount, Threshold};

/// Validates that threshold is at least 2
/// A threshold of 1 would hand the whole secret to every single share holder
fn validate_threshold(s: &str) -> Result<Threshold, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number between 2 and 255"))?;

    Threshold::new(value).map_err(|e| e.to_string())
}

fn validate_share_count(s: &str) -> Result<ShareCount, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number between 2 and 255"))?;

    ShareCount::new(value).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "blakley")]
#[command(about = "Split secrets into threshold shares by hyperplane intersection over GF(256)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a secret read from stdin into shares
    Split {
        /// Number of shares to create
        #[arg(short, long, value_parser = validate_share_count)]
        shares: ShareCount,

        /// Threshold: minimum number of shares needed to reconstruct (must be >= 2)
        #[arg(short, long, value_parser = validate_threshold)]
        threshold: Threshold,

        /// Print the shares as a JSON document instead of one per line
        #[arg(long)]
        json: bool,
    },
    /// Combine shares read from stdin and write the secret to stdout
    Combine,
}
