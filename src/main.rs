use std::io::{self, BufRead, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use zeroize::Zeroizing;

use blakley::cli::{Cli, Commands};
use blakley::commands::{combine_shares, split_secret};
use blakley::domain::SplitConfig;

/// JSON document printed by `split --json`
#[derive(Serialize)]
struct SplitOutput<'a> {
    threshold: u8,
    share_count: u8,
    shares: &'a [String],
}

/// Read the secret from stdin (hidden input when TTY available)
fn read_secret() -> Result<Zeroizing<Vec<u8>>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter secret:");
        let line =
            Zeroizing::new(rpassword::read_password().context("Failed to read secret from stdin")?);
        Ok(Zeroizing::new(line.as_bytes().to_vec()))
    } else {
        // Piped input is taken verbatim, including any trailing newline
        let mut secret = Zeroizing::new(Vec::new());
        io::stdin()
            .lock()
            .read_to_end(&mut secret)
            .context("Failed to read secret from stdin")?;
        Ok(secret)
    }
}

/// Read shares from stdin, one per line, until an empty line or end of input
fn read_shares() -> Result<Vec<String>> {
    let mut shares = Vec::new();

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter shares (one per line, empty line to finish):");

        loop {
            let share = rpassword::read_password().context("Failed to read share from stdin")?;
            if share.trim().is_empty() {
                break;
            }
            shares.push(share.trim().to_string());
        }
    } else {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read line from stdin")?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            shares.push(trimmed.to_string());
        }
    }

    if shares.is_empty() {
        anyhow::bail!("No shares provided");
    }

    Ok(shares)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            shares,
            threshold,
            json,
        } => {
            let secret = read_secret()?;
            let config = SplitConfig::new(threshold, shares)?;
            let phrases = split_secret(&secret, config)?;

            let mut stdout = io::stdout().lock();
            if json {
                let output = SplitOutput {
                    threshold: *threshold,
                    share_count: *shares,
                    shares: &phrases,
                };
                serde_json::to_writer_pretty(&mut stdout, &output)
                    .context("Failed to serialize shares")?;
                writeln!(stdout)?;
            } else {
                for phrase in &phrases {
                    writeln!(stdout, "{phrase}")?;
                }
            }
        }
        Commands::Combine => {
            let shares = read_shares()?;
            let secret = combine_shares(&shares)?;

            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&secret)
                .context("Failed to write secret to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
