use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use zeroize::Zeroizing;

use crate::codec;
use crate::domain::{ShareIndex, SplitConfig};
use crate::sharing;

/// Split a secret into hyperplane shares encoded as word phrases
///
/// Returns one phrase per share, in share-index order.
///
/// # Errors
/// Returns an error if the secret is empty, the random source fails, or encoding fails
pub fn split_secret(secret: &[u8], config: SplitConfig) -> Result<Vec<String>> {
    let shares = sharing::split(secret, config.parts(), config.degree())
        .context("Failed to split secret")?;

    let mut phrases = Vec::with_capacity(shares.len());
    for (idx, share) in shares.iter().enumerate() {
        // Safe: idx < share count <= 255
        let idx_u8 = u8::try_from(idx).unwrap_or_else(|_| unreachable!("idx < 255 fits in u8"));
        let phrase = codec::encode_share(share, ShareIndex::new(idx_u8)?)
            .with_context(|| format!("Failed to encode share #{}", idx + 1))?;
        phrases.push(phrase.to_string());
    }

    Ok(phrases)
}

/// Combine encoded shares to reconstruct the secret
///
/// # Errors
/// Returns an error if a phrase fails to decode, the shares disagree on the
/// threshold, a share index repeats, too few shares are given, or the
/// hyperplanes do not intersect in a single point
pub fn combine_shares(phrases: &[String]) -> Result<Zeroizing<Vec<u8>>> {
    if phrases.is_empty() {
        bail!("No shares provided");
    }

    let mut shares = Vec::with_capacity(phrases.len());
    let mut threshold_from_shares = None;
    let mut seen = HashSet::new();

    for (idx, phrase) in phrases.iter().enumerate() {
        let decoded = codec::decode_share(phrase)
            .with_context(|| format!("Failed to parse share #{}", idx + 1))?;

        match threshold_from_shares {
            None => threshold_from_shares = Some(decoded.threshold),
            Some(t) if t != decoded.threshold => {
                bail!(
                    "Share #{} has inconsistent threshold: expected {}, got {}",
                    idx + 1,
                    *t,
                    *decoded.threshold
                );
            }
            Some(_) => {}
        }

        if !seen.insert(decoded.index) {
            bail!(
                "Share #{} duplicates share index {}",
                idx + 1,
                *decoded.index
            );
        }

        shares.push(decoded.share);
    }

    let threshold = threshold_from_shares.context("No valid shares found")?;
    if shares.len() < usize::from(*threshold) {
        bail!(
            "Insufficient shares: need at least {}, but only {} provided",
            *threshold,
            shares.len()
        );
    }

    sharing::combine(&shares).context("Failed to recover secret")
}
