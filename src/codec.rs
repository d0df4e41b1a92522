//! Word-phrase encoding for hyperplane shares
//!
//! A share travels as a single line of BIP39 English words:
//!
//! ```text
//! blakley <parameter words> <data words>
//! ```
//!
//! - The version word `"blakley"` identifies the format.
//! - Parameter words carry the threshold K and the share index, five bits of
//!   each per word, with the top bit of the 11-bit word marking continuation.
//! - Data words carry `row_count (u16 BE) || rows || CRC32 (u32 BE)`, where
//!   `rows` is the share matrix flattened row by row (K bytes per row) and the
//!   checksum covers everything before it. The bit string is left-padded with
//!   zeros to a multiple of 11 bits.
//!
//! # Examples
//!
//! ```rust
//! use blakley::codec::{decode_share, encode_share};
//! use blakley::domain::ShareIndex;
//! use blakley::split;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let shares = split(b"hello", 4, 3)?;
//! let phrase = encode_share(&shares[1], ShareIndex::new(1)?)?;
//! assert!(phrase.as_str().starts_with("blakley "));
//!
//! let decoded = decode_share(phrase.as_str())?;
//! assert_eq!(*decoded.threshold, 3);
//! assert_eq!(*decoded.index, 1);
//! assert_eq!(decoded.share, shares[1]);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result, anyhow, bail};
use bip39::Language;
use crc::{CRC_32_ISO_HDLC, Crc};
use std::collections::HashMap;
use std::sync::LazyLock;
use zeroize::Zeroizing;

use crate::domain::{ShareIndex, Threshold};
use crate::sharing::Share;

/// CRC32 algorithm for share integrity checking
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Version word that identifies the format
pub const VERSION_WORD: &str = "blakley";

/// Bits carried by one BIP39 word
const WORD_BITS: usize = 11;

/// Bytes around the rows: 2-byte row count and 4-byte checksum
const FRAME_OVERHEAD: usize = 2 + 4;

/// An encoded share phrase, wiped from memory on drop
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMnemonic(Zeroizing<String>);

impl ShareMnemonic {
    /// Gets the phrase as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A share recovered from its phrase, with the metadata it carried
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedShare {
    pub threshold: Threshold,
    pub index: ShareIndex,
    pub share: Share,
}

static WORD_TO_INDEX_MAP: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    Language::English
        .word_list()
        .iter()
        .enumerate()
        .map(|(idx, &word)| (word, idx))
        .collect()
});

/// Encodes a share and its position as a word phrase
///
/// # Errors
/// Returns an error if the share is empty, its rows have differing widths,
/// its width is not a valid threshold, or it has more than 65535 rows.
pub fn encode_share(share: &Share, index: ShareIndex) -> Result<ShareMnemonic> {
    let rows = share.rows();
    if rows.is_empty() {
        bail!("Cannot encode an empty share");
    }
    let row_count = u16::try_from(rows.len())
        .map_err(|_| anyhow!("Share too large: {} rows (max 65535)", rows.len()))?;

    let width = share.width();
    if let Some(pos) = rows.iter().position(|row| row.len() != width) {
        bail!(
            "Share row {pos} has width {}, expected {width}",
            rows[pos].len()
        );
    }
    let width_u8 = u8::try_from(width).context("Share width exceeds 255")?;
    let threshold = Threshold::new(width_u8).context("Share width is not a valid threshold")?;

    let mut payload = Zeroizing::new(Vec::with_capacity(FRAME_OVERHEAD + rows.len() * width));
    payload.extend_from_slice(&row_count.to_be_bytes());
    for row in rows {
        payload.extend_from_slice(row);
    }
    let checksum = CRC32.checksum(&payload);
    payload.extend_from_slice(&checksum.to_be_bytes());

    let mut words = vec![VERSION_WORD];
    words.extend(encode_parameters(threshold, index));
    words.extend(encode_data(&payload));

    Ok(ShareMnemonic(Zeroizing::new(words.join(" "))))
}

/// Decodes a share phrase
///
/// # Errors
/// Returns an error if the version word is wrong, a word is unknown, the
/// parameters are malformed, the data is truncated, or the checksum fails.
pub fn decode_share(phrase: &str) -> Result<DecodedShare> {
    let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();

    let Some(version) = words.first() else {
        bail!("Empty share phrase");
    };
    if version != VERSION_WORD {
        bail!("Invalid version word: expected '{VERSION_WORD}', got '{version}'");
    }

    let indices = words[1..]
        .iter()
        .map(|word| word_to_index(word))
        .collect::<Result<Vec<_>>>()?;

    let (threshold, index, consumed) = decode_parameters(&indices)?;
    let data = &indices[consumed..];
    if data.is_empty() {
        bail!("No share data words found");
    }

    let width = usize::from(*threshold);
    let payload = decode_data(data);
    let rows = unframe(&payload, width)?;

    let share = Share::from_rows(rows.chunks(width).map(<[u8]>::to_vec).collect());
    Ok(DecodedShare {
        threshold,
        index,
        share,
    })
}

/// Encodes threshold and index as one or two parameter words
///
/// Word layout: `[continuation (1)][threshold bits (5)][index bits (5)]`.
/// Values below 32 fit a single word; otherwise the first word carries the
/// high five bits of each with continuation set.
fn encode_parameters(threshold: Threshold, index: ShareIndex) -> Vec<&'static str> {
    let m = usize::from(*threshold);
    let o = usize::from(*index);

    if m < 32 && o < 32 {
        return vec![word_from_index((m << 5) | o)];
    }
    let high = (1 << 10) | ((m >> 5) << 5) | (o >> 5);
    let low = ((m & 0b11111) << 5) | (o & 0b11111);
    vec![word_from_index(high), word_from_index(low)]
}

/// Decodes parameter words, returning how many word indices they used
fn decode_parameters(indices: &[usize]) -> Result<(Threshold, ShareIndex, usize)> {
    let Some(&first) = indices.first() else {
        bail!("Phrase too short: missing parameter words");
    };

    let (m, o, consumed) = if first >> 10 == 1 {
        let Some(&second) = indices.get(1) else {
            bail!("Continuation bit set but only one parameter word provided");
        };
        if second >> 10 != 0 {
            bail!("Second parameter word has continuation bit set");
        }
        let m = (((first >> 5) & 0b11111) << 5) | ((second >> 5) & 0b11111);
        let o = ((first & 0b11111) << 5) | (second & 0b11111);
        (m, o, 2)
    } else {
        ((first >> 5) & 0b11111, first & 0b11111, 1)
    };

    let m = u8::try_from(m).context("Threshold value exceeds 255")?;
    let o = u8::try_from(o).context("Share index exceeds 255")?;
    Ok((Threshold::new(m)?, ShareIndex::new(o)?, consumed))
}

/// Packs bytes into 11-bit words, left-padding with zero bits
fn encode_data(data: &[u8]) -> Vec<&'static str> {
    let bit_count = data.len() * 8;
    let padding = (WORD_BITS - bit_count % WORD_BITS) % WORD_BITS;
    let mut words = Vec::with_capacity((bit_count + padding) / WORD_BITS);

    let mut buffer = 0usize;
    let mut filled = padding;
    for &byte in data {
        for bit_pos in (0..8).rev() {
            buffer = (buffer << 1) | usize::from((byte >> bit_pos) & 1);
            filled += 1;
            if filled == WORD_BITS {
                words.push(word_from_index(buffer));
                buffer = 0;
                filled = 0;
            }
        }
    }
    words
}

/// Unpacks 11-bit words into whole bytes, dropping the leading `bits % 8` bits
///
/// Padding can be up to ten bits, so the result may still start with one
/// surplus zero byte; [`unframe`] resolves that against the length header.
fn decode_data(indices: &[usize]) -> Zeroizing<Vec<u8>> {
    let total_bits = indices.len() * WORD_BITS;
    let mut skip = total_bits % 8;
    let mut bytes = Zeroizing::new(Vec::with_capacity(total_bits / 8));

    let mut buffer = 0u8;
    let mut filled = 0;
    for &index in indices {
        for bit_pos in (0..WORD_BITS).rev() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "masked to a single bit"
            )]
            let bit = ((index >> bit_pos) & 1) as u8;
            buffer = (buffer << 1) | bit;
            filled += 1;
            if filled == 8 {
                bytes.push(buffer);
                buffer = 0;
                filled = 0;
            }
        }
    }
    bytes
}

/// Checks the frame around the share rows and returns the flattened rows
fn unframe(payload: &[u8], width: usize) -> Result<Zeroizing<Vec<u8>>> {
    // The payload either starts at byte 0 or behind one surplus padding byte
    let candidates = match payload.first() {
        Some(0) => [Some(&payload[1..]), Some(payload)],
        _ => [None, Some(payload)],
    };

    let mut checksum_failure = None;
    for frame in candidates.into_iter().flatten() {
        if frame.len() < FRAME_OVERHEAD {
            continue;
        }
        let row_count = usize::from(u16::from_be_bytes([frame[0], frame[1]]));
        let body_len = row_count * width;
        if row_count == 0 || frame.len() != FRAME_OVERHEAD + body_len {
            continue;
        }

        let (framed, checksum_bytes) = frame.split_at(2 + body_len);
        let expected = CRC32.checksum(framed);
        let actual = u32::from_be_bytes([
            checksum_bytes[0],
            checksum_bytes[1],
            checksum_bytes[2],
            checksum_bytes[3],
        ]);
        if expected == actual {
            return Ok(Zeroizing::new(framed[2..].to_vec()));
        }
        checksum_failure.get_or_insert((expected, actual));
    }

    match checksum_failure {
        Some((expected, actual)) => bail!(
            "Checksum verification failed: expected 0x{expected:08x}, got 0x{actual:08x}"
        ),
        None => bail!(
            "Encoded data size mismatch: {} bytes do not frame rows of width {width}",
            payload.len()
        ),
    }
}

/// Converts a BIP39 word to its index (0-2047)
fn word_to_index(word: &str) -> Result<usize> {
    WORD_TO_INDEX_MAP
        .get(word)
        .copied()
        .ok_or_else(|| anyhow!("Word '{word}' not found in BIP39 wordlist"))
}

/// Converts an 11-bit index to its BIP39 word
fn word_from_index(index: usize) -> &'static str {
    Language::English.word_list()[index & 0x7FF]
}
