//! Property tests for share phrase encoding/decoding

use blakley::Share;
use blakley::codec::{decode_share, encode_share};
use blakley::domain::ShareIndex;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// Rectangular share matrix with a valid width (2..=12) and 1..=40 rows
#[derive(Clone, Debug)]
struct RectShare(Vec<Vec<u8>>);

impl Arbitrary for RectShare {
    fn arbitrary(g: &mut Gen) -> Self {
        let width = usize::from(u8::arbitrary(g) % 11) + 2;
        let rows = usize::from(u8::arbitrary(g) % 40) + 1;
        RectShare(
            (0..rows)
                .map(|_| (0..width).map(|_| u8::arbitrary(g)).collect())
                .collect(),
        )
    }
}

/// Encoding then decoding preserves the rows, the width and the index exactly,
/// whatever padding the bit packing needed
#[quickcheck]
fn prop_share_phrase_round_trip(share: RectShare, index: u8) -> bool {
    let RectShare(rows) = share;
    let width = rows[0].len();
    let Ok(index) = ShareIndex::new(index) else {
        return true; // 255 is not a valid index
    };

    let share = Share::from_rows(rows);
    let Ok(phrase) = encode_share(&share, index) else {
        return false;
    };
    if !phrase.as_str().starts_with("blakley ") {
        return false;
    }

    let Ok(decoded) = decode_share(phrase.as_str()) else {
        return false;
    };
    usize::from(*decoded.threshold) == width && decoded.index == index && decoded.share == share
}

/// Test that invalid version words are rejected
#[quickcheck]
fn prop_invalid_version_word_rejected(words: Vec<String>) -> bool {
    if words.is_empty() {
        return true;
    }

    let mut invalid_words = words;
    invalid_words[0] = "invalid".to_string();
    decode_share(&invalid_words.join(" ")).is_err()
}

/// Replacing the last data word is caught by the checksum
#[quickcheck]
fn prop_checksum_detects_corruption(share: RectShare) -> bool {
    let RectShare(rows) = share;
    let share = Share::from_rows(rows);
    let Ok(phrase) = encode_share(&share, ShareIndex::new(0).unwrap()) else {
        return false;
    };

    let mut words: Vec<&str> = phrase.as_str().split_whitespace().collect();
    let last = words.len() - 1;
    words[last] = if words[last] == "abandon" { "zoo" } else { "abandon" };

    decode_share(&words.join(" ")).is_err()
}
