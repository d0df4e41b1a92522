//! Blakley hyperplane-intersection secret sharing over GF(256)
//!
//! Every secret byte `s` becomes its own K-dimensional problem. A random
//! point `P = (s, p_2, ..., p_K)` is chosen, and each party receives one
//! hyperplane through `P`. Any K hyperplanes meet in exactly `P`, so K
//! shares pin down `s`; fewer leave it undetermined.
//!
//! Hyperplane normals are taken from the moment curve at distinct random
//! abscissae, `(x^(K-1), ..., x^2, x)` with the implicit last coefficient
//! one. Any K such rows form a Vandermonde matrix, which keeps every
//! K-subset of shares solvable.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Result, ValidationError};
use crate::field::mult;
use crate::solver::{evaluate, solve};

/// Largest threshold and part count a byte-sized field supports
pub const MAX_PARTS: usize = 255;

/// Smallest threshold that keeps a single share from revealing the secret
pub const MIN_THRESHOLD: usize = 2;

/// One party's fragment of a split secret
///
/// Row `j` is the hyperplane the party holds for secret byte `j`, stored as
/// `[a_1, ..., a_{K-1}, c]` (see [`crate::solver`]). The buffer is wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share(Zeroizing<Vec<Vec<u8>>>);

impl Share {
    /// Wraps raw hyperplane rows without checking their shape
    ///
    /// Shapes are validated when shares are combined.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Self {
        Self(Zeroizing::new(rows))
    }

    /// Hyperplane rows, one per secret byte
    #[must_use]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Number of secret bytes covered by this share
    #[must_use]
    pub fn secret_len(&self) -> usize {
        self.0.len()
    }

    /// Width of the first row, which equals the threshold for well-formed shares
    #[must_use]
    pub fn width(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }
}

/// Splits `secret` into `parts` shares, any `threshold` of which recover it
///
/// Uses the operating system's secure random source.
///
/// # Errors
/// Returns a validation error when the parameters are out of range, or
/// [`crate::Error::RandomSource`] when the random source fails.
///
/// # Examples
///
/// ```rust
/// use blakley::{combine, split};
///
/// let shares = split(b"just a simple test", 8, 3).unwrap();
/// assert_eq!(shares.len(), 8);
///
/// let recovered = combine(&shares[2..5]).unwrap();
/// assert_eq!(&recovered[..], b"just a simple test");
/// ```
pub fn split(secret: &[u8], parts: usize, threshold: usize) -> Result<Vec<Share>> {
    split_with_rng(secret, parts, threshold, &mut OsRng)
}

/// Splits `secret` drawing randomness from `rng`
///
/// # Errors
/// See [`split`].
pub fn split_with_rng<R: RngCore + CryptoRng>(
    secret: &[u8],
    parts: usize,
    threshold: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    validate_split(secret, parts, threshold)?;

    // Rows go straight into wiping buffers, so an early return leaves nothing behind
    let mut shares: Vec<Share> = (0..parts)
        .map(|_| Share::from_rows(Vec::with_capacity(secret.len())))
        .collect();
    let mut point = Zeroizing::new(vec![0u8; threshold]);

    for &byte in secret {
        point[0] = byte;
        rng.try_fill_bytes(&mut point[1..])?;

        let abscissae = distinct_abscissae(parts, rng)?;
        for (share, &x) in shares.iter_mut().zip(&abscissae) {
            share.0.push(hyperplane_through(&point, x));
        }
    }

    Ok(shares)
}

/// Recovers the secret from at least `threshold` shares of one split
///
/// The first `K` shares are used, where `K` is the row width; extras are
/// ignored. Shares are not authenticated: K well-formed but unrelated rows
/// produce a wrong secret without an error.
///
/// # Errors
/// - a validation error when fewer than two shares are given or their shapes disagree
/// - a dimension mismatch when fewer than `K` shares are given
/// - [`crate::Error::SingularSystem`] for duplicated or corrupted shares
pub fn combine(parts: &[Share]) -> Result<Zeroizing<Vec<u8>>> {
    validate_combine(parts)?;

    let secret_len = parts[0].secret_len();
    let mut secret = Zeroizing::new(Vec::with_capacity(secret_len));

    for index in 0..secret_len {
        let degree = parts[0].rows()[index].len();
        let mut matrix = Zeroizing::new(Vec::with_capacity(degree));
        let mut constants = Zeroizing::new(Vec::with_capacity(degree));

        for share in parts.iter().take(degree) {
            let row = &share.rows()[index];
            let (coefficients, constant) = row.split_at(degree - 1);
            let mut equation = Vec::with_capacity(degree);
            equation.extend_from_slice(coefficients);
            equation.push(1);
            matrix.push(equation);
            constants.push(constant[0]);
        }

        secret.push(solve(&matrix, &constants, degree)?);
    }

    Ok(secret)
}

fn validate_split(secret: &[u8], parts: usize, threshold: usize) -> Result<()> {
    if threshold < MIN_THRESHOLD {
        return Err(ValidationError::ThresholdTooLow(threshold).into());
    }
    if threshold > MAX_PARTS {
        return Err(ValidationError::ThresholdTooHigh(threshold).into());
    }
    if parts > MAX_PARTS {
        return Err(ValidationError::TooManyParts(parts).into());
    }
    if parts < threshold {
        return Err(ValidationError::PartsBelowThreshold { parts, threshold }.into());
    }
    if secret.is_empty() {
        return Err(ValidationError::EmptySecret.into());
    }
    Ok(())
}

fn validate_combine(parts: &[Share]) -> Result<()> {
    if parts.is_empty() {
        return Err(ValidationError::NoShares.into());
    }
    if parts.len() < 2 {
        return Err(ValidationError::TooFewShares(parts.len()).into());
    }

    let expected_len = parts[0].secret_len();
    if expected_len == 0 {
        return Err(ValidationError::EmptyShare { party: 0 }.into());
    }
    for (party, share) in parts.iter().enumerate().skip(1) {
        if share.secret_len() != expected_len {
            return Err(ValidationError::SecretLengthMismatch {
                party,
                expected: expected_len,
                got: share.secret_len(),
            }
            .into());
        }
    }

    for row in 0..expected_len {
        let expected = parts[0].rows()[row].len();
        for (party, share) in parts.iter().enumerate().skip(1) {
            let got = share.rows()[row].len();
            if got != expected {
                return Err(ValidationError::SharesMismatch {
                    party,
                    row,
                    expected,
                    got,
                }
                .into());
            }
        }
        if expected < MIN_THRESHOLD {
            return Err(ValidationError::InvalidShareWidth(expected).into());
        }
    }

    Ok(())
}

/// Hyperplane through `point` whose normal is the moment-curve vector at `x`
fn hyperplane_through(point: &[u8], x: u8) -> Vec<u8> {
    let degree = point.len();
    let mut row = vec![0u8; degree];

    // a_{K-1} = x, a_{K-2} = x^2, ..., a_1 = x^(K-1)
    let mut power = x;
    for coefficient in row[..degree - 1].iter_mut().rev() {
        *coefficient = power;
        power = mult(power, x);
    }
    row[degree - 1] = evaluate(&row, point, degree);
    row
}

/// Draws `count` distinct field elements by a partial Fisher-Yates shuffle
fn distinct_abscissae<R: RngCore + CryptoRng>(count: usize, rng: &mut R) -> Result<Vec<u8>> {
    let mut pool: Vec<u8> = (0..=u8::MAX).collect();
    for i in 0..count {
        let j = i + uniform_below(pool.len() - i, rng)?;
        pool.swap(i, j);
    }
    pool.truncate(count);
    Ok(pool)
}

/// Uniform index in `0..bound` for `1 <= bound <= 256`, by rejection sampling one byte at a time
fn uniform_below<R: RngCore + CryptoRng>(bound: usize, rng: &mut R) -> Result<usize> {
    // largest multiple of `bound` that fits in a byte's range
    let zone = 256 - 256 % bound;
    let mut byte = [0u8; 1];
    loop {
        rng.try_fill_bytes(&mut byte)?;
        let value = usize::from(byte[0]);
        if value < zone {
            return Ok(value % bound);
        }
    }
}
