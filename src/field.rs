//! GF(2^8) arithmetic backed by logarithm and exponent tables
//!
//! Elements are plain bytes. Addition and subtraction are XOR. Multiplication
//! and division go through log/exp tables generated once, on first use, from
//! the generator `3` under the reduction polynomial `x^8 + x^4 + x^3 + x + 1`.

use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Reduction polynomial x^8 + x^4 + x^3 + x + 1
const POLYNOMIAL: u16 = 0x11B;

/// Primitive element used to generate the exponent table
const GENERATOR: u8 = 3;

/// Log, exponent and inverse tables, written once and read-only afterwards
struct Tables {
    log: [u8; 256],
    exp: [u8; 255],
    inverse: [u8; 256],
}

static TABLES: LazyLock<Tables> = LazyLock::new(|| {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 255];

    let mut value: u8 = 1;
    for (power, slot) in exp.iter_mut().enumerate() {
        *slot = value;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "power < 255 always fits in u8"
        )]
        let power = power as u8;
        log[value as usize] = power;
        value = xtime_mult(value, GENERATOR);
    }

    // g^a * g^(255 - a) = g^255 = 1
    let mut inverse = [0u8; 256];
    for x in 1..=255usize {
        let power = (255 - usize::from(log[x])) % 255;
        inverse[x] = exp[power];
    }

    Tables { log, exp, inverse }
});

/// Shift-and-add multiplication, only used to seed the tables
fn xtime_mult(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 == 1 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "only the low byte of the polynomial matters after the shift"
            )]
            let reduction = POLYNOMIAL as u8;
            a ^= reduction;
        }
        b >>= 1;
    }
    product
}

/// Multiplies two field elements
///
/// `mult(0, x) == 0` for every `x`.
#[inline]
#[must_use]
pub fn mult(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let tables = &*TABLES;
    let sum = (usize::from(tables.log[a as usize]) + usize::from(tables.log[b as usize])) % 255;
    tables.exp[sum]
}

/// Multiplicative inverse, `None` for zero
#[inline]
#[must_use]
pub fn inverse(x: u8) -> Option<u8> {
    if x == 0 {
        return None;
    }
    Some(TABLES.inverse[x as usize])
}

/// Divides `a` by `b`
///
/// # Errors
/// Returns [`Error::DivisionByZero`] when `b` is zero.
#[inline]
pub fn div(a: u8, b: u8) -> Result<u8> {
    let inv = inverse(b).ok_or(Error::DivisionByZero)?;
    Ok(mult(a, inv))
}
