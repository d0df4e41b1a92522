//! Property tests for GF(256) arithmetic

use blakley::field::{div, inverse, mult};
use quickcheck_macros::quickcheck;

#[quickcheck]
fn prop_mult_commutes(a: u8, b: u8) -> bool {
    mult(a, b) == mult(b, a)
}

#[quickcheck]
fn prop_mult_associates(a: u8, b: u8, c: u8) -> bool {
    mult(mult(a, b), c) == mult(a, mult(b, c))
}

#[quickcheck]
fn prop_mult_distributes_over_xor(a: u8, b: u8, c: u8) -> bool {
    mult(a, b ^ c) == mult(a, b) ^ mult(a, c)
}

#[quickcheck]
fn prop_div_undoes_mult(a: u8, b: u8) -> bool {
    if b == 0 {
        return div(a, b).is_err();
    }
    div(mult(a, b), b).ok() == Some(a)
}

#[quickcheck]
fn prop_inverse_is_involution(x: u8) -> bool {
    match inverse(x) {
        None => x == 0,
        Some(inv) => inverse(inv) == Some(x) && mult(x, inv) == 1,
    }
}
