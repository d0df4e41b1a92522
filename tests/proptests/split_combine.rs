//! Property tests for split/combine workflows

use std::collections::HashSet;

use blakley::field::mult;
use blakley::solver::solve;
use blakley::{Share, combine, split};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// Non-empty secret of up to 64 bytes
#[derive(Clone, Debug)]
struct Secret(Vec<u8>);

impl Arbitrary for Secret {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::from(u8::arbitrary(g) % 64) + 1;
        Secret((0..len).map(|_| u8::arbitrary(g)).collect())
    }
}

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidParams {
    threshold: usize,
    parts: usize,
}

impl Arbitrary for ValidParams {
    fn arbitrary(g: &mut Gen) -> Self {
        // keep it reasonable for testing: 2..=20 parts
        let parts = usize::from(u8::arbitrary(g) % 19) + 2;
        let threshold = usize::from(u8::arbitrary(g)) % (parts - 1) + 2; // 2..=parts

        ValidParams { threshold, parts }
    }
}

/// Deterministic shuffle of share positions driven by `seed`
fn shuffled_positions(count: usize, seed: u64) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..count).collect();
    let mut state = seed;
    for i in 0..count {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let range = u64::try_from(count - i).unwrap_or_else(|_| unreachable!("fits in u64"));
        let offset = usize::try_from((state >> 33) % range)
            .unwrap_or_else(|_| unreachable!("offset < range fits in usize"));
        positions.swap(i, i + offset);
    }
    positions
}

/// Splitting and combining the first `threshold` shares recovers the secret
#[quickcheck]
fn prop_split_combine_round_trip(secret: Secret, params: ValidParams) -> bool {
    let Secret(secret) = secret;
    let Ok(shares) = split(&secret, params.parts, params.threshold) else {
        return false;
    };
    if shares.len() != params.parts {
        return false;
    }

    let Ok(recovered) = combine(&shares[..params.threshold]) else {
        return false;
    };
    *recovered == secret
}

/// Any selection of `threshold` shares, in any order, recovers the secret
#[quickcheck]
fn prop_random_share_selection_works(secret: Secret, params: ValidParams, seed: u64) -> bool {
    let Secret(secret) = secret;
    let Ok(shares) = split(&secret, params.parts, params.threshold) else {
        return false;
    };

    let selected: Vec<Share> = shuffled_positions(params.parts, seed)
        .into_iter()
        .take(params.threshold)
        .map(|idx| shares[idx].clone())
        .collect();

    combine(&selected).is_ok_and(|recovered| *recovered == secret)
}

/// Fewer than `threshold` shares never reconstruct anything
#[quickcheck]
fn prop_insufficient_shares_fail(secret: Secret, params: ValidParams) -> bool {
    let Secret(secret) = secret;
    if params.threshold == 2 {
        return true; // one share is rejected before any solving
    }
    let Ok(shares) = split(&secret, params.parts, params.threshold) else {
        return false;
    };

    combine(&shares[..params.threshold - 1]).is_err()
}

/// Matrix row `[x^(K-1), ..., x, 1]` for a hyperplane at abscissa `x`
fn moment_curve_equation(x: u8, degree: usize) -> Vec<u8> {
    let mut equation = vec![1u8; degree];
    let mut power = x;
    for coefficient in equation[..degree - 1].iter_mut().rev() {
        *coefficient = power;
        power = mult(power, x);
    }
    equation
}

/// `threshold - 1` shares are consistent with every possible secret byte
///
/// One more hyperplane at an unused abscissa, with its constant swept over
/// the whole field, must land on all 256 values of the first coordinate.
#[quickcheck]
fn prop_fewer_shares_leave_secret_undetermined(
    secret: Secret,
    params: ValidParams,
    pick: usize,
) -> bool {
    let Secret(secret) = secret;
    let Ok(shares) = split(&secret, params.parts, params.threshold) else {
        return false;
    };
    let degree = params.threshold;
    let byte = pick % secret.len();

    let mut matrix = Vec::with_capacity(degree);
    let mut constants = Vec::with_capacity(degree);
    for share in &shares[..degree - 1] {
        let row = &share.rows()[byte];
        let mut equation = row[..degree - 1].to_vec();
        equation.push(1);
        matrix.push(equation);
        constants.push(row[degree - 1]);
    }

    // the last normal coefficient of a row is its abscissa
    let used: HashSet<u8> = shares.iter().map(|s| s.rows()[byte][degree - 2]).collect();
    let Some(extra) = (0..=u8::MAX).find(|x| !used.contains(x)) else {
        return false;
    };
    matrix.push(moment_curve_equation(extra, degree));
    constants.push(0);

    let mut reachable = HashSet::new();
    for constant in 0..=u8::MAX {
        constants[degree - 1] = constant;
        let Ok(candidate) = solve(&matrix, &constants, degree) else {
            return false;
        };
        reachable.insert(candidate);
    }
    reachable.len() == 256
}

/// Every share has the shape [secret length][threshold]
#[quickcheck]
fn prop_share_shape(secret: Secret, params: ValidParams) -> bool {
    let Secret(secret) = secret;
    let Ok(shares) = split(&secret, params.parts, params.threshold) else {
        return false;
    };

    shares.iter().all(|share| {
        share.secret_len() == secret.len()
            && share.rows().iter().all(|row| row.len() == params.threshold)
    })
}

/// A corrupted share yields an error or a wrong secret, never a panic
#[quickcheck]
fn prop_corrupted_share_does_not_panic(secret: Secret, params: ValidParams, flip: u8) -> bool {
    let Secret(secret) = secret;
    let Ok(mut shares) = split(&secret, params.parts, params.threshold) else {
        return false;
    };

    let mut rows = shares[0].rows().to_vec();
    rows[0][0] ^= flip | 1;
    shares[0] = Share::from_rows(rows);

    match combine(&shares[..params.threshold]) {
        Ok(recovered) => recovered.len() == secret.len(),
        Err(_) => true,
    }
}
