//! Hyperplane evaluation and Gaussian elimination over GF(256)
//!
//! A hyperplane in K-dimensional space is stored as a row of K bytes
//! `[a_1, ..., a_{K-1}, c]`. It describes the equation
//! `a_1 x_1 + ... + a_{K-1} x_{K-1} + x_K = c`: the coefficient of the last
//! coordinate is always one and the last slot holds the constant instead.

use zeroize::Zeroizing;

use crate::error::{Error, Result, ValidationError};
use crate::field::{div, mult};

/// Index of the solution coordinate that carries the secret byte
pub const SECRET_COORDINATE: usize = 0;

/// Evaluates the left-hand side of the hyperplane `plane` at `point`
///
/// Only the first `degree` entries of each row are read: the first
/// `degree - 1` products are summed and the last coordinate of `point` is
/// added with an implicit coefficient of one. A point lies on the
/// hyperplane exactly when the result equals `plane[degree - 1]`.
///
/// # Examples
///
/// ```rust
/// use blakley::solver::evaluate;
///
/// assert_eq!(evaluate(&[3, 3, 3], &[7, 7, 7], 3), 7);
/// assert_eq!(evaluate(&[0x52, 0x7B, 0], &[5, 6, 2], 3), 2);
/// ```
#[must_use]
pub fn evaluate(plane: &[u8], point: &[u8], degree: usize) -> u8 {
    let Some(last) = degree.checked_sub(1) else {
        return 0;
    };
    let sum = plane
        .iter()
        .zip(point)
        .take(last)
        .fold(0u8, |acc, (&a, &x)| acc ^ mult(a, x));
    sum ^ point.get(last).copied().unwrap_or(0)
}

/// Solves `matrix * x = constants` and returns `x[SECRET_COORDINATE]`
///
/// `matrix` must be `degree` rows of `degree` coefficients and `constants`
/// must hold `degree` entries. Elimination runs on a private copy, so the
/// caller's rows are left untouched.
///
/// # Errors
/// - [`ValidationError::DimensionMismatch`] when the shapes disagree with `degree`
/// - [`Error::SingularSystem`] when a column has no non-zero pivot
///
/// # Examples
///
/// ```rust
/// use blakley::solver::solve;
///
/// let matrix = vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]];
/// assert_eq!(solve(&matrix, &[0, 5, 2], 3).unwrap(), 1);
/// ```
pub fn solve(matrix: &[Vec<u8>], constants: &[u8], degree: usize) -> Result<u8> {
    if degree == 0 {
        return Err(ValidationError::DimensionMismatch("degree must be positive".into()).into());
    }
    if matrix.len() != degree {
        return Err(ValidationError::DimensionMismatch(format!(
            "expected {degree} rows, got {}",
            matrix.len()
        ))
        .into());
    }
    if let Some((row, width)) = matrix
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, width)| width != degree)
    {
        return Err(ValidationError::DimensionMismatch(format!(
            "row {row} has {width} coefficients, expected {degree}"
        ))
        .into());
    }
    if constants.len() != degree {
        return Err(ValidationError::DimensionMismatch(format!(
            "expected {degree} constants, got {}",
            constants.len()
        ))
        .into());
    }

    // Augmented rows [coefficients | constant]
    let mut rows: Vec<Zeroizing<Vec<u8>>> = matrix
        .iter()
        .zip(constants)
        .map(|(row, &constant)| {
            let mut augmented = Zeroizing::new(Vec::with_capacity(degree + 1));
            augmented.extend_from_slice(row);
            augmented.push(constant);
            augmented
        })
        .collect();

    for column in 0..degree {
        let pivot = (column..degree)
            .find(|&r| rows[r][column] != 0)
            .ok_or(Error::SingularSystem { column })?;
        rows.swap(column, pivot);

        let lead = rows[column][column];
        for value in rows[column].iter_mut().skip(column) {
            *value = div(*value, lead)?;
        }

        let (before, rest) = rows.split_at_mut(column);
        let (pivot_row, after) = rest.split_at_mut(1);
        let pivot_row = &pivot_row[0];
        for row in before.iter_mut().chain(after.iter_mut()) {
            let factor = row[column];
            if factor == 0 {
                continue;
            }
            for (value, &p) in row.iter_mut().zip(pivot_row.iter()).skip(column) {
                *value ^= mult(factor, p);
            }
        }
    }

    Ok(rows[SECRET_COORDINATE][degree])
}
