//! # Rational null-space solver
//!
//! ## Aim
//! Computes the minimal positive integer vector in the right null space of a
//! stoichiometric matrix. This vector is the coefficient vector of the
//! balanced chemical equation.
//!
//! ## Main logic
//! - Gauss-Jordan elimination over exact rational arithmetic
//!   (`num_rational::BigRational`); floating point is never used for the
//!   elimination itself, so atom counts cannot be corrupted by rounding.
//! - The null-space dimension decides the outcome: 0 means the equation
//!   cannot be balanced, 1 yields the coefficient vector, 2 or more means the
//!   system is underdetermined and the caller must pin a coefficient.
//! - The spanning vector is scaled by the LCM of its denominators, reduced by
//!   the GCD of the resulting integers and sign-normalized so that every
//!   coefficient is a positive integer.
//! - Every row combination counts against a step budget; pathological inputs
//!   abort with a timeout error instead of running unbounded.

use crate::Balancer::errors::BalancerError;
use log::{info, warn};
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Default ceiling on elementary row-operation steps. Orders of magnitude
/// above anything a realistic equation needs.
pub const DEFAULT_STEP_BUDGET: usize = 1_000_000;

// Entries of the stoichiometric matrix are small integer atom counts stored
// in f64, exact by construction; rounding here only undoes the storage type.
fn to_rational_rows(matrix: &DMatrix<f64>) -> Vec<Vec<BigRational>> {
    (0..matrix.nrows())
        .map(|i| {
            (0..matrix.ncols())
                .map(|j| BigRational::from_integer(BigInt::from(matrix[(i, j)].round() as i64)))
                .collect()
        })
        .collect()
}

/// Computes the balanced coefficient vector for a stoichiometric matrix:
/// M·v = 0, every entry of v a positive integer, gcd of all entries 1.
/// Column order of the input matrix is preserved in the output.
pub fn balance_coefficients(
    matrix: &DMatrix<f64>,
    step_budget: usize,
) -> Result<Vec<u64>, BalancerError> {
    let rows = matrix.nrows();
    let cols = matrix.ncols();
    let mut a = to_rational_rows(matrix);

    // Gauss-Jordan: reduce to reduced row echelon form, recording pivot
    // columns. First nonzero entry is a valid pivot since arithmetic is exact.
    let mut pivot_cols: Vec<usize> = Vec::new();
    let mut pivot_row = 0;
    let mut steps: usize = 0;
    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        let Some(found) = (pivot_row..rows).find(|&r| !a[r][col].is_zero()) else {
            continue;
        };
        a.swap(pivot_row, found);
        let pivot = a[pivot_row][col].clone();
        for c in col..cols {
            let normalized = &a[pivot_row][c] / &pivot;
            a[pivot_row][c] = normalized;
        }
        for r in 0..rows {
            if r == pivot_row || a[r][col].is_zero() {
                continue;
            }
            let factor = a[r][col].clone();
            for c in col..cols {
                let updated = &a[r][c] - &factor * &a[pivot_row][c];
                a[r][c] = updated;
                steps += 1;
                if steps > step_budget {
                    warn!("solver aborted after exceeding {} steps", step_budget);
                    return Err(BalancerError::Timeout {
                        budget: step_budget,
                    });
                }
            }
        }
        pivot_cols.push(col);
        pivot_row += 1;
    }

    let rank = pivot_cols.len();
    let nullity = cols - rank;
    info!("elimination finished: rank {}, nullity {}", rank, nullity);
    if nullity == 0 {
        return Err(BalancerError::Unbalanceable { nullity: 0 });
    }
    if nullity >= 2 {
        return Err(BalancerError::Ambiguous {
            degrees_of_freedom: nullity,
        });
    }

    // Exactly one free column: set its variable to 1, read the pivot
    // variables straight off the reduced rows.
    let Some(free_col) = (0..cols).find(|c| !pivot_cols.contains(c)) else {
        return Err(BalancerError::Unbalanceable { nullity });
    };
    let mut solution = vec![BigRational::zero(); cols];
    solution[free_col] = BigRational::one();
    for (row, &col) in pivot_cols.iter().enumerate() {
        solution[col] = -a[row][free_col].clone();
    }

    normalize_to_integers(solution, nullity)
}

// Clears denominators by their LCM, reduces by the GCD of the resulting
// integers and flips the sign if needed. A vector that still contains a
// non-positive entry afterwards admits no physically meaningful solution.
fn normalize_to_integers(
    solution: Vec<BigRational>,
    nullity: usize,
) -> Result<Vec<u64>, BalancerError> {
    let mut denom_lcm = BigInt::one();
    for value in solution.iter() {
        denom_lcm = denom_lcm.lcm(value.denom());
    }
    let integers: Vec<BigInt> = solution
        .iter()
        .map(|value| value.numer() * (&denom_lcm / value.denom()))
        .collect();

    let mut common = BigInt::zero();
    for value in integers.iter() {
        common = common.gcd(value);
    }
    if common.is_zero() {
        return Err(BalancerError::Unbalanceable { nullity });
    }
    let mut reduced: Vec<BigInt> = integers.iter().map(|value| value / &common).collect();

    if reduced.iter().any(|value| !value.is_positive()) {
        for value in reduced.iter_mut() {
            *value = -value.clone();
        }
    }
    if reduced.iter().any(|value| !value.is_positive()) {
        return Err(BalancerError::Unbalanceable { nullity });
    }

    reduced
        .iter()
        .map(|value| value.to_u64().ok_or(BalancerError::CoefficientOverflow))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    #[test]
    fn test_water_formation() {
        // rows: H, O; cols: H2, O2, H2O
        let matrix = dmatrix![2.0, 0.0, -2.0; 0.0, 2.0, -1.0];
        let coefficients = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap();
        assert_eq!(coefficients, vec![2, 1, 2]);
    }

    #[test]
    fn test_trivial_null_space_is_unbalanceable() {
        // H2 -> O2: rows H, O; full column rank
        let matrix = dmatrix![2.0, 0.0; 0.0, -2.0];
        let err = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap_err();
        assert_eq!(err, BalancerError::Unbalanceable { nullity: 0 });
    }

    #[test]
    fn test_underdetermined_system_is_ambiguous() {
        // H2 + O2 -> H2O2 + O3: rows H, O; 4 species, rank 2
        let matrix = dmatrix![2.0, 0.0, -2.0, 0.0; 0.0, 2.0, -2.0, -3.0];
        let err = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap_err();
        assert_eq!(
            err,
            BalancerError::Ambiguous {
                degrees_of_freedom: 2
            }
        );
    }

    #[test]
    fn test_methane_combustion() {
        // rows: C, H, O; cols: CH4, O2, CO2, H2O
        let matrix = dmatrix![
            1.0, 0.0, -1.0, 0.0;
            4.0, 0.0, 0.0, -2.0;
            0.0, 2.0, -2.0, -1.0
        ];
        let coefficients = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap();
        assert_eq!(coefficients, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_step_budget_aborts() {
        // CH4 combustion needs row combinations, so a budget of 1 must trip
        let matrix = dmatrix![
            1.0, 0.0, -1.0, 0.0;
            4.0, 0.0, 0.0, -2.0;
            0.0, 2.0, -2.0, -1.0
        ];
        let err = balance_coefficients(&matrix, 1).unwrap_err();
        assert_eq!(err, BalancerError::Timeout { budget: 1 });
    }

    #[test]
    fn test_gcd_reduction() {
        // same system with every row doubled must give the same coefficients
        let matrix = dmatrix![4.0, 0.0, -4.0; 0.0, 4.0, -2.0];
        let coefficients = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap();
        assert_eq!(coefficients, vec![2, 1, 2]);
    }

    #[test]
    fn test_iron_oxidation() {
        // rows: Fe, O; cols: Fe, O2, Fe2O3
        let matrix = dmatrix![1.0, 0.0, -2.0; 0.0, 2.0, -3.0];
        let coefficients = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap();
        assert_eq!(coefficients, vec![4, 3, 2]);
    }

    #[test]
    fn test_zero_coefficient_is_unbalanceable() {
        // C + O2 -> C: the only null vector drops O2 entirely (coefficient
        // zero), which is not a positive solution
        // rows: C, O; cols: C, O2, C
        let matrix = dmatrix![1.0, 0.0, -1.0; 0.0, 2.0, 0.0];
        let err = balance_coefficients(&matrix, DEFAULT_STEP_BUDGET).unwrap_err();
        assert_eq!(err, BalancerError::Unbalanceable { nullity: 1 });
    }
}
