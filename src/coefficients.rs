//! Runge-Kutta-Fehlberg 4(5) Coefficients
//!
//! Coefficients for the 6-stage embedded RK4(5) pair from:
//! Fehlberg, E. (1969). "Low-order classical Runge-Kutta formulas with
//! stepsize control and their application to some heat transfer problems"
//! NASA TR R-315, as tabulated in Hairer, Nørsett & Wanner (1993), Table 5.1.
//!
//! The 5th-order weights advance the solution; the 4th-order weights are
//! only used to form the embedded error estimate.

/// Number of stages in the RKF45 method
pub const STAGES: usize = 6;

/// Order of the higher-order method (used for advancing the solution)
pub const ORDER: u8 = 5;

/// Order of the embedded method (used for error estimation)
pub const EMBEDDED_ORDER: u8 = 4;

/// Node coefficients (c_i) - the fractions of `dt` at which each stage is evaluated
pub const C: [f64; STAGES] = [
    0.0,          // c[0]
    1.0 / 4.0,    // c[1] = 1/4
    3.0 / 8.0,    // c[2] = 3/8
    12.0 / 13.0,  // c[3] = 12/13
    1.0,          // c[4] = 1
    1.0 / 2.0,    // c[5] = 1/2
];

/// Runge-Kutta matrix (a_ij) coefficients
///
/// Lower-triangular, stored as A[i][j] for row i, column j (j < i):
/// k_i = f(t_n + c_i*h, y_n + h * sum_{j=0}^{i-1} a_{i,j} * k_j)
pub const A: [[f64; 5]; STAGES] = [
    [0.0; 5],
    [1.0 / 4.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 32.0, 9.0 / 32.0, 0.0, 0.0, 0.0],
    [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0, 0.0, 0.0],
    [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0, 0.0],
    [-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0],
];

/// 5th order weights (b_i), used for the propagated solution
pub const B5: [f64; STAGES] = [
    16.0 / 135.0,
    0.0,
    6656.0 / 12825.0,
    28561.0 / 56430.0,
    -9.0 / 50.0,
    2.0 / 55.0,
];

/// 4th order weights (b_hat_i), the embedded solution
pub const B4: [f64; STAGES] = [
    25.0 / 216.0,
    0.0,
    1408.0 / 2565.0,
    2197.0 / 4104.0,
    -1.0 / 5.0,
    0.0,
];

/// Error weights: b_i - b_hat_i
///
/// Written out rather than subtracted so the error estimate does not
/// suffer cancellation between two nearly equal solutions.
pub const B_ERR: [f64; STAGES] = [
    1.0 / 360.0,
    0.0,
    -128.0 / 4275.0,
    -2197.0 / 75240.0,
    1.0 / 50.0,
    2.0 / 55.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    // Summation of a handful of O(10) terms accumulates a few ulps
    const TOL: f64 = 1e-14;

    #[test]
    fn test_row_sum_condition() {
        for i in 0..STAGES {
            let row_sum: f64 = A[i].iter().sum();
            assert!(
                (row_sum - C[i]).abs() < TOL,
                "Row {} sum = {}, expected c[{}] = {}",
                i,
                row_sum,
                i,
                C[i]
            );
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let b5_sum: f64 = B5.iter().sum();
        assert!((b5_sum - 1.0).abs() < TOL, "5th order weights sum to {}", b5_sum);

        let b4_sum: f64 = B4.iter().sum();
        assert!((b4_sum - 1.0).abs() < TOL, "4th order weights sum to {}", b4_sum);
    }

    #[test]
    fn test_error_weights_match_difference() {
        for i in 0..STAGES {
            assert!(
                (B_ERR[i] - (B5[i] - B4[i])).abs() < TOL,
                "B_ERR[{}] = {}, expected {}",
                i,
                B_ERR[i],
                B5[i] - B4[i]
            );
        }
        let err_sum: f64 = B_ERR.iter().sum();
        assert!(err_sum.abs() < TOL, "Error weights sum to {}", err_sum);
    }

    #[test]
    fn test_fifth_order_quadrature_conditions() {
        // sum b_i c_i^(k-1) = 1/k for k = 1..=5
        for k in 1..=ORDER as i32 {
            let sum: f64 = (0..STAGES).map(|i| B5[i] * C[i].powi(k - 1)).sum();
            let expected = 1.0 / k as f64;
            assert!(
                (sum - expected).abs() < 1e-14,
                "Quadrature condition k={} gives {}, expected {}",
                k,
                sum,
                expected
            );
        }
    }

    #[test]
    fn test_fourth_order_quadrature_conditions() {
        for k in 1..=EMBEDDED_ORDER as i32 {
            let sum: f64 = (0..STAGES).map(|i| B4[i] * C[i].powi(k - 1)).sum();
            let expected = 1.0 / k as f64;
            assert!(
                (sum - expected).abs() < 1e-14,
                "Embedded quadrature condition k={} gives {}, expected {}",
                k,
                sum,
                expected
            );
        }
    }
}
