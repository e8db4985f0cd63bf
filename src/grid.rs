//! Logarithmically spaced frequency grids
//!
//! Leaf component feeding the aggregate response calculator. Produces the
//! strictly ascending, log-uniform sample frequencies a response curve is
//! evaluated on.

use crate::error::{EqCurveError, Result};

/// Default lower edge of the generated span in Hz
pub const DEFAULT_MIN_FREQ_HZ: f64 = 20.0;

/// Default upper edge of the generated span in Hz
pub const DEFAULT_MAX_FREQ_HZ: f64 = 20_000.0;

/// Generate `num_points` log-uniformly spaced frequencies over
/// `[min_freq, max_freq]`.
///
/// `f[i] = min_freq * (max_freq/min_freq)^(i/(num_points-1))`, so the first
/// point lands exactly on `min_freq` and the last on `max_freq` (within
/// floating rounding). A single-point grid is defined as `[min_freq]`.
///
/// # Errors
/// `InvalidParameter` when `num_points` is zero. Span edges are the caller's
/// contract; a degenerate span yields a deterministic but non-ascending
/// sequence rather than an error.
pub fn generate_frequencies(num_points: usize, min_freq: f64, max_freq: f64) -> Result<Vec<f64>> {
    if num_points == 0 {
        return Err(EqCurveError::InvalidParameter {
            param: "num_points".to_string(),
            value: num_points.to_string(),
            expected: "at least 1".to_string(),
        });
    }

    if num_points == 1 {
        return Ok(vec![min_freq]);
    }

    let ratio = max_freq / min_freq;
    let last = (num_points - 1) as f64;
    Ok((0..num_points)
        .map(|i| min_freq * ratio.powf(i as f64 / last))
        .collect())
}

/// Generate `num_points` frequencies over the default 20 Hz - 20 kHz span.
pub fn default_span(num_points: usize) -> Result<Vec<f64>> {
    generate_frequencies(num_points, DEFAULT_MIN_FREQ_HZ, DEFAULT_MAX_FREQ_HZ)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_endpoints_and_ordering() {
        let freqs = generate_frequencies(512, 20.0, 20_000.0).unwrap();
        assert_eq!(freqs.len(), 512);
        assert!((freqs[0] - 20.0).abs() < 1e-9);
        assert!((freqs[511] - 20_000.0).abs() < 1e-6);

        for pair in freqs.windows(2) {
            assert!(pair[0] < pair[1], "Grid must be strictly ascending");
        }
    }

    #[test]
    fn test_grid_is_log_uniform() {
        let freqs = generate_frequencies(11, 10.0, 10_240.0).unwrap();
        // Ratio of consecutive points is constant on a log-uniform grid
        let step = freqs[1] / freqs[0];
        for pair in freqs.windows(2) {
            assert!((pair[1] / pair[0] - step).abs() < 1e-9);
        }
        assert!((step - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_grid() {
        let freqs = generate_frequencies(1, 20.0, 20_000.0).unwrap();
        assert_eq!(freqs, vec![20.0]);
    }

    #[test]
    fn test_zero_points_is_rejected() {
        let err = generate_frequencies(0, 20.0, 20_000.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_grid_is_deterministic() {
        let a = default_span(256).unwrap();
        let b = default_span(256).unwrap();
        assert_eq!(a, b);
    }
}
