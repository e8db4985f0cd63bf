//! Aggregate frequency-response calculation
//!
//! Combines per-band magnitude responses into the curve the UI plots and
//! the real-time chain is checked against. Bands combine by summing their
//! dB contributions: each band is an independent series stage, and dB
//! addition approximates the cascade magnitude for small-to-moderate gains.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::band::Band;
use crate::biquad::BiquadCoeffs;
use crate::error::{EqCurveError, Result};
use crate::grid::{generate_frequencies, DEFAULT_MAX_FREQ_HZ, DEFAULT_MIN_FREQ_HZ};

// ============================================================================
// Constants
// ============================================================================

/// Aggregate magnitudes are clamped to +/- this bound in dB
pub const RESPONSE_CLAMP_DB: f64 = 48.0;

/// Peaking/shelf bands with |gain| below this are exact no-ops
pub const GAIN_BYPASS_EPSILON_DB: f64 = 0.01;

/// Default number of points on a generated curve
pub const DEFAULT_NUM_POINTS: usize = 512;

/// Default evaluation sample rate in Hz
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 48_000.0;

// ============================================================================
// Options & Curve
// ============================================================================

/// Evaluation options, resolved once at the call boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseOptions {
    /// Number of points on a generated curve
    pub num_points: usize,
    /// Lower edge of the generated span in Hz
    pub min_freq: f64,
    /// Upper edge of the generated span in Hz
    pub max_freq: f64,
    /// Evaluation sample rate in Hz; a band's own `sample_rate` wins
    pub sample_rate: f64,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
            min_freq: DEFAULT_MIN_FREQ_HZ,
            max_freq: DEFAULT_MAX_FREQ_HZ,
            sample_rate: DEFAULT_SAMPLE_RATE_HZ,
        }
    }
}

/// A computed response curve: (frequency, magnitude) pairs stored as two
/// parallel sequences of equal length, frequencies strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    pub frequencies: Vec<f64>,
    pub magnitude_db: Vec<f64>,
}

impl ResponseCurve {
    /// Number of points on the curve
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

// ============================================================================
// Per-band response
// ============================================================================

/// Magnitude contribution of one band at one frequency, in dB.
///
/// Never fails: this feeds visualization that must survive malformed or
/// partially-edited band data. Any invalid numeric state (non-positive or
/// non-finite frequencies or sample rate, degenerate coefficient
/// derivation) contributes exactly 0 dB. A peaking or shelf band with
/// |gain| below [`GAIN_BYPASS_EPSILON_DB`] is a true no-op regardless of Q.
///
/// The band's own `sample_rate` overrides the supplied one when present.
pub fn band_response_db(frequency: f64, band: &Band, sample_rate: f64) -> f64 {
    let sample_rate = band.sample_rate.unwrap_or(sample_rate);

    if !frequency.is_finite() || frequency <= 0.0 {
        return 0.0;
    }
    if !band.frequency.is_finite() || band.frequency <= 0.0 {
        return 0.0;
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return 0.0;
    }
    if band.filter.uses_gain() && band.gain.abs() < GAIN_BYPASS_EPSILON_DB {
        return 0.0;
    }

    match BiquadCoeffs::design(
        band.filter,
        band.frequency,
        band.gain,
        band.q,
        band.slope,
        sample_rate,
    ) {
        Some(coeffs) => coeffs.magnitude_db(frequency, sample_rate),
        None => 0.0,
    }
}

// ============================================================================
// Aggregate response
// ============================================================================

/// Compute the aggregate response curve for a band set.
///
/// Generates a log-spaced grid per `options`, sums every band's dB
/// contribution at each point and clamps the sum to
/// +/-[`RESPONSE_CLAMP_DB`].
///
/// # Errors
/// `InvalidParameter` when `options.num_points` is zero.
pub fn aggregate_response(bands: &[Band], options: &ResponseOptions) -> Result<ResponseCurve> {
    let frequencies = generate_frequencies(options.num_points, options.min_freq, options.max_freq)?;
    let magnitude_db = sum_bands_at(bands, &frequencies, options.sample_rate);
    Ok(ResponseCurve {
        frequencies,
        magnitude_db,
    })
}

/// Point-sample the aggregate response at caller-supplied frequencies.
///
/// Identical summation and clamping to [`aggregate_response`], evaluated on
/// `target_frequencies` instead of a generated grid. Output order matches
/// the input order.
pub fn response_at_frequencies(
    bands: &[Band],
    target_frequencies: &[f64],
    options: &ResponseOptions,
) -> Vec<f64> {
    sum_bands_at(bands, target_frequencies, options.sample_rate)
}

fn sum_bands_at(bands: &[Band], frequencies: &[f64], sample_rate: f64) -> Vec<f64> {
    frequencies
        .iter()
        .map(|&frequency| {
            let sum: f64 = bands
                .iter()
                .map(|band| band_response_db(frequency, band, sample_rate))
                .sum();
            sum.clamp(-RESPONSE_CLAMP_DB, RESPONSE_CLAMP_DB)
        })
        .collect()
}

// ============================================================================
// Processor-state wrapper
// ============================================================================

/// Compute the aggregate curve from a processor-state-shaped record
/// (`{"bands": [...]}`).
///
/// Entries that are `null` or fail to parse as a band record (including
/// unrecognized filter type tags) are skipped, contributing 0 dB; this
/// keeps the curve available while a band is mid-edit. A state without a
/// `bands` field is a structural error.
///
/// # Errors
/// `MissingField` when `bands` is absent, `InvalidParameter` when it is not
/// an array, or any [`aggregate_response`] error.
pub fn response_for_state(state: &Value, options: &ResponseOptions) -> Result<ResponseCurve> {
    let entries = state.get("bands").ok_or_else(|| EqCurveError::MissingField {
        field: "bands".to_string(),
    })?;
    let entries = entries
        .as_array()
        .ok_or_else(|| EqCurveError::InvalidParameter {
            param: "bands".to_string(),
            value: entries.to_string(),
            expected: "an array of band records".to_string(),
        })?;

    let bands: Vec<Band> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if entry.is_null() {
                debug!("Skipping null band entry at index {}", index);
                return None;
            }
            match serde_json::from_value::<Band>(entry.clone()) {
                Ok(band) => Some(band),
                Err(err) => {
                    debug!("Skipping unparseable band entry at index {}: {}", index, err);
                    None
                }
            }
        })
        .collect();

    aggregate_response(&bands, options)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::FilterType;
    use serde_json::json;

    #[test]
    fn test_gain_epsilon_bypass_is_exact() {
        for filter in [
            FilterType::Peaking,
            FilterType::LowShelf,
            FilterType::HighShelf,
        ] {
            let band = Band::new(1000.0, 0.005, 8.0, filter);
            for freq in [20.0, 500.0, 1000.0, 16_000.0] {
                assert_eq!(band_response_db(freq, &band, 48_000.0), 0.0);
            }
        }
    }

    #[test]
    fn test_pass_filters_have_no_gain_bypass() {
        // A low-pass with zero gain still filters
        let band = Band::low_pass(1000.0, 0.7);
        assert!(band_response_db(10_000.0, &band, 48_000.0) < -30.0);
    }

    #[test]
    fn test_bad_band_contributes_zero() {
        let band = Band::peaking(-100.0, 12.0, 1.0);
        assert_eq!(band_response_db(1000.0, &band, 48_000.0), 0.0);

        let band = Band::peaking(f64::NAN, 12.0, 1.0);
        assert_eq!(band_response_db(1000.0, &band, 48_000.0), 0.0);

        // Zero Q collapses the derivation, not the caller
        let band = Band::peaking(1000.0, 12.0, 0.0);
        assert_eq!(band_response_db(1000.0, &band, 48_000.0), 0.0);
    }

    #[test]
    fn test_band_sample_rate_override_wins() {
        let band = Band {
            sample_rate: Some(96_000.0),
            ..Band::peaking(1000.0, 6.0, 1.0)
        };
        let overridden = band_response_db(1000.0, &band, 48_000.0);
        let explicit = band_response_db(1000.0, &Band::peaking(1000.0, 6.0, 1.0), 96_000.0);
        assert_eq!(overridden, explicit);
    }

    #[test]
    fn test_aggregate_clamps_to_valid_range() {
        // Five stacked +24 dB bands at the same center sum far past +48
        let bands = vec![Band::peaking(1000.0, 24.0, 1.0); 5];
        let options = ResponseOptions::default();
        let curve = aggregate_response(&bands, &options).unwrap();
        let peak = curve
            .magnitude_db
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(peak, RESPONSE_CLAMP_DB);
        assert!(curve.magnitude_db.iter().all(|&db| db.abs() <= RESPONSE_CLAMP_DB));
    }

    #[test]
    fn test_empty_band_set_is_flat() {
        let curve = aggregate_response(&[], &ResponseOptions::default()).unwrap();
        assert_eq!(curve.len(), DEFAULT_NUM_POINTS);
        assert!(curve.magnitude_db.iter().all(|&db| db == 0.0));
    }

    #[test]
    fn test_state_wrapper_requires_bands() {
        let err = response_for_state(&json!({}), &ResponseOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");

        let err = response_for_state(&json!({"bands": 3}), &ResponseOptions::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_state_wrapper_skips_bad_entries() {
        let state = json!({
            "bands": [
                null,
                {"frequency": 1000.0, "gain": 6.0, "Q": 1.0, "type": "peaking"},
                {"frequency": 500.0, "type": "allpass"},
                {"frequency": "not a number"},
            ]
        });
        let options = ResponseOptions::default();
        let curve = response_for_state(&state, &options).unwrap();

        // Only the one well-formed band contributes
        let expected =
            aggregate_response(&[Band::peaking(1000.0, 6.0, 1.0)], &options).unwrap();
        assert_eq!(curve, expected);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ResponseOptions = serde_json::from_value(json!({"num_points": 64})).unwrap();
        assert_eq!(options.num_points, 64);
        assert_eq!(options.sample_rate, DEFAULT_SAMPLE_RATE_HZ);
        assert_eq!(options.min_freq, DEFAULT_MIN_FREQ_HZ);
        assert_eq!(options.max_freq, DEFAULT_MAX_FREQ_HZ);
    }
}
