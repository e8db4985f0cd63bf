//! EQ band parameter records
//!
//! A [`Band`] is an immutable value record describing one stage of the
//! series biquad cascade. Bands carry no identity beyond value equality;
//! the caller (UI state or preset store) owns every sequence of them.

use serde::{Deserialize, Serialize};

use crate::error::{EqCurveError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Upper bound of the audible span accepted by [`Band::validate`]
pub const MAX_FREQUENCY_HZ: f64 = 20_000.0;

/// Maximum boost/cut in dB accepted by [`Band::validate`]
pub const MAX_GAIN_DB: f64 = 24.0;

/// Maximum quality factor accepted by [`Band::validate`]
pub const MAX_Q: f64 = 10.0;

/// Octave-spaced center frequencies of the stock 10-band layout
const TEN_BAND_FREQUENCIES: [f64; 10] = [
    31.25, 62.5, 125.0, 250.0, 500.0, 1_000.0, 2_000.0, 4_000.0, 8_000.0, 16_000.0,
];

/// Q giving roughly one-octave bandwidth per band in the stock layout
const TEN_BAND_Q: f64 = 1.41;

fn default_q() -> f64 {
    1.0
}

// ============================================================================
// Filter Type
// ============================================================================

/// Filter type for EQ bands
///
/// Closed over the five cookbook designs. Tags use the lowercase names the
/// audio-graph driver consumes (`"lowshelf"`, not `"low_shelf"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Bell curve boost/cut around the center frequency
    #[default]
    Peaking,
    /// Boost/cut below the corner frequency
    LowShelf,
    /// Boost/cut above the corner frequency
    HighShelf,
    /// Attenuate above the corner frequency
    LowPass,
    /// Attenuate below the corner frequency
    HighPass,
}

impl FilterType {
    /// Whether the design consumes the band's gain parameter.
    ///
    /// Pass filters are pure magnitude-shaping stages; their gain field is
    /// ignored by the coefficient design.
    pub fn uses_gain(&self) -> bool {
        matches!(
            self,
            FilterType::Peaking | FilterType::LowShelf | FilterType::HighShelf
        )
    }
}

// ============================================================================
// Band
// ============================================================================

/// Single EQ band configuration
///
/// Serialized field names match the record shape produced by the UI and
/// preset layers (`type`, `Q`, `S`, `sampleRate` all accepted on input).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Center/corner frequency in Hz (> 0)
    pub frequency: f64,
    /// Boost or cut in dB (ignored by pass filters)
    #[serde(default)]
    pub gain: f64,
    /// Quality factor (> 0)
    #[serde(default = "default_q", alias = "Q")]
    pub q: f64,
    /// Shelf slope; shelf designs fall back to `q` when absent
    #[serde(default, alias = "S", skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    /// Filter type
    #[serde(rename = "type", default)]
    pub filter: FilterType,
    /// Per-band sample-rate override in Hz
    #[serde(default, alias = "sampleRate", skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f64>,
}

impl Default for Band {
    fn default() -> Self {
        Self {
            frequency: 1_000.0,
            gain: 0.0,
            q: default_q(),
            slope: None,
            filter: FilterType::Peaking,
            sample_rate: None,
        }
    }
}

impl Band {
    /// Create a new band with the specified parameters
    pub fn new(frequency: f64, gain: f64, q: f64, filter: FilterType) -> Self {
        Self {
            frequency,
            gain,
            q,
            filter,
            ..Default::default()
        }
    }

    /// Create a peaking band
    pub fn peaking(frequency: f64, gain: f64, q: f64) -> Self {
        Self::new(frequency, gain, q, FilterType::Peaking)
    }

    /// Create a low shelf band
    pub fn low_shelf(frequency: f64, gain: f64, q: f64) -> Self {
        Self::new(frequency, gain, q, FilterType::LowShelf)
    }

    /// Create a high shelf band
    pub fn high_shelf(frequency: f64, gain: f64, q: f64) -> Self {
        Self::new(frequency, gain, q, FilterType::HighShelf)
    }

    /// Create a low-pass band
    pub fn low_pass(frequency: f64, q: f64) -> Self {
        Self::new(frequency, 0.0, q, FilterType::LowPass)
    }

    /// Create a high-pass band
    pub fn high_pass(frequency: f64, q: f64) -> Self {
        Self::new(frequency, 0.0, q, FilterType::HighPass)
    }

    /// Set the shelf slope, used in place of Q by the shelf designs
    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = Some(slope);
        self
    }

    /// The stock flat 10-band layout: octave-spaced peaking bands from
    /// 31.25 Hz to 16 kHz at zero gain.
    pub fn ten_band_layout() -> Vec<Band> {
        TEN_BAND_FREQUENCIES
            .iter()
            .map(|&frequency| Band {
                frequency,
                q: TEN_BAND_Q,
                ..Default::default()
            })
            .collect()
    }

    /// Validate band parameters against the application-level ranges.
    ///
    /// This is a boundary check for preset/UI callers that want to reject
    /// a band before storing it. Response evaluation never calls it; out of
    /// range values there degrade to a 0 dB contribution instead.
    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 || self.frequency > MAX_FREQUENCY_HZ
        {
            return Err(EqCurveError::InvalidParameter {
                param: "frequency".to_string(),
                value: self.frequency.to_string(),
                expected: format!("0 < frequency <= {} Hz", MAX_FREQUENCY_HZ),
            });
        }

        if !self.gain.is_finite() || self.gain.abs() > MAX_GAIN_DB {
            return Err(EqCurveError::InvalidParameter {
                param: "gain".to_string(),
                value: self.gain.to_string(),
                expected: format!("-{} to +{} dB", MAX_GAIN_DB, MAX_GAIN_DB),
            });
        }

        if !self.q.is_finite() || self.q <= 0.0 || self.q > MAX_Q {
            return Err(EqCurveError::InvalidParameter {
                param: "q".to_string(),
                value: self.q.to_string(),
                expected: format!("0 < Q <= {}", MAX_Q),
            });
        }

        if let Some(slope) = self.slope {
            if !slope.is_finite() || slope <= 0.0 {
                return Err(EqCurveError::InvalidParameter {
                    param: "slope".to_string(),
                    value: slope.to_string(),
                    expected: "positive finite slope".to_string(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
