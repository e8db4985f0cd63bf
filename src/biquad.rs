//! Biquad coefficient design and magnitude evaluation
//!
//! Implements the Audio EQ Cookbook designs for the five supported filter
//! types and evaluates the resulting transfer function on the unit circle.
//! Reference: https://www.w3.org/2011/audio/audio-eq-cookbook.html
//!
//! Both halves follow the robustness contract of the response engine: a
//! derivation that cannot produce a usable filter yields `None`, and an
//! evaluation that cannot produce a finite magnitude yields 0 dB.

use std::f64::consts::PI;

use crate::band::FilterType;

/// Evaluation and design frequencies are pinned just below Nyquist;
/// nothing is computed at or above half the sample rate.
const NYQUIST_CLAMP_RATIO: f64 = 0.999999;

/// Normalized biquad filter coefficients
///
/// Transfer function: `H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)`,
/// all coefficients already divided by `a0`. Computed fresh per
/// (band, sample rate); never cached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Derive normalized coefficients for one band.
    ///
    /// `slope` is the shelf slope `S`; shelf designs fall back to `q` when
    /// it is absent. Pass filters ignore `gain_db`.
    ///
    /// Returns `None` when the parameters cannot produce a usable filter
    /// (non-positive or non-finite frequency, sample rate, Q or slope, or a
    /// degenerate `a0`). Callers treat `None` as a no-op band.
    pub fn design(
        filter: FilterType,
        frequency: f64,
        gain_db: f64,
        q: f64,
        slope: Option<f64>,
        sample_rate: f64,
    ) -> Option<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return None;
        }

        let nyquist = sample_rate / 2.0;
        let f0 = frequency.min(nyquist * NYQUIST_CLAMP_RATIO);

        let w0 = 2.0 * PI * f0 / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let a = 10.0_f64.powf(gain_db / 40.0);

        let (b0, b1, b2, a0, a1, a2) = match filter {
            FilterType::Peaking => {
                if !q.is_finite() || q <= 0.0 {
                    return None;
                }
                let alpha = sin_w0 / (2.0 * q);
                (
                    1.0 + alpha * a,
                    -2.0 * cos_w0,
                    1.0 - alpha * a,
                    1.0 + alpha / a,
                    -2.0 * cos_w0,
                    1.0 - alpha / a,
                )
            }
            FilterType::LowShelf => {
                let alpha = shelf_alpha(sin_w0, a, slope.unwrap_or(q))?;
                let beta = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) - (a - 1.0) * cos_w0 + beta),
                    2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
                    a * ((a + 1.0) - (a - 1.0) * cos_w0 - beta),
                    (a + 1.0) + (a - 1.0) * cos_w0 + beta,
                    -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
                    (a + 1.0) + (a - 1.0) * cos_w0 - beta,
                )
            }
            FilterType::HighShelf => {
                let alpha = shelf_alpha(sin_w0, a, slope.unwrap_or(q))?;
                let beta = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 + beta),
                    -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 - beta),
                    (a + 1.0) - (a - 1.0) * cos_w0 + beta,
                    2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
                    (a + 1.0) - (a - 1.0) * cos_w0 - beta,
                )
            }
            FilterType::LowPass => {
                if !q.is_finite() || q <= 0.0 {
                    return None;
                }
                let alpha = sin_w0 / (2.0 * q);
                (
                    (1.0 - cos_w0) / 2.0,
                    1.0 - cos_w0,
                    (1.0 - cos_w0) / 2.0,
                    1.0 + alpha,
                    -2.0 * cos_w0,
                    1.0 - alpha,
                )
            }
            FilterType::HighPass => {
                if !q.is_finite() || q <= 0.0 {
                    return None;
                }
                let alpha = sin_w0 / (2.0 * q);
                (
                    (1.0 + cos_w0) / 2.0,
                    -(1.0 + cos_w0),
                    (1.0 + cos_w0) / 2.0,
                    1.0 + alpha,
                    -2.0 * cos_w0,
                    1.0 - alpha,
                )
            }
        };

        if a0 == 0.0 || !a0.is_finite() {
            return None;
        }

        let coeffs = Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        };
        coeffs.is_finite().then_some(coeffs)
    }

    fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Magnitude response at the given frequency, in dB.
    ///
    /// Evaluates `H(z)` at `z = e^(jw)` with `w = 2*pi*f/sample_rate`, the
    /// frequency clamped just below Nyquist. Returns 0 dB whenever the
    /// response is not evaluable (non-positive inputs, vanishing
    /// denominator, non-finite intermediates).
    pub fn magnitude_db(&self, frequency: f64, sample_rate: f64) -> f64 {
        if !frequency.is_finite() || frequency <= 0.0 {
            return 0.0;
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return 0.0;
        }

        let nyquist = sample_rate / 2.0;
        let w = 2.0 * PI * frequency.min(nyquist * NYQUIST_CLAMP_RATIO) / sample_rate;

        let cos_w = w.cos();
        let sin_w = w.sin();
        let cos_2w = (2.0 * w).cos();
        let sin_2w = (2.0 * w).sin();

        // H(e^jw) expanded into real/imaginary parts
        let num_re = self.b0 + self.b1 * cos_w + self.b2 * cos_2w;
        let num_im = -(self.b1 * sin_w + self.b2 * sin_2w);
        let den_re = 1.0 + self.a1 * cos_w + self.a2 * cos_2w;
        let den_im = -(self.a1 * sin_w + self.a2 * sin_2w);

        let num_mag_sq = num_re * num_re + num_im * num_im;
        let den_mag_sq = den_re * den_re + den_im * den_im;
        if den_mag_sq == 0.0 || !den_mag_sq.is_finite() || !num_mag_sq.is_finite() {
            return 0.0;
        }

        let magnitude = (num_mag_sq / den_mag_sq).sqrt();
        let db = 20.0 * magnitude.log10();
        if db.is_finite() {
            db
        } else {
            0.0
        }
    }
}

/// Cookbook shelf alpha from the slope parameter `S`.
///
/// `alpha = (sin(w0)/2) * sqrt((A + 1/A)*(1/S - 1) + 2)`, with the radicand
/// floored at zero for steep slopes.
fn shelf_alpha(sin_w0: f64, a: f64, s: f64) -> Option<f64> {
    if !s.is_finite() || s <= 0.0 {
        return None;
    }
    let radicand = ((a + 1.0 / a) * (1.0 / s - 1.0) + 2.0).max(0.0);
    let alpha = sin_w0 / 2.0 * radicand.sqrt();
    alpha.is_finite().then_some(alpha)
}

// ============================================================================
// Tests
// ============================================================================
