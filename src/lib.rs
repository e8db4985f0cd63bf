//! EqCurve - Parametric EQ Frequency-Response Engine
//!
//! EqCurve computes the theoretical frequency-magnitude response of a
//! cascade of second-order (biquad) filters configured as a parametric
//! equalizer. Coefficients follow the Audio EQ Cookbook designs exactly,
//! so the same math that draws the curve also parameterizes the live
//! filter chain.
//!
//! # Architecture
//!
//! Three pure, stateless components:
//! - Frequency grid generator: log-spaced evaluation frequencies
//! - Band response engine: cookbook coefficient design + z-transform
//!   magnitude evaluation, one band at one frequency
//! - Aggregate calculator: bands x frequencies dB summation, clamped
//!
//! Everything is safe to call concurrently; each call only reads its
//! arguments and returns caller-owned output.

pub mod band;
pub mod biquad;
pub mod error;
pub mod grid;
pub mod response;

pub use band::{Band, FilterType};
pub use biquad::BiquadCoeffs;
pub use error::{EqCurveError, Result};
pub use grid::generate_frequencies;
pub use response::{
    aggregate_response, band_response_db, response_at_frequencies, response_for_state,
    ResponseCurve, ResponseOptions,
};
