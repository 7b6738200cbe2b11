use crate::candle::candle::Candle;
use crate::common::boll_error::BollError;
use crate::config::boll_config::BollingerConfig;

/// One output row of the indicator, aligned index-for-index with the
/// input series. NaN marks positions with no valid value (warmup
/// prefix, or holes left by the offset shift).
#[derive(Debug, Clone, Copy)]
pub struct BandPoint {
    pub upper: f64,
    pub basis: f64,
    pub lower: f64,
}

impl BandPoint {
    pub const UNDEFINED: Self = Self {
        upper: f64::NAN,
        basis: f64::NAN,
        lower: f64::NAN,
    };

    pub fn is_defined(&self) -> bool {
        !self.basis.is_nan()
    }
}

/// Compute Bollinger Bands over `candles`.
///
/// The basis is a simple moving average of the selected source field;
/// the bands sit `std_dev_multiplier` Bessel-corrected sample standard
/// deviations above and below it. The first `length - 1` positions are
/// undefined, and a non-zero `offset` shifts the whole indicator along
/// the index axis, dropping values pushed out of bounds.
///
/// Stateless: recomputes from scratch on every call, output length
/// always equals input length.
pub fn compute_bollinger_bands(
    candles: &[Candle],
    config: &BollingerConfig,
) -> Result<Vec<BandPoint>, BollError> {
    config.validate()?;

    let source_values = extract_source(candles, config);
    let basis_values = sma(&source_values, config.length);
    let std_dev_values = rolling_std_dev(&source_values, config.length);

    let mut result = Vec::with_capacity(candles.len());
    for (&basis, &std_dev) in basis_values.iter().zip(std_dev_values.iter()) {
        if basis.is_nan() || std_dev.is_nan() {
            result.push(BandPoint::UNDEFINED);
        } else {
            result.push(BandPoint {
                upper: basis + (config.std_dev_multiplier * std_dev),
                basis,
                lower: basis - (config.std_dev_multiplier * std_dev),
            });
        }
    }

    Ok(apply_offset(result, config.offset))
}

/// Pull the selected price field out of each bar. A non-finite value is
/// replaced by 0.0 so the rolling window stays computable; this is a
/// documented lossy fallback, not an error.
fn extract_source(candles: &[Candle], config: &BollingerConfig) -> Vec<f64> {
    candles
        .iter()
        .map(|c| {
            let v = c.value(config.source);
            if v.is_finite() {
                v
            } else {
                0.0
            }
        })
        .collect()
}

/// Simple moving average, NaN while the window is not yet full.
fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < period {
            result.push(f64::NAN);
        } else {
            let window = &values[i + 1 - period..=i];
            result.push(window.iter().sum::<f64>() / period as f64);
        }
    }
    result
}

/// Rolling sample standard deviation with an n-1 divisor. For
/// `period == 1` the divisor would be zero, so the deviation is defined
/// as 0.0 at that boundary instead.
fn rolling_std_dev(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < period {
            result.push(f64::NAN);
        } else if period == 1 {
            result.push(0.0);
        } else {
            let window = &values[i + 1 - period..=i];
            let mean = window.iter().sum::<f64>() / period as f64;
            let variance = window
                .iter()
                .map(|&x| (x - mean).powi(2))
                .sum::<f64>()
                / (period - 1) as f64;
            result.push(variance.sqrt());
        }
    }
    result
}

/// Shift every point by `offset` indices into a fresh NaN-prefilled
/// vector; targets outside the series bounds are dropped silently.
fn apply_offset(points: Vec<BandPoint>, offset: i64) -> Vec<BandPoint> {
    if offset == 0 {
        return points;
    }

    let n = points.len();
    let mut shifted = vec![BandPoint::UNDEFINED; n];
    for (i, point) in points.into_iter().enumerate() {
        let target = i as i64 + offset;
        if target >= 0 && (target as usize) < n {
            shifted[target as usize] = point;
        }
    }
    shifted
}
