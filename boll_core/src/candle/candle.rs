use serde::{Deserialize, Serialize};

use crate::common::boll_error::{BollError, ErrCode};
use crate::common::enums::PriceSource;

/// A single OHLCV bar. `timestamp` is milliseconds since epoch; ordering
/// across a series is the caller's responsibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Value of the selected price field.
    pub fn value(&self, source: PriceSource) -> f64 {
        match source {
            PriceSource::Open => self.open,
            PriceSource::High => self.high,
            PriceSource::Low => self.low,
            PriceSource::Close => self.close,
        }
    }

    /// Verify that `low`/`high` bound the other price fields. With
    /// `autofix` the bounds are widened in place instead of erroring.
    pub fn check(&mut self, autofix: bool) -> Result<(), BollError> {
        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if autofix {
                self.low = min_price;
            } else {
                return Err(BollError::new(
                    format!(
                        "ts={} low price={} is not min of [low={}, open={}, high={}, close={}]",
                        self.timestamp, self.low, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::BarDataInvalid,
                ));
            }
        }

        if self.high < max_price {
            if autofix {
                self.high = max_price;
            } else {
                return Err(BollError::new(
                    format!(
                        "ts={} high price={} is not max of [low={}, open={}, high={}, close={}]",
                        self.timestamp, self.high, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::BarDataInvalid,
                ));
            }
        }
        Ok(())
    }
}

impl PartialEq for Candle {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.close == other.close
            && self.open == other.open
            && self.high == other.high
            && self.low == other.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_selects_field() {
        let c = Candle::new(0, 1.0, 4.0, 0.5, 2.0, 100.0);
        assert_eq!(c.value(PriceSource::Open), 1.0);
        assert_eq!(c.value(PriceSource::High), 4.0);
        assert_eq!(c.value(PriceSource::Low), 0.5);
        assert_eq!(c.value(PriceSource::Close), 2.0);
    }

    #[test]
    fn test_check_rejects_bad_bounds() {
        let mut c = Candle::new(0, 1.0, 1.5, 1.2, 2.0, 0.0);
        assert!(c.check(false).is_err());
    }

    #[test]
    fn test_check_autofix_widens_bounds() {
        let mut c = Candle::new(0, 1.0, 1.5, 1.2, 2.0, 0.0);
        c.check(true).unwrap();
        assert_eq!(c.low, 1.0);
        assert_eq!(c.high, 2.0);
    }

    #[test]
    fn test_candle_deserialize() {
        let json = r#"{"timestamp":1700000000000,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":42.0}"#;
        let c: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(c.timestamp, 1700000000000);
        assert_eq!(c.close, 1.5);
    }
}
