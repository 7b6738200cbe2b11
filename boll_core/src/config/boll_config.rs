use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::boll_error::{BollError, ErrCode};
use crate::common::enums::PriceSource;

/// Bollinger Bands calculation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    /// Rolling window size in bars, must be >= 1
    pub length: usize,
    pub source: PriceSource,
    /// Scales band width, must be finite and >= 0
    pub std_dev_multiplier: f64,
    /// Shifts the computed indicator relative to the price series index
    pub offset: i64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            length: 20,
            source: PriceSource::Close,
            std_dev_multiplier: 2.0,
            offset: 0,
        }
    }
}

impl BollingerConfig {
    /// Build a config from a loose JSON map, rejecting unknown keys.
    /// Missing keys fall back to defaults.
    pub fn from_map(conf: &HashMap<String, serde_json::Value>) -> Result<Self, BollError> {
        let mut config = Self::default();

        for (k, v) in conf {
            match k.as_str() {
                "length" => {
                    config.length = v.as_u64().ok_or_else(|| {
                        BollError::new(format!("length must be a positive integer, got {v}"), ErrCode::ParaError)
                    })? as usize;
                }
                "source" => {
                    let s = v.as_str().ok_or_else(|| {
                        BollError::new(format!("source must be a string, got {v}"), ErrCode::ConfigError)
                    })?;
                    config.source = PriceSource::from_str(s).map_err(|_| {
                        BollError::new(format!("unknown source field: {s}"), ErrCode::ConfigError)
                    })?;
                }
                "std_dev_multiplier" => {
                    config.std_dev_multiplier = v.as_f64().ok_or_else(|| {
                        BollError::new(format!("std_dev_multiplier must be a number, got {v}"), ErrCode::ParaError)
                    })?;
                }
                "offset" => {
                    config.offset = v.as_i64().ok_or_else(|| {
                        BollError::new(format!("offset must be an integer, got {v}"), ErrCode::ParaError)
                    })?;
                }
                _ => {
                    return Err(BollError::new(
                        format!("unknown config key: {k}"),
                        ErrCode::ConfigError,
                    ));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject malformed parameters before any computation runs.
    pub fn validate(&self) -> Result<(), BollError> {
        if self.length < 1 {
            return Err(BollError::new(
                format!("length must be >= 1, got {}", self.length),
                ErrCode::ParaError,
            ));
        }
        if !self.std_dev_multiplier.is_finite() || self.std_dev_multiplier < 0.0 {
            return Err(BollError::new(
                format!(
                    "std_dev_multiplier must be finite and >= 0, got {}",
                    self.std_dev_multiplier
                ),
                ErrCode::ParaError,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BollingerConfig::default();
        assert_eq!(config.length, 20);
        assert_eq!(config.source, PriceSource::Close);
        assert_eq!(config.std_dev_multiplier, 2.0);
        assert_eq!(config.offset, 0);
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        let config = BollingerConfig {
            length: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
    }

    #[test]
    fn test_validate_rejects_bad_multiplier() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let config = BollingerConfig {
                std_dev_multiplier: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_from_map_overrides_defaults() {
        let mut conf = HashMap::new();
        conf.insert("length".to_string(), serde_json::Value::from(14));
        conf.insert("source".to_string(), serde_json::Value::from("high"));
        conf.insert("offset".to_string(), serde_json::Value::from(-2));

        let config = BollingerConfig::from_map(&conf).unwrap();
        assert_eq!(config.length, 14);
        assert_eq!(config.source, PriceSource::High);
        assert_eq!(config.std_dev_multiplier, 2.0);
        assert_eq!(config.offset, -2);
    }

    #[test]
    fn test_from_map_rejects_unknown_key() {
        let mut conf = HashMap::new();
        conf.insert("window".to_string(), serde_json::Value::from(14));
        let err = BollingerConfig::from_map(&conf).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
    }

    #[test]
    fn test_from_map_rejects_unknown_source() {
        let mut conf = HashMap::new();
        conf.insert("source".to_string(), serde_json::Value::from("hlc3"));
        let err = BollingerConfig::from_map(&conf).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: BollingerConfig = serde_json::from_str(r#"{"length":10,"source":"low"}"#).unwrap();
        assert_eq!(config.length, 10);
        assert_eq!(config.source, PriceSource::Low);
        assert_eq!(config.offset, 0);
    }
}
