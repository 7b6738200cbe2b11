use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Price field used as the source of the indicator computation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    #[strum(serialize = "open")]
    Open,
    #[strum(serialize = "high")]
    High,
    #[strum(serialize = "low")]
    Low,
    #[strum(serialize = "close")]
    #[default]
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_source_from_str() {
        assert_eq!(PriceSource::from_str("close").unwrap(), PriceSource::Close);
        assert_eq!(PriceSource::from_str("open").unwrap(), PriceSource::Open);
        assert_eq!(PriceSource::from_str("high").unwrap(), PriceSource::High);
        assert_eq!(PriceSource::from_str("low").unwrap(), PriceSource::Low);
        assert!(PriceSource::from_str("hl2").is_err());
    }

    #[test]
    fn test_price_source_display() {
        assert_eq!(PriceSource::Close.to_string(), "close");
        assert_eq!(PriceSource::High.to_string(), "high");
    }
}
