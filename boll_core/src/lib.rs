pub mod candle;
pub mod common;
pub mod config;
pub mod math;

pub use candle::candle::Candle;
pub use common::boll_error::{BollError, ErrCode};
pub use common::enums::PriceSource;
pub use config::boll_config::BollingerConfig;
pub use math::bollinger::{compute_bollinger_bands, BandPoint};
