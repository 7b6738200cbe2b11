use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the indicator system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    #[strum(serialize = "COMMON_ERROR")]
    CommonError = 1,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "BAR_DATA_INVALID")]
    BarDataInvalid = 203,
}

#[derive(Debug, Error)]
#[error("{errcode}: {msg}")]
pub struct BollError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl BollError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_config_err(&self) -> bool {
        matches!(self.errcode, ErrCode::ConfigError | ErrCode::ParaError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BollError::new("length must be >= 1", ErrCode::ParaError);
        assert_eq!(err.to_string(), "PARA_ERROR: length must be >= 1");
    }

    #[test]
    fn test_is_config_err() {
        assert!(BollError::new("x", ErrCode::ConfigError).is_config_err());
        assert!(BollError::new("x", ErrCode::ParaError).is_config_err());
        assert!(!BollError::new("x", ErrCode::BarDataInvalid).is_config_err());
    }
}
