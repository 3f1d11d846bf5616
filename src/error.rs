//! 错误类型
//!
//! 钱包配置与币种分发核心的统一错误。所有错误直接返回给调用方，
//! 核心内部不记录、不重试。

use thiserror::Error;

use crate::domain::coin::ChainError;

/// 核心错误
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// 必需的构造输入缺失（空助记词、空种子）或参数非法
    #[error("validation failed: {0}")]
    Validation(String),

    /// 币种不在分发注册表中
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// 币种已注册，但链元数据缺失或不一致
    #[error("metadata error for {symbol}: {reason}")]
    Metadata { symbol: String, reason: String },

    /// 外部币种构造器返回的错误，附带币种上下文
    #[error("failed to initialize coin {symbol}: {source}")]
    Construction {
        symbol: String,
        #[source]
        source: ChainError,
    },

    /// 助记词无法解析（种子派生协作方失败）
    #[error("invalid mnemonic: {0}")]
    Mnemonic(#[from] bip39::Error),

    /// 明确推迟实现的功能
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn metadata(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Metadata {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// 稳定的错误码（snake_case），便于上层映射
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::UnsupportedCurrency(_) => "chain_not_supported",
            Self::Metadata { .. } => "metadata_error",
            Self::Construction { .. } => "derivation_failed",
            Self::Mnemonic(_) => "invalid_mnemonic",
            Self::NotImplemented(_) => "not_implemented",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_unsupported_currency_names_symbol() {
        let err = Error::UnsupportedCurrency("ZZZ".to_string());
        assert_eq!(err.to_string(), "unsupported currency: ZZZ");
        assert_eq!(err.code(), "chain_not_supported");
    }

    #[test]
    fn test_construction_error_keeps_source() {
        let err = Error::Construction {
            symbol: "ETH".to_string(),
            source: ChainError::InvalidPath("m/x".to_string()),
        };

        assert!(err.to_string().starts_with("failed to initialize coin ETH"));
        assert!(err.source().is_some());
        assert_eq!(err.code(), "derivation_failed");
    }
}
