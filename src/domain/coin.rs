//! 币种能力对象与构造器接口
//!
//! 核心不关心具体链的签名、地址编码；只要求构造器能从
//! (种子, 路径模板, 派生 key, 网络, 选项) 构造出实现 [`Coin`] 的对象。

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::chain_config::{ChainConfig, Network};

/// 链相关的构造/派生错误
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChainError {
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("no bip44 coin type registered for key {0}")]
    UnknownCoinType(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("{chain} does not support {network}")]
    UnsupportedNetwork { chain: String, network: Network },

    #[error("invalid chain metadata: {0}")]
    InvalidMetadata(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 单个币种的签名/地址上下文
pub trait Coin: fmt::Debug + Send + Sync {
    fn symbol(&self) -> &str;

    /// 实际使用的派生路径
    fn derivation_path(&self) -> &str;

    fn derive_address(&self) -> Result<String, ChainError>;

    fn derive_public_key(&self) -> Result<String, ChainError>;

    fn derive_private_key(&self) -> Result<Zeroizing<String>, ChainError>;
}

/// 链族专属的选项包
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinOptions(BTreeMap<&'static str, bool>);

impl CoinOptions {
    pub fn set(&mut self, key: &'static str, value: bool) {
        self.0.insert(key, value);
    }

    /// 未设置的选项视为 false
    pub fn is_enabled(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 构造器输入
#[derive(Debug, Clone, Copy)]
pub struct CoinContext<'a> {
    pub symbol: &'a str,
    pub seed: &'a [u8],
    pub path_format: &'a str,
    /// 解析后的派生 key
    pub bip44_key: &'a str,
    pub network: Network,
    /// 种子已按该密码派生，供需要额外口令的构造器使用
    pub password: Option<&'a str>,
    pub options: &'a CoinOptions,
    pub metadata: &'a ChainConfig,
}

/// 链族构造器
pub trait CoinConstructor: Send + Sync {
    fn construct(&self, ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError>;
}

/// 函数形式的构造器
pub type ConstructorFn = for<'a, 'b> fn(&'a CoinContext<'b>) -> Result<Box<dyn Coin>, ChainError>;

impl CoinConstructor for ConstructorFn {
    fn construct(&self, ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError> {
        self(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_false() {
        let mut options = CoinOptions::default();
        assert!(options.is_empty());
        assert!(!options.is_enabled("share"));

        options.set("share", true);
        assert!(options.is_enabled("share"));
    }

    #[test]
    fn test_unsupported_network_message() {
        let err = ChainError::UnsupportedNetwork {
            chain: "TRX".to_string(),
            network: Network::Testnet,
        };
        assert_eq!(err.to_string(), "TRX does not support testnet");
    }
}
