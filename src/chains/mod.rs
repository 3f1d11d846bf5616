//! 内置链族构造器
//!
//! 默认注册表使用的协作方实现。构造时即完成派生，
//! 路径或元数据错误在 `init_coin` 阶段暴露。

pub mod bbc;
pub mod btc;
pub mod eth;
mod keys;
pub mod omni;
pub mod trx;

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::coin::{ChainError, Coin};

/// 已完成派生的币种上下文
pub struct DerivedCoin {
    symbol: String,
    path: String,
    address: String,
    public_key: String,
    private_key: Zeroizing<String>,
}

impl DerivedCoin {
    pub(crate) fn new(
        symbol: &str,
        path: String,
        address: String,
        public_key: String,
        private_key: Zeroizing<String>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            path,
            address,
            public_key,
            private_key,
        }
    }
}

impl Coin for DerivedCoin {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn derivation_path(&self) -> &str {
        &self.path
    }

    fn derive_address(&self) -> Result<String, ChainError> {
        Ok(self.address.clone())
    }

    fn derive_public_key(&self) -> Result<String, ChainError> {
        Ok(self.public_key.clone())
    }

    fn derive_private_key(&self) -> Result<Zeroizing<String>, ChainError> {
        Ok(self.private_key.clone())
    }
}

impl fmt::Debug for DerivedCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedCoin")
            .field("symbol", &self.symbol)
            .field("path", &self.path)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
