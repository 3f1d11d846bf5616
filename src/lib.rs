//! hdwallet-core - 多币种 HD 钱包核心
//!
//! 助记词 → 种子 → 按币种 bip44 路径派生密钥与地址。钱包值不可变，
//! 选项作用于副本；币种初始化经由静态注册表分发。

pub mod chains;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// 重新导出常用类型
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::{
        domain::{
            build_wallet_from_mnemonic, Coin, CoinRegistry, Wallet, WalletBuilder, WalletOption,
            WalletOptions,
        },
        error::{Error, Result},
    };
}
