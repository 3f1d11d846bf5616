//! Domain 模块
//!
//! 钱包值、选项、bip44 路径、派生 key 解析与币种分发

pub mod bip44;
pub mod builder;
pub mod chain_config;
pub mod coin;
pub mod derivation;
pub mod options;
pub mod registry;
pub mod seed;
pub mod wallet;

// 重新导出常用类型
pub use bip44::{FULL_PATH_FORMAT, PATH_FORMAT};
pub use builder::{build_wallet_from_mnemonic, build_wallet_from_private_key, WalletBuilder};
pub use chain_config::{AddressFormat, ChainConfig, ChainFamily, ChainRegistry, CurveType, Network};
pub use coin::{ChainError, Coin, CoinConstructor, CoinContext, CoinOptions};
pub use derivation::{
    resolve_bip44_key, FLAG_BBC_USE_STANDARD_BIP44_ID, FLAG_MKF_USE_BBC_BIP44_ID,
};
pub use options::{WalletOption, WalletOptions};
pub use registry::CoinRegistry;
pub use seed::{Bip39SeedDeriver, SeedDeriver};
pub use wallet::{Wallet, WalletFlags};
