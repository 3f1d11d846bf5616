//! 测试辅助模块
//! 提供测试钱包和不校验词表的种子派生

#![allow(dead_code)]

use hdwallet_core::domain::{SeedDeriver, Wallet, WalletBuilder};
use hdwallet_core::Result;
use zeroize::Zeroizing;

/// BIP39 标准测试助记词
pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// 助记词字节即种子，不做 BIP39 校验
pub struct RawSeedDeriver;

impl SeedDeriver for RawSeedDeriver {
    fn derive_seed(&self, mnemonic: &str, _passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(mnemonic.as_bytes().to_vec()))
    }
}

/// 主网测试钱包
pub fn test_wallet() -> Wallet {
    WalletBuilder::new()
        .mnemonic(TEST_MNEMONIC)
        .build()
        .expect("Failed to build test wallet")
}

/// 测试网测试钱包
pub fn test_wallet_on_testnet() -> Wallet {
    WalletBuilder::new()
        .mnemonic(TEST_MNEMONIC)
        .test_network(true)
        .build()
        .expect("Failed to build test wallet")
}
