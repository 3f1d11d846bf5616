//! 种子派生
//!
//! 助记词 -> 种子由外部协作方完成，核心只依赖 [`SeedDeriver`]。

use bip39::Mnemonic;
use zeroize::Zeroizing;

use crate::error::Result;

/// 种子派生协作方
pub trait SeedDeriver: Send + Sync {
    /// 由助记词和 passphrase 派生种子，助记词格式错误时返回错误
    fn derive_seed(&self, mnemonic: &str, passphrase: &str) -> Result<Zeroizing<Vec<u8>>>;
}

/// BIP39 种子派生（自动识别英文/简体中文词表）
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39SeedDeriver;

impl SeedDeriver for Bip39SeedDeriver {
    fn derive_seed(&self, mnemonic: &str, passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
        let mnemonic = Mnemonic::parse(mnemonic)?;
        let seed = Zeroizing::new(mnemonic.to_seed(passphrase));
        Ok(Zeroizing::new(seed.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_bip39_seed_vector() {
        // BIP39 测试向量（passphrase "TREZOR"）
        let seed = Bip39SeedDeriver
            .derive_seed(TEST_MNEMONIC, "TREZOR")
            .unwrap();
        assert_eq!(
            hex::encode(&seed[..]),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_passphrase_changes_seed() {
        let plain = Bip39SeedDeriver.derive_seed(TEST_MNEMONIC, "").unwrap();
        let salted = Bip39SeedDeriver.derive_seed(TEST_MNEMONIC, "pass").unwrap();
        assert_ne!(plain, salted);
    }

    #[test]
    fn test_malformed_mnemonic() {
        assert!(Bip39SeedDeriver.derive_seed("abandon abandon", "").is_err());
    }
}
