//! 钱包配置
//!
//! `Wallet` 是只读约定的值对象：助记词/种子、网络选择、密码、路径模板、
//! flag 集合以及子链账户共享开关。外部只能通过 [`WalletOptions`] 在副本上修改。

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::domain::bip44::FULL_PATH_FORMAT;
use crate::domain::coin::Coin;
use crate::domain::derivation::resolve_bip44_key;
use crate::domain::options::WalletOptions;
use crate::domain::registry::CoinRegistry;
use crate::domain::seed::{Bip39SeedDeriver, SeedDeriver};
use crate::error::{Error, Result};

/// flag 集合（去重，顺序无关）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletFlags(BTreeSet<String>);

impl WalletFlags {
    /// 添加 flag，重复添加无副作用。返回是否为新 flag
    pub fn insert(&mut self, flag: impl Into<String>) -> bool {
        self.0.insert(flag.into())
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for WalletFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// HD 钱包配置
#[derive(Clone)]
pub struct Wallet {
    pub(crate) mnemonic: Option<Zeroizing<String>>,
    pub(crate) seed: Zeroizing<Vec<u8>>,
    pub(crate) test_network: bool,
    pub(crate) password: Option<Zeroizing<String>>,
    pub(crate) path_format: String,
    pub(crate) flags: WalletFlags,
    pub(crate) share_account_with_parent_chain: bool,
    /// 修改密码时用于重新派生种子
    seed_deriver: Arc<dyn SeedDeriver>,
}

impl Wallet {
    /// 从助记词创建（BIP39 种子，空 passphrase）
    ///
    /// 空助记词在派生种子之前即被拒绝。
    pub fn from_mnemonic(mnemonic: &str, test_network: bool) -> Result<Self> {
        Self::from_mnemonic_with(Bip39SeedDeriver, mnemonic, test_network)
    }

    /// 使用指定的种子派生协作方从助记词创建
    pub fn from_mnemonic_with<D>(deriver: D, mnemonic: &str, test_network: bool) -> Result<Self>
    where
        D: SeedDeriver + 'static,
    {
        Self::derive(Arc::new(deriver), mnemonic, None, test_network)
    }

    pub(crate) fn derive(
        seed_deriver: Arc<dyn SeedDeriver>,
        mnemonic: &str,
        password: Option<Zeroizing<String>>,
        test_network: bool,
    ) -> Result<Self> {
        if mnemonic.trim().is_empty() {
            return Err(Error::validation("empty mnemonic"));
        }

        let passphrase = password.as_ref().map(|p| p.as_str()).unwrap_or("");
        let seed = seed_deriver.derive_seed(mnemonic, passphrase)?;
        Ok(Self {
            mnemonic: Some(Zeroizing::new(mnemonic.to_string())),
            password,
            seed_deriver,
            ..Self::with_seed(seed, test_network)
        })
    }

    /// 直接从种子创建
    ///
    /// 种子是否为空在初始化币种时校验。
    pub fn from_seed(seed: impl Into<Vec<u8>>, test_network: bool) -> Self {
        Self::with_seed(Zeroizing::new(seed.into()), test_network)
    }

    fn with_seed(seed: Zeroizing<Vec<u8>>, test_network: bool) -> Self {
        Self {
            mnemonic: None,
            seed,
            test_network,
            password: None,
            path_format: FULL_PATH_FORMAT.to_string(),
            flags: WalletFlags::default(),
            share_account_with_parent_chain: false,
            seed_deriver: Arc::new(Bip39SeedDeriver),
        }
    }

    /// 设置密码
    ///
    /// 密码即 BIP39 passphrase：有助记词时以新密码重新派生种子；
    /// 仅有种子的钱包只转交给构造器。
    pub(crate) fn set_password(&mut self, password: &str) -> Result<()> {
        if let Some(ref mnemonic) = self.mnemonic {
            self.seed = self.seed_deriver.derive_seed(mnemonic, password)?;
        }
        self.password = Some(Zeroizing::new(password.to_string()));
        Ok(())
    }

    /// 复制当前钱包并按顺序应用选项，原实例不变
    pub fn clone_with(&self, options: &WalletOptions) -> Result<Self> {
        options.apply(self.clone())
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_ref().map(|m| m.as_str())
    }

    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    /// 派生用种子，空种子视为配置错误
    pub fn bip39_seed(&self) -> Result<&[u8]> {
        if self.seed.is_empty() {
            return Err(Error::validation("missing seed"));
        }
        Ok(&self.seed)
    }

    pub fn is_test_network(&self) -> bool {
        self.test_network
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.as_str())
    }

    pub fn path_format(&self) -> &str {
        &self.path_format
    }

    pub fn flags(&self) -> &WalletFlags {
        &self.flags
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn share_account_with_parent_chain(&self) -> bool {
        self.share_account_with_parent_chain
    }

    /// 该钱包下 `symbol` 的派生 key
    pub fn bip44_key(&self, symbol: &str) -> String {
        resolve_bip44_key(symbol, &self.flags)
    }

    /// 通过全局注册表初始化币种
    pub fn coin(&self, symbol: &str) -> Result<Box<dyn Coin>> {
        CoinRegistry::global().init_coin(self, symbol)
    }
}

impl PartialEq for Wallet {
    fn eq(&self, other: &Self) -> bool {
        self.mnemonic == other.mnemonic
            && self.seed == other.seed
            && self.test_network == other.test_network
            && self.password == other.password
            && self.path_format == other.path_format
            && self.flags == other.flags
            && self.share_account_with_parent_chain == other.share_account_with_parent_chain
    }
}

impl Eq for Wallet {}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("seed_len", &self.seed.len())
            .field("test_network", &self.test_network)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("path_format", &self.path_format)
            .field("flags", &self.flags)
            .field(
                "share_account_with_parent_chain",
                &self.share_account_with_parent_chain,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::derivation::{FLAG_BBC_USE_STANDARD_BIP44_ID, FLAG_MKF_USE_BBC_BIP44_ID};
    use crate::domain::options::WalletOption;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_flags_are_a_set() {
        let mut flags = WalletFlags::default();
        assert!(flags.insert("a"));
        assert!(!flags.insert("a"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn test_from_mnemonic() {
        let wallet = Wallet::from_mnemonic(TEST_MNEMONIC, false).unwrap();

        assert_eq!(wallet.mnemonic(), Some(TEST_MNEMONIC));
        assert_eq!(wallet.seed().len(), 64);
        assert!(!wallet.is_test_network());
        assert_eq!(wallet.path_format(), FULL_PATH_FORMAT);
        assert!(wallet.password().is_none());
    }

    #[test]
    fn test_empty_mnemonic_rejected() {
        assert!(matches!(
            Wallet::from_mnemonic("", false),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Wallet::from_mnemonic("   ", true),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_mnemonic() {
        let err = Wallet::from_mnemonic("not a real mnemonic phrase", false).unwrap_err();
        assert_eq!(err.code(), "invalid_mnemonic");
    }

    #[test]
    fn test_empty_seed() {
        let wallet = Wallet::from_seed(Vec::new(), false);
        assert!(matches!(wallet.bip39_seed(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_clone_with_leaves_source_untouched() {
        let source = Wallet::from_mnemonic(TEST_MNEMONIC, false).unwrap();
        let snapshot = source.clone();

        let options = WalletOptions::new()
            .with(WalletOption::flag(FLAG_MKF_USE_BBC_BIP44_ID))
            .with(WalletOption::password("secret"))
            .with(WalletOption::use_shortest_path(true))
            .with(WalletOption::share_account_with_parent_chain(true));
        let cloned = source.clone_with(&options).unwrap();

        assert_eq!(source, snapshot);
        assert!(cloned.has_flag(FLAG_MKF_USE_BBC_BIP44_ID));
        assert_eq!(cloned.password(), Some("secret"));
        assert!(cloned.share_account_with_parent_chain());
        assert_ne!(cloned.seed(), source.seed());
    }

    #[test]
    fn test_bip44_key_uses_own_flags() {
        let wallet = Wallet::from_seed(vec![1u8; 64], false)
            .clone_with(
                &WalletOptions::new()
                    .with(WalletOption::flag(FLAG_MKF_USE_BBC_BIP44_ID))
                    .with(WalletOption::flag(FLAG_BBC_USE_STANDARD_BIP44_ID)),
            )
            .unwrap();

        assert_eq!(wallet.bip44_key("MKF"), "BigBang Core");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let wallet = Wallet::from_mnemonic(TEST_MNEMONIC, false)
            .unwrap()
            .clone_with(&WalletOptions::new().with(WalletOption::password("hunter2")))
            .unwrap();

        let debug = format!("{:?}", wallet);
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_password_reseeds_mnemonic_wallet() {
        let plain = Wallet::from_mnemonic(TEST_MNEMONIC, false).unwrap();
        let salted = plain
            .clone_with(&WalletOptions::new().with(WalletOption::password("TREZOR")))
            .unwrap();

        assert_ne!(plain.seed(), salted.seed());
        assert_eq!(
            hex::encode(salted.seed()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );

        // 空密码等同于无密码
        let empty = plain
            .clone_with(&WalletOptions::new().with(WalletOption::password("")))
            .unwrap();
        assert_eq!(plain.seed(), empty.seed());
    }

    #[test]
    fn test_password_on_seed_wallet_keeps_seed() {
        let wallet = Wallet::from_seed(vec![2u8; 64], false)
            .clone_with(&WalletOptions::new().with(WalletOption::password("pw")))
            .unwrap();
        assert_eq!(wallet.seed(), &[2u8; 64][..]);
        assert_eq!(wallet.password(), Some("pw"));
    }
}
