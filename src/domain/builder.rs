//! 钱包构建器
//!
//! 链式设置助记词、网络、密码、路径模板、账户共享，`build` 时统一校验并派生种子。

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::config::WalletDefaultsConfig;
use crate::domain::bip44::{FULL_PATH_FORMAT, PATH_FORMAT};
use crate::domain::options::{validate_path_format, WalletOptions};
use crate::domain::seed::{Bip39SeedDeriver, SeedDeriver};
use crate::domain::wallet::{Wallet, WalletFlags};
use crate::error::{Error, Result};

/// 钱包构建器
#[derive(Clone, Default)]
pub struct WalletBuilder {
    mnemonic: Option<Zeroizing<String>>,
    test_network: bool,
    password: Option<Zeroizing<String>>,
    path_format: Option<String>,
    share_account_with_parent_chain: bool,
    flags: WalletFlags,
}

impl WalletBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以配置中的默认值初始化
    pub fn from_defaults(defaults: &WalletDefaultsConfig) -> Self {
        let mut builder = Self::new().test_network(defaults.test_network);
        if let Some(use_shortest_path) = defaults.use_shortest_path {
            builder = builder.use_shortest_path(use_shortest_path);
        }
        if let Some(share) = defaults.share_account_with_parent_chain {
            builder = builder.share_account_with_parent_chain(share);
        }
        for flag in &defaults.flags {
            builder = builder.flag(flag.as_str());
        }
        builder
    }

    pub fn mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(Zeroizing::new(mnemonic.into()));
        self
    }

    pub fn test_network(mut self, test_network: bool) -> Self {
        self.test_network = test_network;
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    pub fn path_format(mut self, path_format: impl Into<String>) -> Self {
        self.path_format = Some(path_format.into());
        self
    }

    /// true: `m/44'/{coin_type}'`；false: `m/44'/{coin_type}'/0'/0/0`
    pub fn use_shortest_path(self, use_shortest_path: bool) -> Self {
        if use_shortest_path {
            self.path_format(PATH_FORMAT)
        } else {
            self.path_format(FULL_PATH_FORMAT)
        }
    }

    pub fn share_account_with_parent_chain(mut self, share: bool) -> Self {
        self.share_account_with_parent_chain = share;
        self
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn build(self) -> Result<Wallet> {
        self.build_with(Bip39SeedDeriver)
    }

    /// 使用指定的种子派生协作方构建，密码作为 passphrase 参与派生
    pub fn build_with<D>(self, deriver: D) -> Result<Wallet>
    where
        D: SeedDeriver + 'static,
    {
        let mnemonic = match self.mnemonic {
            Some(ref mnemonic) if !mnemonic.trim().is_empty() => mnemonic,
            _ => return Err(Error::validation("empty mnemonic")),
        };

        if let Some(ref path_format) = self.path_format {
            validate_path_format(path_format)?;
        }
        if self.flags.iter().any(|flag| flag.trim().is_empty()) {
            return Err(Error::validation("flag must not be empty"));
        }

        let mut wallet = Wallet::derive(
            Arc::new(deriver),
            mnemonic,
            self.password.clone(),
            self.test_network,
        )?;
        if let Some(path_format) = self.path_format {
            wallet.path_format = path_format;
        }
        wallet.share_account_with_parent_chain = self.share_account_with_parent_chain;
        wallet.flags = self.flags;

        tracing::debug!(
            test_network = wallet.test_network,
            path_format = %wallet.path_format,
            flags = wallet.flags.len(),
            "wallet built"
        );
        Ok(wallet)
    }
}

impl fmt::Debug for WalletBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletBuilder")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("test_network", &self.test_network)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("path_format", &self.path_format)
            .field(
                "share_account_with_parent_chain",
                &self.share_account_with_parent_chain,
            )
            .field("flags", &self.flags)
            .finish()
    }
}

/// 由助记词 + 网络 + 任意选项列表构建
///
/// 与 [`WalletBuilder::build`] 走相同的校验和种子派生流程。
pub fn build_wallet_from_mnemonic(
    mnemonic: &str,
    test_network: bool,
    options: &WalletOptions,
) -> Result<Wallet> {
    build_wallet_from_mnemonic_with(Bip39SeedDeriver, mnemonic, test_network, options)
}

pub fn build_wallet_from_mnemonic_with<D>(
    deriver: D,
    mnemonic: &str,
    test_network: bool,
    options: &WalletOptions,
) -> Result<Wallet>
where
    D: SeedDeriver + 'static,
{
    let wallet = Wallet::from_mnemonic_with(deriver, mnemonic, test_network)?;
    options.apply(wallet)
}

/// 由私钥构建（未实现）
pub fn build_wallet_from_private_key(
    _private_key: &str,
    _test_network: bool,
    _options: &WalletOptions,
) -> Result<Wallet> {
    Err(Error::NotImplemented("build wallet from private key"))
}
