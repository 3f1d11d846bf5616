//! 钱包选项
//!
//! 每个选项是一个独立、不可变的修改；选项列表按顺序依次作用于钱包副本，
//! 任一步失败即中止并原样返回错误。

use crate::domain::bip44::{COIN_TYPE_PLACEHOLDER, FULL_PATH_FORMAT, PATH_FORMAT};
use crate::domain::wallet::Wallet;
use crate::error::{Error, Result};

/// 单个钱包选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletOption {
    /// 设置路径模板，须以 `m/` 开头并包含 `{coin_type}`
    PathFormat(String),
    /// 添加 flag，参考 `FLAG_*` 常量
    Flag(String),
    /// BIP39 passphrase，有助记词时重新派生种子
    Password(String),
    ShareAccountWithParentChain(bool),
}

impl WalletOption {
    pub fn path_format(path_format: impl Into<String>) -> Self {
        Self::PathFormat(path_format.into())
    }

    /// 最短路径或完整路径
    pub fn use_shortest_path(use_shortest_path: bool) -> Self {
        let path_format = if use_shortest_path {
            PATH_FORMAT
        } else {
            FULL_PATH_FORMAT
        };
        Self::PathFormat(path_format.to_string())
    }

    pub fn flag(flag: impl Into<String>) -> Self {
        Self::Flag(flag.into())
    }

    pub fn password(password: impl Into<String>) -> Self {
        Self::Password(password.into())
    }

    pub fn share_account_with_parent_chain(share: bool) -> Self {
        Self::ShareAccountWithParentChain(share)
    }

    /// 作用于钱包，返回修改后的钱包
    pub fn apply(&self, mut wallet: Wallet) -> Result<Wallet> {
        match self {
            Self::PathFormat(path_format) => {
                validate_path_format(path_format)?;
                wallet.path_format = path_format.clone();
            }
            Self::Flag(flag) => {
                if flag.trim().is_empty() {
                    return Err(Error::validation("flag must not be empty"));
                }
                wallet.flags.insert(flag.clone());
            }
            Self::Password(password) => {
                wallet.set_password(password)?;
            }
            Self::ShareAccountWithParentChain(share) => {
                wallet.share_account_with_parent_chain = *share;
            }
        }
        Ok(wallet)
    }
}

pub(crate) fn validate_path_format(path_format: &str) -> Result<()> {
    if !path_format.starts_with("m/") {
        return Err(Error::validation(format!(
            "path format must start with m/: {}",
            path_format
        )));
    }
    if !path_format.contains(COIN_TYPE_PLACEHOLDER) {
        return Err(Error::validation(format!(
            "path format must contain {}: {}",
            COIN_TYPE_PLACEHOLDER, path_format
        )));
    }
    Ok(())
}

/// 有序的选项列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletOptions {
    options: Vec<WalletOption>,
}

impl WalletOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, option: WalletOption) {
        self.options.push(option);
    }

    pub fn with(mut self, option: WalletOption) -> Self {
        self.add(option);
        self
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalletOption> {
        self.options.iter()
    }

    /// 按顺序应用全部选项
    pub fn apply(&self, wallet: Wallet) -> Result<Wallet> {
        self.options
            .iter()
            .try_fold(wallet, |wallet, option| option.apply(wallet))
    }
}

impl FromIterator<WalletOption> for WalletOptions {
    fn from_iter<I: IntoIterator<Item = WalletOption>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for WalletOptions {
    type Item = WalletOption;
    type IntoIter = std::vec::IntoIter<WalletOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.into_iter()
    }
}
