//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::options::{WalletOption, WalletOptions};

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub wallet: WalletDefaultsConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

/// 钱包默认选项
///
/// 未设置的路径、账户共享项不生成选项，保留钱包原值。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletDefaultsConfig {
    #[serde(default)]
    pub test_network: bool,
    #[serde(default)]
    pub use_shortest_path: Option<bool>,
    #[serde(default)]
    pub share_account_with_parent_chain: Option<bool>,
    #[serde(default)]
    pub flags: Vec<String>,
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl LoggingConfig {
    /// `LOG_LEVEL`, `LOG_FORMAT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: std::env::var("LOG_FORMAT").unwrap_or(defaults.format),
        }
    }
}

/// 逗号分隔，忽略空项
fn parse_flags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|flag| !flag.is_empty())
        .map(str::to_string)
        .collect()
}

impl WalletDefaultsConfig {
    /// `WALLET_TEST_NETWORK`, `WALLET_USE_SHORTEST_PATH`,
    /// `WALLET_SHARE_ACCOUNT_WITH_PARENT_CHAIN`, `WALLET_FLAGS`
    pub fn from_env() -> Self {
        Self {
            test_network: env_flag("WALLET_TEST_NETWORK").unwrap_or(false),
            use_shortest_path: env_flag("WALLET_USE_SHORTEST_PATH"),
            share_account_with_parent_chain: env_flag("WALLET_SHARE_ACCOUNT_WITH_PARENT_CHAIN"),
            flags: std::env::var("WALLET_FLAGS")
                .map(|v| parse_flags(&v))
                .unwrap_or_default(),
        }
    }

    /// 转换为选项列表，flag 保持配置中的顺序
    pub fn to_options(&self) -> WalletOptions {
        let mut options = WalletOptions::new();
        if let Some(use_shortest_path) = self.use_shortest_path {
            options.add(WalletOption::use_shortest_path(use_shortest_path));
        }
        if let Some(share) = self.share_account_with_parent_chain {
            options.add(WalletOption::share_account_with_parent_chain(share));
        }
        for flag in &self.flags {
            options.add(WalletOption::flag(flag.as_str()));
        }
        options
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            logging: LoggingConfig::from_env(),
            wallet: WalletDefaultsConfig::from_env(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 读取 `.env` 后按 `CONFIG_PATH` 加载并校验
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("CONFIG_PATH").ok();
        let config = Self::from_env_and_file(path.as_deref())?;
        config.validate()?;

        tracing::debug!(
            level = %config.logging.level,
            format = %config.logging.format,
            test_network = config.wallet.test_network,
            "config loaded"
        );
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if !VALID_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", VALID_LEVELS);
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        if self.wallet.flags.iter().any(|flag| flag.trim().is_empty()) {
            anyhow::bail!("WALLET_FLAGS must not contain empty flags");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::domain::bip44::{FULL_PATH_FORMAT, PATH_FORMAT};
    use crate::domain::derivation::FLAG_MKF_USE_BBC_BIP44_ID;
    use crate::domain::wallet::Wallet;

    fn logging(level: &str, format: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: format.to_string(),
        }
    }

    fn wallet_defaults() -> WalletDefaultsConfig {
        WalletDefaultsConfig::default()
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "debug"
format = "json"

[wallet]
test_network = true
use_shortest_path = true
flags = ["mkf_use_bbc_bip44_id"]
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(config.wallet.test_network);
        assert_eq!(config.wallet.use_shortest_path, Some(true));
        assert_eq!(config.wallet.share_account_with_parent_chain, None);
        assert_eq!(config.wallet.flags, vec![FLAG_MKF_USE_BBC_BIP44_ID]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging\nlevel = ").unwrap();
        assert!(Config::from_file(file.path()).is_err());
        assert!(Config::from_file("/nonexistent/hdwallet.toml").is_err());
    }

    #[test]
    fn test_missing_tables_use_builtin_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"\nformat = \"text\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(!config.wallet.test_network);
        assert_eq!(config.wallet.use_shortest_path, None);
        assert_eq!(config.wallet.share_account_with_parent_chain, None);
        assert!(config.wallet.flags.is_empty());

        let empty = NamedTempFile::new().unwrap();
        let config = Config::from_file(empty.path()).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_from_env_and_file_missing_path() {
        let config = Config::from_env_and_file(Some("/nonexistent/hdwallet.toml")).unwrap();
        let env = Config::from_env().unwrap();
        assert_eq!(config.logging.level, env.logging.level);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config {
            logging: logging("INFO", "text"),
            wallet: wallet_defaults(),
        };
        assert!(config.validate().is_ok());

        config.logging = logging("verbose", "text");
        assert!(config.validate().is_err());

        config.logging = logging("info", "yaml");
        assert!(config.validate().is_err());

        config.logging = logging("info", "json");
        config.wallet.flags = vec![" ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        assert_eq!(parse_flags("a, b,,c "), vec!["a", "b", "c"]);
        assert!(parse_flags("").is_empty());
    }

    #[test]
    fn test_to_options() {
        let defaults = WalletDefaultsConfig {
            use_shortest_path: Some(true),
            share_account_with_parent_chain: Some(true),
            flags: vec![FLAG_MKF_USE_BBC_BIP44_ID.to_string()],
            ..wallet_defaults()
        };

        let wallet = Wallet::from_seed(vec![1u8; 64], false);
        let wallet = wallet.clone_with(&defaults.to_options()).unwrap();
        assert_eq!(wallet.path_format(), PATH_FORMAT);
        assert!(wallet.share_account_with_parent_chain());
        assert!(wallet.has_flag(FLAG_MKF_USE_BBC_BIP44_ID));

        let wallet = wallet
            .clone_with(
                &WalletDefaultsConfig {
                    use_shortest_path: Some(false),
                    ..wallet_defaults()
                }
                .to_options(),
            )
            .unwrap();
        assert_eq!(wallet.path_format(), FULL_PATH_FORMAT);
        assert!(wallet.share_account_with_parent_chain());
    }

    #[test]
    fn test_unset_defaults_keep_custom_path() {
        assert!(wallet_defaults().to_options().is_empty());

        let wallet = Wallet::from_seed(vec![1u8; 64], false)
            .clone_with(
                &WalletOptions::new()
                    .with(WalletOption::path_format("m/44'/{coin_type}'/2'"))
                    .with(WalletOption::share_account_with_parent_chain(true)),
            )
            .unwrap();

        let applied = wallet.clone_with(&wallet_defaults().to_options()).unwrap();
        assert_eq!(applied.path_format(), "m/44'/{coin_type}'/2'");
        assert!(applied.share_account_with_parent_chain());
    }
}
