//! 链元数据
//!
//! 定义支持的币种所属链族、曲线与地址格式。分发器在调用构造器之前
//! 先查元数据，用于校验和参数化构造。

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 网络
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn from_test_flag(test_network: bool) -> Self {
        if test_network {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

/// 链族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// UTXO 主链 (BTC)
    Bitcoin,
    /// 基于比特币交易的资产层 (OMNI, USDT(Omni))
    Omni,
    /// EVM 链 (ETH)
    Ethereum,
    Tron,
    /// BigBang 系列 (BBC, MKF)
    BigBang,
}

impl ChainFamily {
    /// 资产层币种：账本叠加在父链交易之上
    pub fn is_asset_overlay(self) -> bool {
        matches!(self, Self::Omni)
    }
}

/// 加密曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    Secp256k1,
    Ed25519,
}

/// 地址编码格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    /// Base58Check P2PKH (Bitcoin legacy)
    Base58,
    /// 0x... + EIP-55 checksum
    Hex,
    /// T... (0x41 前缀 Base58Check)
    TronBase58,
    /// 1... (BigBang base32 + CRC-24Q)
    BigBangBase32,
}

/// 币种元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// 币种符号（区分大小写）
    pub symbol: String,
    pub name: String,
    pub family: ChainFamily,
    pub curve_type: CurveType,
    pub address_format: AddressFormat,
    /// 是否支持测试网
    pub testnet_supported: bool,
}

impl ChainConfig {
    pub fn new(
        symbol: &str,
        name: &str,
        family: ChainFamily,
        curve_type: CurveType,
        address_format: AddressFormat,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            family,
            curve_type,
            address_format,
            testnet_supported: true,
        }
    }

    pub fn without_testnet(mut self) -> Self {
        self.testnet_supported = false;
        self
    }
}

/// 链元数据注册表
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    configs: HashMap<String, ChainConfig>,
}

impl ChainRegistry {
    /// 创建预配置的注册表
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_default_chains();
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn register_default_chains(&mut self) {
        use AddressFormat::*;
        use ChainFamily::*;
        use CurveType::*;

        self.register(ChainConfig::new("BTC", "Bitcoin", Bitcoin, Secp256k1, Base58));
        self.register(ChainConfig::new("OMNI", "Omni Layer", Omni, Secp256k1, Base58));
        self.register(ChainConfig::new("USDT(Omni)", "Tether (Omni)", Omni, Secp256k1, Base58));
        self.register(ChainConfig::new("ETH", "Ethereum", Ethereum, Secp256k1, Hex));
        self.register(ChainConfig::new("TRX", "TRON", Tron, Secp256k1, TronBase58));
        self.register(ChainConfig::new("BBC", "BigBang Core", BigBang, Ed25519, BigBangBase32));
        self.register(ChainConfig::new("MKF", "MarketFinance", BigBang, Ed25519, BigBangBase32));
    }

    /// 注册或覆盖币种元数据
    pub fn register(&mut self, config: ChainConfig) {
        self.configs.insert(config.symbol.clone(), config);
    }

    pub fn get_by_symbol(&self, symbol: &str) -> Option<&ChainConfig> {
        self.configs.get(symbol)
    }

    /// 元数据查询，未配置时返回 `Error::Metadata`
    pub fn metadata(&self, symbol: &str) -> Result<&ChainConfig> {
        self.get_by_symbol(symbol)
            .ok_or_else(|| Error::metadata(symbol, "chain metadata is not configured"))
    }

    pub fn get_by_family(&self, family: ChainFamily) -> Vec<&ChainConfig> {
        self.configs
            .values()
            .filter(|c| c.family == family)
            .collect()
    }

    pub fn list_all(&self) -> Vec<&ChainConfig> {
        self.configs.values().collect()
    }

    /// 验证元数据完整性
    pub fn validate_configs(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (symbol, config) in &self.configs {
            if symbol.is_empty() {
                errors.push(format!("Chain {} has empty symbol", config.name));
            }
            if config.name.is_empty() {
                errors.push(format!("Chain {} has empty name", symbol));
            }

            // 曲线与地址格式必须匹配
            match (config.curve_type, config.address_format) {
                (
                    CurveType::Secp256k1,
                    AddressFormat::Base58 | AddressFormat::Hex | AddressFormat::TronBase58,
                ) => {}
                (CurveType::Ed25519, AddressFormat::BigBangBase32) => {}
                _ => {
                    errors.push(format!(
                        "Chain {} has incompatible curve_type and address_format: {:?} / {:?}",
                        symbol, config.curve_type, config.address_format
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
