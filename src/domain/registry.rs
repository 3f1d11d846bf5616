//! 币种分发注册表
//!
//! symbol -> (链族, 构造器) 的静态映射。默认注册表在首次使用时构建，
//! 之后只读；新增币种只需一次 `register`，解析器与构建器无需改动。

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::chains::{bbc, btc, eth, omni, trx};
use crate::domain::chain_config::{ChainConfig, ChainFamily, ChainRegistry, Network};
use crate::domain::coin::{Coin, CoinConstructor, CoinContext, CoinOptions, ConstructorFn};
use crate::domain::derivation::resolve_bip44_key;
use crate::domain::wallet::Wallet;
use crate::error::{Error, Result};

static GLOBAL_REGISTRY: Lazy<CoinRegistry> = Lazy::new(CoinRegistry::new);

struct CoinEntry {
    family: ChainFamily,
    constructor: Arc<dyn CoinConstructor>,
}

/// 币种分发器
pub struct CoinRegistry {
    entries: HashMap<String, CoinEntry>,
    /// 注册顺序
    symbols: Vec<String>,
    chains: ChainRegistry,
}

impl CoinRegistry {
    /// 预注册所有内置币种
    pub fn new() -> Self {
        let mut registry = Self::empty(ChainRegistry::new());

        // BTC 系列
        registry.register_fn("BTC", ChainFamily::Bitcoin, btc::new_coin);

        // OMNI 系列
        registry.register_fn("USDT(Omni)", ChainFamily::Omni, omni::new_coin);
        registry.register_fn("OMNI", ChainFamily::Omni, omni::new_coin);

        // BBC 系列
        registry.register_fn("BBC", ChainFamily::BigBang, bbc::new_coin);
        registry.register_fn("MKF", ChainFamily::BigBang, bbc::new_coin);

        // ETH 系列
        registry.register_fn("ETH", ChainFamily::Ethereum, eth::new_coin);

        registry.register_fn("TRX", ChainFamily::Tron, trx::new_coin);

        registry
    }

    /// 空注册表，使用给定的元数据
    pub fn empty(chains: ChainRegistry) -> Self {
        Self {
            entries: HashMap::new(),
            symbols: Vec::new(),
            chains,
        }
    }

    /// 进程级默认注册表
    pub fn global() -> &'static CoinRegistry {
        &GLOBAL_REGISTRY
    }

    /// 注册币种，重复注册覆盖原构造器
    pub fn register(
        &mut self,
        symbol: &str,
        family: ChainFamily,
        constructor: Arc<dyn CoinConstructor>,
    ) {
        if !self.entries.contains_key(symbol) {
            self.symbols.push(symbol.to_string());
        }
        self.entries.insert(
            symbol.to_string(),
            CoinEntry {
                family,
                constructor,
            },
        );
    }

    pub fn register_fn(&mut self, symbol: &str, family: ChainFamily, constructor: ConstructorFn) {
        self.register(symbol, family, Arc::new(constructor));
    }

    /// 注册或覆盖元数据
    pub fn register_metadata(&mut self, config: ChainConfig) {
        self.chains.register(config);
    }

    pub fn chains(&self) -> &ChainRegistry {
        &self.chains
    }

    pub fn is_supported(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn family(&self, symbol: &str) -> Option<ChainFamily> {
        self.entries.get(symbol).map(|entry| entry.family)
    }

    /// 支持的币种（区分大小写），按注册顺序以空格分隔，如 "BTC USDT(Omni) OMNI ..."
    pub fn available_coin_list(&self) -> String {
        self.symbols.join(" ")
    }

    /// 为钱包初始化币种
    ///
    /// 顺序：种子校验 -> 币种查找 -> 元数据 -> 派生 key -> 构造器。
    /// 构造器错误附带币种上下文原样返回。
    pub fn init_coin(&self, wallet: &Wallet, symbol: &str) -> Result<Box<dyn Coin>> {
        let seed = wallet.bip39_seed()?;

        let entry = self
            .entries
            .get(symbol)
            .ok_or_else(|| Error::UnsupportedCurrency(symbol.to_string()))?;

        let metadata = self.chains.metadata(symbol)?;
        if metadata.family != entry.family {
            return Err(Error::metadata(
                symbol,
                format!(
                    "registered as {:?} but metadata describes {:?}",
                    entry.family, metadata.family
                ),
            ));
        }

        let bip44_key = resolve_bip44_key(symbol, wallet.flags());

        let mut options = CoinOptions::default();
        if entry.family.is_asset_overlay() && wallet.share_account_with_parent_chain() {
            options.set(omni::OPTION_SHARE_ACCOUNT_WITH_PARENT_CHAIN, true);
        }

        let ctx = CoinContext {
            symbol,
            seed,
            path_format: wallet.path_format(),
            bip44_key: &bip44_key,
            network: Network::from_test_flag(wallet.is_test_network()),
            password: wallet.password(),
            options: &options,
            metadata,
        };

        tracing::debug!(
            symbol,
            family = ?entry.family,
            bip44_key = %bip44_key,
            network = %ctx.network,
            "initializing coin"
        );

        entry
            .constructor
            .construct(&ctx)
            .map_err(|source| Error::Construction {
                symbol: symbol.to_string(),
                source,
            })
    }
}

impl Default for CoinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinRegistry")
            .field("symbols", &self.symbols)
            .field("chains", &self.chains)
            .finish()
    }
}
