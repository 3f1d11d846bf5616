//! Omni Layer 资产（OMNI, USDT(Omni)）
//!
//! 资产记录在比特币交易中，地址与 Bitcoin 相同编码。
//! 开启账户共享时直接使用父链 (BTC) 的 coin type，地址与 BTC 一致。

use super::{btc, keys};
use crate::domain::coin::{ChainError, Coin, CoinContext};

/// 选项包中的账户共享开关
pub const OPTION_SHARE_ACCOUNT_WITH_PARENT_CHAIN: &str = "share_account_with_parent_chain";

/// 父链派生 key
pub const PARENT_CHAIN_BIP44_KEY: &str = "BTC";

pub fn new_coin(ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError> {
    keys::check_network(ctx)?;

    let bip44_key = if ctx.options.is_enabled(OPTION_SHARE_ACCOUNT_WITH_PARENT_CHAIN) {
        PARENT_CHAIN_BIP44_KEY
    } else {
        ctx.bip44_key
    };

    let (path, key) = keys::derive_for_key(ctx, bip44_key)?;
    Ok(Box::new(btc::derived_coin(ctx, path, &key)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bip44::PATH_FORMAT;
    use crate::domain::chain_config::{ChainRegistry, Network};
    use crate::domain::coin::CoinOptions;

    fn construct(options: &CoinOptions) -> Box<dyn Coin> {
        let seed = [3u8; 64];
        let chains = ChainRegistry::new();
        let ctx = CoinContext {
            symbol: "USDT(Omni)",
            seed: &seed,
            path_format: PATH_FORMAT,
            bip44_key: "USDT(Omni)",
            network: Network::Mainnet,
            password: None,
            options,
            metadata: chains.get_by_symbol("USDT(Omni)").unwrap(),
        };
        new_coin(&ctx).unwrap()
    }

    #[test]
    fn test_own_account() {
        let coin = construct(&CoinOptions::default());
        assert_eq!(coin.symbol(), "USDT(Omni)");
        assert_eq!(coin.derivation_path(), "m/44'/200'");
    }

    #[test]
    fn test_shared_account_uses_parent_coin_type() {
        let mut options = CoinOptions::default();
        options.set(OPTION_SHARE_ACCOUNT_WITH_PARENT_CHAIN, true);

        let shared = construct(&options);
        let own = construct(&CoinOptions::default());

        assert_eq!(shared.derivation_path(), "m/44'/0'");
        assert_ne!(
            shared.derive_address().unwrap(),
            own.derive_address().unwrap()
        );
    }
}
