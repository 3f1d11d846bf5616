//! Bitcoin (P2PKH)

use bitcoin::secp256k1::{PublicKey as Secp256k1PublicKey, SecretKey};
use bitcoin::{Address, Network as BitcoinNetwork, PrivateKey, PublicKey as BitcoinPublicKey};
use zeroize::Zeroizing;

use super::keys::{self, Secp256k1Key};
use super::DerivedCoin;
use crate::domain::chain_config::Network;
use crate::domain::coin::{ChainError, Coin, CoinContext};

pub fn new_coin(ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError> {
    keys::check_network(ctx)?;
    let (path, key) = keys::derive_for_key(ctx, ctx.bip44_key)?;
    Ok(Box::new(derived_coin(ctx, path, &key)?))
}

/// Bitcoin 地址编码，OMNI 共用
pub(crate) fn derived_coin(
    ctx: &CoinContext<'_>,
    path: String,
    key: &Secp256k1Key,
) -> Result<DerivedCoin, ChainError> {
    let network = match ctx.network {
        Network::Mainnet => BitcoinNetwork::Bitcoin,
        Network::Testnet => BitcoinNetwork::Testnet,
    };

    let secp_pubkey = Secp256k1PublicKey::from_slice(&key.public_compressed)
        .map_err(|e| ChainError::Derivation(e.to_string()))?;
    let address = Address::p2pkh(&BitcoinPublicKey::new(secp_pubkey), network).to_string();

    let secret_key =
        SecretKey::from_slice(&key.secret[..]).map_err(|e| ChainError::Derivation(e.to_string()))?;
    let wif = Zeroizing::new(PrivateKey::new(secret_key, network).to_wif());

    Ok(DerivedCoin::new(
        ctx.symbol,
        path,
        address,
        hex::encode(key.public_compressed),
        wif,
    ))
}
