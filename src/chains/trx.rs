//! TRON

use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use super::{keys, DerivedCoin};
use crate::domain::coin::{ChainError, Coin, CoinContext};

/// 主网地址前缀
const ADDRESS_PREFIX: u8 = 0x41;

pub fn new_coin(ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError> {
    keys::check_network(ctx)?;
    let (path, key) = keys::derive_for_key(ctx, ctx.bip44_key)?;

    let hash = Keccak256::digest(&key.public_uncompressed[1..]);
    let mut payload = Vec::with_capacity(21);
    payload.push(ADDRESS_PREFIX);
    payload.extend_from_slice(&hash[12..]);
    let address = bs58::encode(payload).with_check().into_string();

    Ok(Box::new(DerivedCoin::new(
        ctx.symbol,
        path,
        address,
        hex::encode(key.public_uncompressed),
        Zeroizing::new(hex::encode(&key.secret[..])),
    )))
}
