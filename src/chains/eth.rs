//! Ethereum

use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use super::{keys, DerivedCoin};
use crate::domain::coin::{ChainError, Coin, CoinContext};

pub fn new_coin(ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError> {
    keys::check_network(ctx)?;
    let (path, key) = keys::derive_for_key(ctx, ctx.bip44_key)?;

    // 去掉 0x04 前缀
    let public_key = &key.public_uncompressed[1..];
    let hash = Keccak256::digest(public_key);
    let address = to_checksum_address(&hash[12..]);

    Ok(Box::new(DerivedCoin::new(
        ctx.symbol,
        path,
        address,
        hex::encode(public_key),
        Zeroizing::new(hex::encode(&key.secret[..])),
    )))
}

/// EIP-55 checksum 地址
pub fn to_checksum_address(address_bytes: &[u8]) -> String {
    let lower = hex::encode(address_bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    checksummed
}
