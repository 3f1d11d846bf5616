//! BigBang 系列（BBC, MKF）
//!
//! ed25519 密钥取自 bip44 派生出的私钥字节；地址为 `1` + base32(公钥 || CRC-24Q)。
//! 公钥、私钥的十六进制展示为字节逆序。

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use super::{keys, DerivedCoin};
use crate::domain::coin::{ChainError, Coin, CoinContext};

/// 公钥地址前缀
const PUBKEY_ADDRESS_PREFIX: char = '1';

const BASE32_ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

pub fn new_coin(ctx: &CoinContext<'_>) -> Result<Box<dyn Coin>, ChainError> {
    keys::check_network(ctx)?;
    let (path, key) = keys::derive_for_key(ctx, ctx.bip44_key)?;

    let signing_key = SigningKey::from_bytes(&key.secret);
    let public_key = signing_key.verifying_key().to_bytes();

    Ok(Box::new(DerivedCoin::new(
        ctx.symbol,
        path,
        encode_address(&public_key),
        display_hex(&public_key),
        Zeroizing::new(display_hex(&key.secret[..])),
    )))
}

/// 逆序十六进制
pub fn display_hex(bytes: &[u8]) -> String {
    let mut reversed = Zeroizing::new(bytes.to_vec());
    reversed.reverse();
    hex::encode(&reversed[..])
}

/// 公钥地址
pub fn encode_address(public_key: &[u8; 32]) -> String {
    let crc = crc24q(public_key);

    let mut data = Vec::with_capacity(35);
    data.extend_from_slice(public_key);
    data.extend_from_slice(&crc.to_be_bytes()[1..]);

    let mut address = String::with_capacity(57);
    address.push(PUBKEY_ADDRESS_PREFIX);
    address.push_str(&base32_encode(&data));
    address
}

/// 5 bit 一组，高位在前；输入长度须为 5 的倍数
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 8 / 5);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let index = ((buffer >> bits) & 0x1f) as usize;
            out.push(char::from(BASE32_ALPHABET[index]));
        }
        buffer &= (1 << bits) - 1;
    }
    out
}

/// CRC-24Q (poly 0x864CFB, init 0)
fn crc24q(data: &[u8]) -> u32 {
    let mut crc: u32 = 0;
    for &byte in data {
        crc ^= u32::from(byte) << 16;
        for _ in 0..8 {
            crc <<= 1;
            if crc & 0x0100_0000 != 0 {
                crc ^= 0x0186_4cfb;
            }
        }
    }
    crc & 0x00ff_ffff
}
