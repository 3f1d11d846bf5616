//! secp256k1 HD 派生（coins-bip32）

use coins_bip32::path::DerivationPath;
use coins_bip32::prelude::*;
use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

use crate::domain::bip44;
use crate::domain::chain_config::Network;
use crate::domain::coin::{ChainError, CoinContext};

/// 派生出的 secp256k1 密钥
pub(crate) struct Secp256k1Key {
    pub secret: Zeroizing<[u8; 32]>,
    pub public_compressed: [u8; 33],
    /// 含 0x04 前缀
    pub public_uncompressed: [u8; 65],
}

/// 元数据不支持测试网时拒绝
pub(crate) fn check_network(ctx: &CoinContext<'_>) -> Result<(), ChainError> {
    if ctx.network == Network::Testnet && !ctx.metadata.testnet_supported {
        return Err(ChainError::UnsupportedNetwork {
            chain: ctx.symbol.to_string(),
            network: ctx.network,
        });
    }
    Ok(())
}

/// 按派生 key 渲染路径并派生密钥
pub(crate) fn derive_for_key(
    ctx: &CoinContext<'_>,
    bip44_key: &str,
) -> Result<(String, Secp256k1Key), ChainError> {
    let path = bip44::derivation_path(ctx.path_format, bip44_key)?;
    let key = derive_secp256k1(ctx.seed, &path)?;
    Ok((path, key))
}

pub(crate) fn derive_secp256k1(seed: &[u8], path: &str) -> Result<Secp256k1Key, ChainError> {
    let derivation_path = path
        .parse::<DerivationPath>()
        .map_err(|_| ChainError::InvalidPath(path.to_string()))?;

    let master_key =
        XPriv::root_from_seed(seed, None).map_err(|e| ChainError::Derivation(e.to_string()))?;

    let derived_key = master_key
        .derive_path(&derivation_path)
        .map_err(|e| ChainError::Derivation(e.to_string()))?;

    // XPriv 实现 AsRef<SigningKey>
    let signing_key: &SigningKey = derived_key.as_ref();
    let verifying_key = signing_key.verifying_key();

    let mut public_compressed = [0u8; 33];
    public_compressed.copy_from_slice(verifying_key.to_encoded_point(true).as_bytes());
    let mut public_uncompressed = [0u8; 65];
    public_uncompressed.copy_from_slice(verifying_key.to_encoded_point(false).as_bytes());

    Ok(Secp256k1Key {
        secret: Zeroizing::new(signing_key.to_bytes().into()),
        public_compressed,
        public_uncompressed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path() {
        let seed = [7u8; 64];
        assert!(matches!(
            derive_secp256k1(&seed, "m/44'/x'"),
            Err(ChainError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_deterministic() {
        let seed = [7u8; 64];
        let a = derive_secp256k1(&seed, "m/44'/60'/0'/0/0").unwrap();
        let b = derive_secp256k1(&seed, "m/44'/60'/0'/0/0").unwrap();
        let c = derive_secp256k1(&seed, "m/44'/60'/0'/0/1").unwrap();

        assert_eq!(a.secret, b.secret);
        assert_eq!(a.public_compressed, b.public_compressed);
        assert_ne!(a.public_compressed, c.public_compressed);
        assert_eq!(a.public_uncompressed[0], 0x04);
    }
}
