//! 派生 key 解析
//!
//! 根据币种符号和钱包 flag 决定用于 bip44 派生的 key。
//! 关联币种（主币/副币）可以通过 flag 共享或区分派生编号：
//!
//! 1. 副币 + 副币 flag：派生 key 替换为主币符号
//! 2. 派生 key 为主币 + 主币 flag：再映射为主币的标准 bip44 名称
//!
//! 两条规则按上述顺序执行，因此两个 flag 同时开启时副币继承的是主币的
//! *标准* 编号，而不是主币的原始符号。

use crate::domain::wallet::WalletFlags;

/// MKF 使用 BBC 的 bip44 编号
pub const FLAG_MKF_USE_BBC_BIP44_ID: &str = "mkf_use_bbc_bip44_id";

/// BBC 使用标准 bip44 编号
pub const FLAG_BBC_USE_STANDARD_BIP44_ID: &str = "bbc_use_standard_bip44_id";

/// 共享派生编号的币种对
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedIdPair {
    pub primary: &'static str,
    pub secondary: &'static str,
    /// 副币改用主币编号
    pub secondary_flag: &'static str,
    /// 主币改用标准编号
    pub primary_flag: &'static str,
}

static SHARED_ID_PAIRS: &[SharedIdPair] = &[SharedIdPair {
    primary: "BBC",
    secondary: "MKF",
    secondary_flag: FLAG_MKF_USE_BBC_BIP44_ID,
    primary_flag: FLAG_BBC_USE_STANDARD_BIP44_ID,
}];

/// 主币符号 -> 标准 bip44 名称
static STANDARD_IDS: &[(&str, &str)] = &[("BBC", "BigBang Core")];

/// 已知的币种对
pub fn shared_id_pairs() -> &'static [SharedIdPair] {
    SHARED_ID_PAIRS
}

/// 主币的标准 bip44 名称
pub fn standard_bip44_id(symbol: &str) -> Option<&'static str> {
    STANDARD_IDS
        .iter()
        .find(|(primary, _)| *primary == symbol)
        .map(|(_, id)| *id)
}

/// 解析派生 key
///
/// 纯函数：不修改 `flags`；未知符号原样返回（由分发器拒绝）。
pub fn resolve_bip44_key(symbol: &str, flags: &WalletFlags) -> String {
    let mut bip44_key = symbol;

    if let Some(pair) = SHARED_ID_PAIRS
        .iter()
        .find(|pair| pair.secondary == bip44_key && flags.contains(pair.secondary_flag))
    {
        bip44_key = pair.primary;
    }

    if let Some(pair) = SHARED_ID_PAIRS
        .iter()
        .find(|pair| pair.primary == bip44_key && flags.contains(pair.primary_flag))
    {
        if let Some(id) = standard_bip44_id(pair.primary) {
            bip44_key = id;
        }
    }

    bip44_key.to_string()
}
