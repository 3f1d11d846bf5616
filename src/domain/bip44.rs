//! BIP44 coin type 表与派生路径模板
//!
//! 派生 key（币种符号或标准名称）到 coin type 的静态映射，
//! 以及钱包级别的路径模板。模板中的 `{coin_type}` 占位符在派生时替换。

use crate::domain::coin::ChainError;

/// 路径模板中的 coin type 占位符
pub const COIN_TYPE_PLACEHOLDER: &str = "{coin_type}";

/// 最短路径：m/44'/coin_type'
pub const PATH_FORMAT: &str = "m/44'/{coin_type}'";

/// 完整路径：m/44'/coin_type'/0'/0/0（账户 0，外部地址，第 0 个地址）
pub const FULL_PATH_FORMAT: &str = "m/44'/{coin_type}'/0'/0/0";

/// 派生 key -> coin type
///
/// key 区分大小写。`BBC`/`MKF` 使用项目内的非标准编号，
/// `BigBang Core` 为 BBC 的标准 bip44 编号。
static COIN_TYPES: &[(&str, u32)] = &[
    ("BTC", 0),
    ("ETH", 60),
    ("TRX", 195),
    ("OMNI", 200),
    ("USDT(Omni)", 200),
    ("BigBang Core", 223),
    ("BBC", 10002),
    ("MKF", 10003),
];

/// 查找派生 key 对应的 coin type
pub fn coin_type(bip44_key: &str) -> Option<u32> {
    COIN_TYPES
        .iter()
        .find(|(key, _)| *key == bip44_key)
        .map(|(_, coin_type)| *coin_type)
}

/// 用 coin type 渲染路径模板
pub fn format_path(path_format: &str, coin_type: u32) -> Result<String, ChainError> {
    if !path_format.starts_with("m/") || !path_format.contains(COIN_TYPE_PLACEHOLDER) {
        return Err(ChainError::InvalidPath(path_format.to_string()));
    }
    Ok(path_format.replace(COIN_TYPE_PLACEHOLDER, &coin_type.to_string()))
}

/// 按派生 key 渲染完整派生路径
pub fn derivation_path(path_format: &str, bip44_key: &str) -> Result<String, ChainError> {
    let coin_type =
        coin_type(bip44_key).ok_or_else(|| ChainError::UnknownCoinType(bip44_key.to_string()))?;
    format_path(path_format, coin_type)
}
