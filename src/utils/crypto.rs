// 加密工具函数
// 绿界 CheckMacValue 的生成与校验

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// 签名字段名，参与计算前需剔除
pub const CHECK_MAC_VALUE_KEY: &str = "CheckMacValue";

/// 编码后需还原的保留字符 (.NET UrlEncode 方言)
const DOTNET_DECODE_TABLE: [(&str, &str); 8] = [
    ("%2D", "-"),
    ("%5F", "_"),
    ("%2E", "."),
    ("%21", "!"),
    ("%2A", "*"),
    ("%28", "("),
    ("%29", ")"),
    ("%20", "+"),
];

/// 拼接待签名的原始字符串
///
/// 参数按键名字节序排序 (区分大小写)，以 `key=value` 用 `&` 连接，
/// 前后分别加上 `HashKey=...&` 与 `&HashIV=...`
///
/// 键名重复时只保留最后一个值 (网关参数不会重复)
pub fn canonical_string<K, V, I>(params: I, hash_key: &str, hash_iv: &str) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string()))
        .filter(|(key, _)| key != CHECK_MAC_VALUE_KEY)
        .collect();

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!("HashKey={}&{}&HashIV={}", hash_key, joined, hash_iv)
}

/// 按绿界要求的 .NET 方言做URL编码
///
/// 除ASCII字母数字外的每个UTF-8字节编码为 `%XX` (大写)，
/// 再把对照表中的保留字符还原
pub fn dotnet_url_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }

    DOTNET_DECODE_TABLE
        .iter()
        .fold(encoded, |acc, (from, to)| acc.replace(from, to))
}

/// 生成 CheckMacValue
///
/// # Arguments
/// * `params` - 交易参数 (已有的CheckMacValue会被忽略)
/// * `hash_key` - 商户HashKey
/// * `hash_iv` - 商户HashIV
///
/// # Returns
/// * 64位大写十六进制SHA-256摘要
pub fn generate_check_mac_value<K, V, I>(params: I, hash_key: &str, hash_iv: &str) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let raw = canonical_string(params, hash_key, hash_iv);
    let normalized = dotnet_url_encode(&raw).to_lowercase();

    let digest = Sha256::digest(normalized.as_bytes());
    hex::encode(digest).to_uppercase()
}

/// 校验回传参数中的 CheckMacValue
///
/// # Returns
/// * 缺少签名或签名不符时返回false
pub fn verify_check_mac_value<K, V, I>(params: I, hash_key: &str, hash_iv: &str) -> bool
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let params: Vec<(String, String)> = params
        .into_iter()
        .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string()))
        .collect();

    let received = match params.iter().find(|(key, _)| key == CHECK_MAC_VALUE_KEY) {
        Some((_, value)) => value.to_ascii_uppercase(),
        None => return false,
    };

    let expected = generate_check_mac_value(params.iter().cloned(), hash_key, hash_iv);

    constant_time_eq(&expected, &received)
}

/// 常量时间字符串比较 (防止时序攻击)
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.bytes().zip(b.bytes()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}
