//! Pool records as served by the subgraph and the flat rows uploaded to the
//! analytics table.

use serde::{Deserialize, Serialize};

/// Token metadata nested in a [`PoolRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub decimals: String,
    pub name: String,
    pub symbol: String,
}

/// A pool exactly as returned by the subgraph. Numeric fields arrive as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    pub liquidity: String,
    pub liquidity_provider_count: String,
    pub id: String,
    pub sqrt_price: String,
    pub token0_price: String,
    pub token1_price: String,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
}

/// A single table row. Field order matches the table schema.
///
/// Numeric columns are `None` when the upstream text is not a number, which
/// serializes to `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub liquidity: Option<f64>,
    pub liquidity_provider_count: Option<i64>,
    pub id: String,
    pub sqrt_price: Option<f64>,
    pub token0_price: Option<f64>,
    pub token1_price: Option<f64>,
    pub token0_decimals: Option<i64>,
    pub token0_name: String,
    pub token0_symbol: String,
    pub token1_decimals: Option<i64>,
    pub token1_name: String,
    pub token1_symbol: String,
}

/// Flatten one pool record into a table row.
pub fn flatten(pool: &PoolRecord) -> FlatRow {
    FlatRow {
        liquidity: parse_float(&pool.liquidity),
        liquidity_provider_count: parse_int(&pool.liquidity_provider_count),
        id: pool.id.clone(),
        sqrt_price: parse_float(&pool.sqrt_price),
        token0_price: parse_float(&pool.token0_price),
        token1_price: parse_float(&pool.token1_price),
        token0_decimals: parse_int(&pool.token0.decimals),
        token0_name: pool.token0.name.clone(),
        token0_symbol: pool.token0.symbol.clone(),
        token1_decimals: parse_int(&pool.token1.decimals),
        token1_name: pool.token1.name.clone(),
        token1_symbol: pool.token1.symbol.clone(),
    }
}

/// Flatten a batch of pool records, one row per record, in input order.
pub fn flatten_all(pools: &[PoolRecord]) -> Vec<FlatRow> {
    pools.iter().map(flatten).collect()
}

/// Parse the leading decimal number of `text`, ignoring anything after it.
///
/// Text with no leading number, or one that overflows to infinity, is `None`.
fn parse_float(text: &str) -> Option<f64> {
    float_prefix(text.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse the leading integer of `text`, ignoring anything after it.
///
/// Integers outside the `i64` range saturate to `i64::MIN` or `i64::MAX`.
fn parse_int(text: &str) -> Option<i64> {
    let prefix = int_prefix(text.trim_start());

    prefix
        .parse::<i64>()
        .ok()
        .or_else(|| prefix.parse::<f64>().ok().map(|value| value as i64))
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digits_len(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

fn int_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let sign = sign_len(bytes);
    let digits = digits_len(&bytes[sign..]);

    if digits == 0 {
        return "";
    }
    &text[..sign + digits]
}

fn float_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = sign_len(bytes);

    let int_digits = digits_len(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_len(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + sign_len(&bytes[end + 1..]);
        let exp_digits = digits_len(&bytes[exp_start..]);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    &text[..end]
}
