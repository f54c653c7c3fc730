//! Newline-delimited JSON encoding for bulk table inserts.

use itertools::Itertools;
use serde::Serialize;

/// Encode each item as one compact JSON object per line.
///
/// Lines are joined by a single `\n` with no trailing newline, so an empty
/// slice produces an empty payload.
pub fn encode<T: Serialize>(items: &[T]) -> serde_json::Result<Vec<u8>> {
    let lines = items
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.into_iter().join("\n").into_bytes())
}
