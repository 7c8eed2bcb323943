//! Serde helpers for backend payloads.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
