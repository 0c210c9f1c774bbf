//! Field filters applied while a request body is deserialized
//!
//! Filters run before the `validator` rules, so `length(min = 1)` on a
//! filtered field rejects whitespace-only input.

use serde::{Deserialize, Deserializer};

/// Filter: trim surrounding whitespace from a string field
///
/// ```rust,ignore
/// #[serde(deserialize_with = "trimmed")]
/// #[validate(length(min = 1, max = 255))]
/// pub name: String,
/// ```
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}
