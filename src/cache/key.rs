//! Cache Key Module
//!
//! Builds deterministic cache keys from a prefix and a set of query parameters.

use std::collections::BTreeMap;
use std::fmt;

// == Key Param ==
/// A scalar value that can take part in a cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParam {
    Int(i64),
    Text(String),
    /// Renders as the empty string
    Empty,
}

impl fmt::Display for KeyParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParam::Int(n) => write!(f, "{}", n),
            KeyParam::Text(s) => f.write_str(s),
            KeyParam::Empty => Ok(()),
        }
    }
}

impl From<i64> for KeyParam {
    fn from(value: i64) -> Self {
        KeyParam::Int(value)
    }
}

impl From<u32> for KeyParam {
    fn from(value: u32) -> Self {
        KeyParam::Int(i64::from(value))
    }
}

impl From<&str> for KeyParam {
    fn from(value: &str) -> Self {
        KeyParam::Text(value.to_string())
    }
}

impl From<String> for KeyParam {
    fn from(value: String) -> Self {
        KeyParam::Text(value)
    }
}

impl<T: Into<KeyParam>> From<Option<T>> for KeyParam {
    fn from(value: Option<T>) -> Self {
        value.map_or(KeyParam::Empty, Into::into)
    }
}

// == Generate Key ==
/// Produces `"<prefix>:<k1>:<v1>|<k2>:<v2>|..."` with parameter names sorted
/// ascending, so the result does not depend on the order `params` were built in.
///
/// If a name appears more than once, the last occurrence wins.
///
/// # Example
/// ```
/// use noticias_api::cache::{generate_key, KeyParam};
///
/// let key = generate_key("prefix", [("b", KeyParam::from(2i64)), ("a", KeyParam::from(1i64))]);
/// assert_eq!(key, "prefix:a:1|b:2");
/// ```
pub fn generate_key<K, I>(prefix: &str, params: I) -> String
where
    K: Into<String>,
    I: IntoIterator<Item = (K, KeyParam)>,
{
    let sorted: BTreeMap<String, KeyParam> = params
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect();

    let rendered = sorted
        .iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect::<Vec<_>>()
        .join("|");

    format!("{}:{}", prefix, rendered)
}
