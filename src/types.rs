use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable route identifier, e.g. `"middle_east_to_japan"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub String);

impl RouteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        RouteId(s.to_string())
    }
}

/// Round to one decimal place. Every percentage in the report goes through here.
///
/// Rounds the exact binary value, ties to even, so 0.35 (stored just below
/// 0.35) becomes 0.3 rather than the 0.4 that scaling by ten would give.
pub fn round1(x: f64) -> f64 {
    format!("{x:.1}").parse().unwrap_or(x)
}
