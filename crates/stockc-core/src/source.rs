use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Where a history result was resolved from.
///
/// Stale cache reads are reported as [`HistorySource::Cache`]; the
/// [`HistoryResult::stale`](crate::HistoryResult::stale) flag tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySource {
    Live,
    Cache,
    Demo,
}

impl HistorySource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Cache => "cache",
            Self::Demo => "demo",
        }
    }
}

impl Display for HistorySource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
