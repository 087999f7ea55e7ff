//! Shared result types.

use serde::{Deserialize, Serialize};

/// Label reported for inputs that carry no identifier at all.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Prefix of labels produced by the keyword heuristic.
pub const DEFAULT_LABEL_PREFIX: &str = "Default: ";

/// Hardware namespace a query is resolved in. CPU and GPU use separate
/// catalogs, patterns and default tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareKind {
    Cpu,
    Gpu,
}

impl std::fmt::Display for HardwareKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Gpu => write!(f, "gpu"),
        }
    }
}

impl std::str::FromStr for HardwareKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "gpu" => Ok(Self::Gpu),
            other => Err(crate::Error::Config(format!("unknown hardware kind: {other}"))),
        }
    }
}

/// Which tier of the resolver produced a catalog match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Query is byte-identical to a canonical name.
    Exact,
    /// Series key maps to exactly one canonical name.
    SimplifiedExact,
    /// Series key shared by several names; best similarity accepted.
    SimplifiedFuzzy,
    /// Full catalog scan.
    Fuzzy,
}

/// Outcome of resolving one raw identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Associated with a catalog entry.
    Matched {
        score: f64,
        name: String,
        tier: MatchTier,
    },
    /// No catalog entry found; score comes from the keyword heuristic.
    DefaultMatched { score: f64, label: String },
    /// Input carried no identifier.
    Unresolved,
}

impl Resolution {
    pub fn score(&self) -> f64 {
        match self {
            Self::Matched { score, .. } | Self::DefaultMatched { score, .. } => *score,
            Self::Unresolved => 0.0,
        }
    }

    /// The matched canonical name, the `Default: ...` label, or `Unknown`.
    pub fn label(&self) -> &str {
        match self {
            Self::Matched { name, .. } => name,
            Self::DefaultMatched { label, .. } => label,
            Self::Unresolved => UNKNOWN_LABEL,
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            Self::Matched { tier, .. } => Some(*tier),
            _ => None,
        }
    }
}
