//! Keyword heuristics for identifiers that match nothing in the catalog.

use rigscore_core::HardwareKind;
use serde::{Deserialize, Serialize};

/// Fires when every group has at least one keyword present in the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub groups: Vec<Vec<String>>,
    pub score: f64,
}

impl KeywordRule {
    /// Any one of `keywords`.
    pub fn any(keywords: &[&str], score: f64) -> Self {
        Self::all_of(&[keywords], score)
    }

    /// At least one keyword from each group.
    pub fn all_of(groups: &[&[&str]], score: f64) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|k| k.to_lowercase()).collect())
                .collect(),
            score,
        }
    }

    fn matches(&self, lower: &str) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|k| lower.contains(k.as_str())))
    }
}

/// Ordered rules, first match wins, plus a flat fallback score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultTable {
    pub rules: Vec<KeywordRule>,
    pub fallback: f64,
}

impl DefaultTable {
    pub fn for_kind(kind: HardwareKind) -> Self {
        match kind {
            HardwareKind::Cpu => Self::cpu(),
            HardwareKind::Gpu => Self::gpu(),
        }
    }

    /// Tier-class keywords: flagship parts first, legacy budget lines last.
    pub fn cpu() -> Self {
        Self {
            rules: vec![
                KeywordRule::any(&["i9", "ryzen 9", "threadripper"], 75.0),
                KeywordRule::any(&["i7", "ryzen 7"], 65.0),
                KeywordRule::any(&["i5", "ryzen 5"], 55.0),
                KeywordRule::any(&["i3", "ryzen 3"], 40.0),
                KeywordRule::any(&["pentium", "athlon"], 25.0),
            ],
            fallback: 30.0,
        }
    }

    pub fn gpu() -> Self {
        let model = |name: &str, score: f64| KeywordRule::any(&[name], score);
        Self {
            rules: vec![
                model("rtx 4090", 88.0),
                model("rtx 4080", 80.0),
                model("rtx 4070", 65.0),
                model("rtx 4060", 50.0),
                model("rtx 3090", 85.0),
                model("rtx 3080", 75.0),
                model("rtx 3070", 60.0),
                model("rtx 3060", 45.0),
                model("gtx 1660", 35.0),
                model("gtx 1650", 30.0),
                model("gtx 1060", 25.0),
                model("rx 7900", 80.0),
                model("rx 7800", 65.0),
                model("rx 7700", 55.0),
                model("rx 7600", 45.0),
                model("rx 6600", 40.0),
                // integrated graphics
                KeywordRule::all_of(&[&["intel"], &["uhd", "iris"]], 15.0),
                KeywordRule::all_of(&[&["radeon"], &["vega"]], 20.0),
            ],
            fallback: 25.0,
        }
    }

    pub fn score(&self, query: &str) -> f64 {
        let lower = query.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lower))
            .map_or(self.fallback, |r| r.score)
    }
}
