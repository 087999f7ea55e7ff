//! Per-tier counters and the percentage report derived from them.

use rigscore_core::{HardwareKind, MatchTier, Resolution};
use serde::Serialize;

/// Counters for one namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub unknown: u64,
    pub cache_hit: u64,
    pub exact: u64,
    pub simplified_exact: u64,
    pub simplified_fuzzy: u64,
    pub fuzzy: u64,
    pub default: u64,
    /// Every resolution except cache hits.
    pub total_rows: u64,
}

impl TierCounts {
    /// Count a freshly computed resolution.
    pub fn record(&mut self, resolution: &Resolution) {
        self.total_rows += 1;
        match resolution {
            Resolution::Unresolved => self.unknown += 1,
            Resolution::DefaultMatched { .. } => self.default += 1,
            Resolution::Matched { tier, .. } => match tier {
                MatchTier::Exact => self.exact += 1,
                MatchTier::SimplifiedExact => self.simplified_exact += 1,
                MatchTier::SimplifiedFuzzy => self.simplified_fuzzy += 1,
                MatchTier::Fuzzy => self.fuzzy += 1,
            },
        }
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hit += 1;
    }
}

/// CPU and GPU counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub cpu: TierCounts,
    pub gpu: TierCounts,
}

impl Statistics {
    pub fn counts(&self, kind: HardwareKind) -> &TierCounts {
        match kind {
            HardwareKind::Cpu => &self.cpu,
            HardwareKind::Gpu => &self.gpu,
        }
    }

    pub fn counts_mut(&mut self, kind: HardwareKind) -> &mut TierCounts {
        match kind {
            HardwareKind::Cpu => &mut self.cpu,
            HardwareKind::Gpu => &mut self.gpu,
        }
    }

    /// Percentage table, recomputed on every call.
    pub fn report(&self) -> Vec<StatsRow> {
        [HardwareKind::Cpu, HardwareKind::Gpu]
            .into_iter()
            .flat_map(|kind| {
                let c = self.counts(kind);
                [
                    ("exact", c.exact),
                    ("simplified", c.simplified_exact + c.simplified_fuzzy),
                    ("fuzzy", c.fuzzy),
                    ("default", c.default),
                    ("unknown", c.unknown),
                ]
                .into_iter()
                .map(move |(category, count)| StatsRow {
                    kind,
                    category,
                    count,
                    percentage: percentage(count, c.total_rows),
                })
            })
            .collect()
    }
}

/// One line of the statistics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    pub kind: HardwareKind,
    pub category: &'static str,
    pub count: u64,
    pub percentage: String,
}

/// `count / total` with two decimals, or `0%` when nothing was resolved.
pub fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", count as f64 * 100.0 / total as f64)
}
