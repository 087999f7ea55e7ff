//! Pairwise similarity between a query and a canonical name.
//!
//! Blends a block-matching sequence ratio (character overlap) with
//! Jaro-Winkler (prefix agreement), then boosts pairs that belong to the same
//! product generation. Model numbers differ mostly in trailing digits and
//! letters, so neither metric alone ranks candidates well.

use once_cell::sync::Lazy;
use regex::Regex;
use rigscore_core::{HardwareKind, MatchConfig};

static CPU_GENERATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"i[3-9]-(\d{2})").expect("static generation pattern"));

static GPU_SERIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(rtx|gtx|rx)\s*(\d{4})").expect("static series pattern"));

/// Strict threshold test: a score equal to the threshold is rejected.
pub fn exceeds(score: f64, threshold: f64) -> bool {
    score > threshold
}

/// Ratcliff/Obershelp ratio: `2 * M / (|a| + |b|)` where `M` is the total size
/// of the matching blocks. Two empty strings are identical.
///
/// No characters are treated as junk. Unlike difflib's default `autojunk`,
/// frequent characters in long strings still count toward `M`.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block in `a[alo..ahi]` / `b[blo..bhi]`. Among equally long
/// blocks the one starting earliest in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo + 1;
    let mut best = (alo, blo, 0);
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];
    for i in alo..ahi {
        cur.iter_mut().for_each(|c| *c = 0);
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = prev[j - blo] + 1;
                cur[j - blo + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Series features of one lowercased string.
#[derive(Debug, Clone, Default, PartialEq)]
struct SeriesTraits {
    intel: bool,
    amd: bool,
    cpu_generation: Option<String>,
    /// `rtx`, `gtx` or `rx`, only when followed by a four-digit model number.
    gpu_series: Option<String>,
}

impl SeriesTraits {
    fn of(lower: &str) -> Self {
        Self {
            intel: lower.contains("intel"),
            amd: lower.contains("amd"),
            cpu_generation: CPU_GENERATION
                .captures(lower)
                .map(|c| c[1].to_string()),
            gpu_series: GPU_SERIES
                .captures(lower)
                .map(|c| c[1].to_string()),
        }
    }

    fn same_series(&self, other: &Self, kind: HardwareKind) -> bool {
        match kind {
            HardwareKind::Cpu => {
                let same_brand = (self.intel && other.intel) || (self.amd && other.amd);
                same_brand
                    && self.cpu_generation.is_some()
                    && self.cpu_generation == other.cpu_generation
            }
            HardwareKind::Gpu => {
                self.gpu_series.is_some() && self.gpu_series == other.gpu_series
            }
        }
    }
}

/// A query lowercased and analysed once, then scored against many candidates.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    lower: String,
    traits: SeriesTraits,
}

impl PreparedQuery {
    pub fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let traits = SeriesTraits::of(&lower);
        Self { lower, traits }
    }
}

/// Combined similarity for one hardware namespace.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    kind: HardwareKind,
    sequence_weight: f64,
    series_boost: f64,
}

impl SimilarityScorer {
    pub fn new(kind: HardwareKind, config: &MatchConfig) -> Self {
        Self {
            kind,
            sequence_weight: config.sequence_weight,
            series_boost: config.series_boost,
        }
    }

    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        self.score_prepared(&PreparedQuery::new(query), candidate)
    }

    /// Score against a pre-analysed query. Boosted scores are not clamped and
    /// may exceed 1.0.
    pub fn score_prepared(&self, query: &PreparedQuery, candidate: &str) -> f64 {
        let lower = candidate.to_lowercase();
        let ratio = sequence_ratio(&query.lower, &lower);
        let jw = strsim::jaro_winkler(&query.lower, &lower);
        let combined = self.sequence_weight * ratio + (1.0 - self.sequence_weight) * jw;

        if query.traits.same_series(&SeriesTraits::of(&lower), self.kind) {
            combined * self.series_boost
        } else {
            combined
        }
    }

    /// Highest-scoring candidate; the first one wins ties. `None` for an empty
    /// candidate list.
    pub fn best_match<'a, I>(&self, query: &PreparedQuery, candidates: I) -> Option<(&'a str, f64)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, f64)> = None;
        for candidate in candidates {
            let score = self.score_prepared(query, candidate);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best
    }
}
