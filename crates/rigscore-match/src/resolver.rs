//! Tiered resolution of raw identifiers against the catalogs.
//!
//! Tiers run in order and stop at the first hit:
//! unknown input → session cache → exact name → series key → full fuzzy scan
//! → keyword default. Every query gets an answer; which tier answered is the
//! confidence signal.

use rigscore_core::{
    HardwareKind, MatchConfig, MatchTier, Resolution, DEFAULT_LABEL_PREFIX, UNKNOWN_LABEL,
};
use tracing::{debug, info};

use crate::cache::ResolutionCache;
use crate::catalog::Catalog;
use crate::defaults::DefaultTable;
use crate::similarity::{exceeds, PreparedQuery, SimilarityScorer};
use crate::simplify::{series_key, SimplifiedIndex};
use crate::stats::{Statistics, StatsRow};

/// Everything resolution needs for one namespace. Read-only once built.
struct Namespace {
    kind: HardwareKind,
    catalog: Catalog,
    index: SimplifiedIndex,
    scorer: SimilarityScorer,
    defaults: DefaultTable,
}

impl Namespace {
    fn new(kind: HardwareKind, catalog: Catalog, config: &MatchConfig) -> Self {
        let index = SimplifiedIndex::build(kind, &catalog);
        Self {
            kind,
            index,
            catalog,
            scorer: SimilarityScorer::new(kind, config),
            defaults: DefaultTable::for_kind(kind),
        }
    }

    fn matched(&self, name: &str, tier: MatchTier) -> Option<Resolution> {
        let score = self.catalog.get(name)?;
        Some(Resolution::Matched {
            score,
            name: name.to_string(),
            tier,
        })
    }
}

/// Immutable half of a resolver: catalogs, series indexes, scorers, default
/// tables and thresholds. Safe to share across threads.
pub struct MatchEngine {
    cpu: Namespace,
    gpu: Namespace,
    simplified_threshold: f64,
    fuzzy_threshold: f64,
    cache_capacity: Option<usize>,
}

impl MatchEngine {
    pub fn new(cpu: Catalog, gpu: Catalog, config: &MatchConfig) -> Self {
        let engine = Self {
            cpu: Namespace::new(HardwareKind::Cpu, cpu, config),
            gpu: Namespace::new(HardwareKind::Gpu, gpu, config),
            simplified_threshold: config.simplified_threshold,
            fuzzy_threshold: config.fuzzy_threshold,
            cache_capacity: config.cache_capacity,
        };
        info!(
            "Match engine ready: cpu={} models/{} series, gpu={} models/{} series",
            engine.cpu.catalog.len(),
            engine.cpu.index.len(),
            engine.gpu.catalog.len(),
            engine.gpu.index.len(),
        );
        engine
    }

    /// Replace the keyword table used when nothing in the catalog matches.
    pub fn with_default_table(mut self, kind: HardwareKind, table: DefaultTable) -> Self {
        self.namespace_mut(kind).defaults = table;
        self
    }

    pub fn catalog(&self, kind: HardwareKind) -> &Catalog {
        &self.namespace(kind).catalog
    }

    pub fn cache_capacity(&self) -> Option<usize> {
        self.cache_capacity
    }

    fn namespace(&self, kind: HardwareKind) -> &Namespace {
        match kind {
            HardwareKind::Cpu => &self.cpu,
            HardwareKind::Gpu => &self.gpu,
        }
    }

    fn namespace_mut(&mut self, kind: HardwareKind) -> &mut Namespace {
        match kind {
            HardwareKind::Cpu => &mut self.cpu,
            HardwareKind::Gpu => &mut self.gpu,
        }
    }

    /// Tiers 3–6 for a query already known to carry an identifier.
    pub fn compute(&self, kind: HardwareKind, raw: &str) -> Resolution {
        let ns = self.namespace(kind);
        let query = raw.trim();

        for candidate in [raw, query] {
            if let Some(hit) = ns.matched(candidate, MatchTier::Exact) {
                debug!(kind = %ns.kind, query, "exact match");
                return hit;
            }
        }

        let prepared = PreparedQuery::new(query);
        let key = series_key(kind, query);
        if let Some(candidates) = ns.index.candidates(&key) {
            if let [only] = candidates {
                if let Some(hit) = ns.matched(only, MatchTier::SimplifiedExact) {
                    debug!(kind = %ns.kind, query, key = %key, matched = %only, "series key match");
                    return hit;
                }
            }

            let best = ns
                .scorer
                .best_match(&prepared, candidates.iter().map(String::as_str));
            if let Some((name, score)) = best {
                if exceeds(score, self.simplified_threshold) {
                    if let Some(hit) = ns.matched(name, MatchTier::SimplifiedFuzzy) {
                        debug!(kind = %ns.kind, query, matched = name, score, "series key tie-break");
                        return hit;
                    }
                }
                debug!(kind = %ns.kind, query, key = %key, score, "series candidates below threshold");
            }
        }

        if let Some((name, score)) = ns.scorer.best_match(&prepared, ns.catalog.names()) {
            if exceeds(score, self.fuzzy_threshold) {
                if let Some(hit) = ns.matched(name, MatchTier::Fuzzy) {
                    debug!(kind = %ns.kind, query, matched = name, score, "fuzzy match");
                    return hit;
                }
            }
        }

        let score = ns.defaults.score(query);
        debug!(kind = %ns.kind, query, score, "no catalog match, using keyword default");
        Resolution::DefaultMatched {
            score,
            label: format!("{DEFAULT_LABEL_PREFIX}{query}"),
        }
    }
}

/// The identifier carried by a raw cell, or `None` for absent, blank and
/// `Unknown` placeholders.
pub fn identifier(raw: Option<&str>) -> Option<&str> {
    raw.filter(|q| {
        let trimmed = q.trim();
        !trimmed.is_empty() && trimmed != UNKNOWN_LABEL
    })
}

/// Mutable half of a resolver: caches and counters for one session.
pub(crate) struct Session {
    cpu_cache: ResolutionCache,
    gpu_cache: ResolutionCache,
    pub(crate) stats: Statistics,
}

impl Session {
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            cpu_cache: ResolutionCache::new(capacity),
            gpu_cache: ResolutionCache::new(capacity),
            stats: Statistics::default(),
        }
    }

    pub(crate) fn cache(&mut self, kind: HardwareKind) -> &mut ResolutionCache {
        match kind {
            HardwareKind::Cpu => &mut self.cpu_cache,
            HardwareKind::Gpu => &mut self.gpu_cache,
        }
    }

    pub(crate) fn cache_len(&self, kind: HardwareKind) -> usize {
        match kind {
            HardwareKind::Cpu => self.cpu_cache.len(),
            HardwareKind::Gpu => self.gpu_cache.len(),
        }
    }

    /// Serve from cache, counting the hit.
    pub(crate) fn lookup(&mut self, kind: HardwareKind, query: &str) -> Option<Resolution> {
        let hit = self.cache(kind).get(query)?;
        self.stats.counts_mut(kind).record_cache_hit();
        Some(hit)
    }

    pub(crate) fn store(&mut self, kind: HardwareKind, query: &str, resolution: &Resolution) {
        self.cache(kind).put(query.to_string(), resolution.clone());
        self.stats.counts_mut(kind).record(resolution);
    }

    pub(crate) fn record_unknown(&mut self, kind: HardwareKind) {
        self.stats.counts_mut(kind).record(&Resolution::Unresolved);
    }
}

/// Single-threaded resolver session.
pub struct Resolver {
    engine: MatchEngine,
    session: Session,
}

impl Resolver {
    /// Resolver with the default thresholds and keyword tables.
    pub fn new(cpu: Catalog, gpu: Catalog) -> Self {
        Self::with_config(cpu, gpu, &MatchConfig::default())
    }

    pub fn with_config(cpu: Catalog, gpu: Catalog, config: &MatchConfig) -> Self {
        Self::from_engine(MatchEngine::new(cpu, gpu, config))
    }

    pub fn from_engine(engine: MatchEngine) -> Self {
        let session = Session::new(engine.cache_capacity());
        Self { engine, session }
    }

    pub fn resolve_cpu(&mut self, query: &str) -> Resolution {
        self.resolve(HardwareKind::Cpu, Some(query))
    }

    pub fn resolve_gpu(&mut self, query: &str) -> Resolution {
        self.resolve(HardwareKind::Gpu, Some(query))
    }

    /// Resolve one cell. `None` stands for a missing value.
    pub fn resolve(&mut self, kind: HardwareKind, query: Option<&str>) -> Resolution {
        let Some(query) = identifier(query) else {
            self.session.record_unknown(kind);
            return Resolution::Unresolved;
        };

        if let Some(hit) = self.session.lookup(kind, query) {
            return hit;
        }

        let resolution = self.engine.compute(kind, query);
        self.session.store(kind, query, &resolution);
        resolution
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn statistics(&self) -> &Statistics {
        &self.session.stats
    }

    pub fn report(&self) -> Vec<StatsRow> {
        self.session.stats.report()
    }

    pub fn cache_len(&self, kind: HardwareKind) -> usize {
        self.session.cache_len(kind)
    }
}
