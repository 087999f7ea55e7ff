//! Thread-safe resolver for parallel batch loops.
//!
//! The engine is shared read-only; only cache and counter updates take the
//! lock, so similarity scans on different threads run concurrently.

use std::sync::Arc;

use parking_lot::Mutex;
use rigscore_core::{HardwareKind, MatchConfig, Resolution};

use crate::catalog::Catalog;
use crate::resolver::{identifier, MatchEngine, Session};
use crate::stats::{Statistics, StatsRow};

pub struct SharedResolver {
    engine: Arc<MatchEngine>,
    session: Mutex<Session>,
}

impl SharedResolver {
    pub fn new(cpu: Catalog, gpu: Catalog, config: &MatchConfig) -> Self {
        Self::from_engine(Arc::new(MatchEngine::new(cpu, gpu, config)))
    }

    pub fn from_engine(engine: Arc<MatchEngine>) -> Self {
        let session = Session::new(engine.cache_capacity());
        Self {
            engine,
            session: Mutex::new(session),
        }
    }

    pub fn resolve_cpu(&self, query: &str) -> Resolution {
        self.resolve(HardwareKind::Cpu, Some(query))
    }

    pub fn resolve_gpu(&self, query: &str) -> Resolution {
        self.resolve(HardwareKind::Gpu, Some(query))
    }

    pub fn resolve(&self, kind: HardwareKind, query: Option<&str>) -> Resolution {
        let Some(query) = identifier(query) else {
            self.session.lock().record_unknown(kind);
            return Resolution::Unresolved;
        };

        if let Some(hit) = self.session.lock().lookup(kind, query) {
            return hit;
        }

        let resolution = self.engine.compute(kind, query);

        let mut session = self.session.lock();
        // Another thread may have finished the same query meanwhile; count
        // ours as a hit so totals match a sequential run.
        if let Some(hit) = session.lookup(kind, query) {
            return hit;
        }
        session.store(kind, query, &resolution);
        resolution
    }

    pub fn engine(&self) -> &Arc<MatchEngine> {
        &self.engine
    }

    /// Snapshot of the counters.
    pub fn statistics(&self) -> Statistics {
        self.session.lock().stats
    }

    pub fn report(&self) -> Vec<StatsRow> {
        self.statistics().report()
    }

    pub fn cache_len(&self, kind: HardwareKind) -> usize {
        self.session.lock().cache_len(kind)
    }
}
