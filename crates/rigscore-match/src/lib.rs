//! Hardware identifier resolution — noisy CPU/GPU strings to catalog scores.
//!
//! A [`Resolver`] owns two immutable catalogs and walks each query through
//! exact, series-key, fuzzy and keyword-default tiers, memoizing results and
//! counting which tier answered. [`SharedResolver`] is the same engine behind
//! a lock for multi-threaded batches.

pub mod batch;
pub mod cache;
pub mod catalog;
pub mod defaults;
pub mod resolver;
pub mod shared;
pub mod similarity;
pub mod simplify;
pub mod stats;

pub use batch::{match_all, BatchSummary, ColumnSummary, HardwareRow, ScoredRow};
pub use cache::ResolutionCache;
pub use catalog::{Catalog, CatalogEntry};
pub use defaults::{DefaultTable, KeywordRule};
pub use resolver::{identifier, MatchEngine, Resolver};
pub use shared::SharedResolver;
pub use similarity::{exceeds, sequence_ratio, PreparedQuery, SimilarityScorer};
pub use simplify::{series_key, SimplifiedIndex};
pub use stats::{percentage, Statistics, StatsRow, TierCounts};

pub use rigscore_core::{HardwareKind, MatchConfig, MatchTier, Resolution};
