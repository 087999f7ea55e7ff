//! Row-oriented matching over a whole dataset.

use rigscore_core::{HardwareKind, Resolution, UNKNOWN_LABEL};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::resolver::Resolver;

/// One input row: the raw CPU and GPU cells. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareRow {
    #[serde(default, alias = "CPU")]
    pub cpu: Option<String>,
    #[serde(default, alias = "GPU")]
    pub gpu: Option<String>,
}

impl HardwareRow {
    pub fn new(cpu: impl Into<String>, gpu: impl Into<String>) -> Self {
        Self {
            cpu: Some(cpu.into()),
            gpu: Some(gpu.into()),
        }
    }
}

/// Resolved pair for one row, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    pub cpu_score: f64,
    pub cpu_match: String,
    pub gpu_score: f64,
    pub gpu_match: String,
    #[serde(skip)]
    pub cpu: Resolution,
    #[serde(skip)]
    pub gpu: Resolution,
}

impl ScoredRow {
    fn new(cpu: Resolution, gpu: Resolution) -> Self {
        Self {
            cpu_score: cpu.score(),
            cpu_match: cpu.label().to_string(),
            gpu_score: gpu.score(),
            gpu_match: gpu.label().to_string(),
            cpu,
            gpu,
        }
    }
}

/// How the labels of one column relate to the raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    /// Label equals the raw cell.
    pub exact_match: usize,
    /// Label differs from the raw cell and is not `Unknown`.
    pub fuzzy_match: usize,
    /// Label is `Unknown`.
    pub no_match: usize,
}

impl ColumnSummary {
    fn add(&mut self, raw: Option<&str>, resolution: &Resolution) {
        let label = resolution.label();
        if label == UNKNOWN_LABEL {
            self.no_match += 1;
        } else if raw == Some(label) {
            self.exact_match += 1;
        } else {
            self.fuzzy_match += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub cpu: ColumnSummary,
    pub gpu: ColumnSummary,
}

/// Resolve every row: all CPU cells first, then all GPU cells.
pub fn match_all(resolver: &mut Resolver, rows: &[HardwareRow]) -> (Vec<ScoredRow>, BatchSummary) {
    info!("Matching {} rows", rows.len());

    let cpu: Vec<Resolution> = rows
        .iter()
        .map(|r| resolver.resolve(HardwareKind::Cpu, r.cpu.as_deref()))
        .collect();
    let gpu: Vec<Resolution> = rows
        .iter()
        .map(|r| resolver.resolve(HardwareKind::Gpu, r.gpu.as_deref()))
        .collect();

    let mut summary = BatchSummary {
        total_rows: rows.len(),
        ..BatchSummary::default()
    };
    for ((row, c), g) in rows.iter().zip(&cpu).zip(&gpu) {
        summary.cpu.add(row.cpu.as_deref(), c);
        summary.gpu.add(row.gpu.as_deref(), g);
    }

    let scored = cpu
        .into_iter()
        .zip(gpu)
        .map(|(c, g)| ScoredRow::new(c, g))
        .collect();

    info!(
        "Matched {} rows: cpu exact={} fuzzy={} none={}, gpu exact={} fuzzy={} none={}",
        summary.total_rows,
        summary.cpu.exact_match,
        summary.cpu.fuzzy_match,
        summary.cpu.no_match,
        summary.gpu.exact_match,
        summary.gpu.fuzzy_match,
        summary.gpu.no_match,
    );
    (scored, summary)
}
