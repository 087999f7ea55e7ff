//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rigscore_match::{
    match_all, series_key, Catalog, HardwareKind, HardwareRow, MatchConfig, Resolver, StatsRow,
};
use tracing::{info, warn};

/// Config file used when `RIGSCORE_CONFIG` is not set.
const DEFAULT_CONFIG_FILE: &str = "rigscore.json";

/// File config overlaid with `RIGSCORE_*` environment variables.
pub fn load_config() -> anyhow::Result<MatchConfig> {
    let mut config = load_file_config(std::env::var("RIGSCORE_CONFIG").ok().map(PathBuf::from));
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// An explicitly named file must exist; the default file is optional.
fn load_file_config(explicit: Option<PathBuf>) -> MatchConfig {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                warn!("RIGSCORE_CONFIG names {}, which is not a readable file", path.display());
            }
            MatchConfig::load(&path)
        }
        None => MatchConfig::load(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

/// `match <cpu-catalog> <gpu-catalog> <rows>` — resolve every row.
pub fn run_match(
    cpu_catalog: &Path,
    gpu_catalog: &Path,
    rows_path: &Path,
    config: &MatchConfig,
) -> anyhow::Result<serde_json::Value> {
    let cpu = Catalog::load_json(cpu_catalog)
        .with_context(|| format!("loading CPU catalog {}", cpu_catalog.display()))?;
    let gpu = Catalog::load_json(gpu_catalog)
        .with_context(|| format!("loading GPU catalog {}", gpu_catalog.display()))?;

    let text = std::fs::read_to_string(rows_path)
        .with_context(|| format!("reading rows {}", rows_path.display()))?;
    let rows: Vec<HardwareRow> = serde_json::from_str(&text)
        .with_context(|| format!("parsing rows {}", rows_path.display()))?;
    info!("Loaded {} rows from {}", rows.len(), rows_path.display());

    let mut resolver = Resolver::with_config(cpu, gpu, config);
    let (scored, summary) = match_all(&mut resolver, &rows);
    let report = resolver.report();
    print_statistics(&report);

    Ok(serde_json::json!({
        "rows": scored,
        "summary": summary,
        "statistics": report,
        "counters": resolver.statistics(),
    }))
}

/// `simplify <cpu|gpu> <text>` — show the series key.
pub fn run_simplify(kind: &str, text: &str) -> anyhow::Result<String> {
    let kind: HardwareKind = kind.parse()?;
    Ok(series_key(kind, text))
}

/// Human-readable statistics table on stderr, leaving stdout for JSON.
pub fn print_statistics(report: &[StatsRow]) {
    eprintln!("=== Matching Statistics ===");
    for row in report {
        eprintln!(
            "{:<4} {:<11} {:>8}  {:>8}",
            row.kind.to_string().to_uppercase(),
            row.category,
            row.count,
            row.percentage
        );
    }
}
