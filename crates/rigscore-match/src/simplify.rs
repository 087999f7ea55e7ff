//! Series-key extraction and the index built from it.
//!
//! A series key is the model-number core of an identifier ("I5-13600K",
//! "RTX 4060 TI"). Catalog names and queries that share a key are treated as
//! the same family before any similarity scoring happens.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use rigscore_core::HardwareKind;

use crate::catalog::Catalog;

static CPU_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"I[3-9]-\d{4,5}[A-Z]*",           // I5-13600K
        r"RYZEN\s+[3-9]\s+\d{4,5}[A-Z]*", // RYZEN 7 7700X
        r"CORE\s+ULTRA\s+\d+",            // CORE ULTRA 9
        r"THREADRIPPER\s+\d{4}",          // THREADRIPPER 7980
    ])
});

static GPU_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"RTX\s*\d{4,5}[A-Z\s]*", // RTX 4060 TI
        r"GTX\s*\d{4,5}[A-Z\s]*", // GTX 1660 SUPER
        r"RX\s*\d{4,5}[A-Z\s]*",  // RX 6600 XT
        r"ARC\s*[A-Z]\d{3}",      // ARC A580
        r"GEFORCE\s*RTX\s*\d{4,5}[A-Z\s]*",
        r"RADEON\s*RX\s*\d{4,5}[A-Z\s]*",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static series pattern"))
        .collect()
}

/// Collapse whitespace runs to one space and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce a raw identifier to its series key. The first pattern that matches
/// anywhere wins; otherwise the whole normalized string is the key.
pub fn series_key(kind: HardwareKind, raw: &str) -> String {
    let upper = raw.to_uppercase();
    let patterns = match kind {
        HardwareKind::Cpu => &*CPU_PATTERNS,
        HardwareKind::Gpu => &*GPU_PATTERNS,
    };

    patterns
        .iter()
        .find_map(|re| re.find(&upper))
        .map(|m| collapse_whitespace(m.as_str()))
        .unwrap_or_else(|| collapse_whitespace(&upper))
}

/// Series key → canonical names sharing it, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct SimplifiedIndex {
    groups: HashMap<String, Vec<String>>,
}

impl SimplifiedIndex {
    pub fn build(kind: HardwareKind, catalog: &Catalog) -> Self {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        for name in catalog.names() {
            groups
                .entry(series_key(kind, name))
                .or_default()
                .push(name.to_string());
        }
        Self { groups }
    }

    pub fn candidates(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of distinct series keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_keys() {
        assert_eq!(series_key(HardwareKind::Cpu, "Intel Core i5-13600K"), "I5-13600K");
        assert_eq!(series_key(HardwareKind::Cpu, "intel core i5-13600kf"), "I5-13600KF");
        assert_eq!(series_key(HardwareKind::Cpu, "AMD Ryzen 7  7700X"), "RYZEN 7 7700X");
        assert_eq!(series_key(HardwareKind::Cpu, "Intel Core Ultra 9 285K"), "CORE ULTRA 9");
        assert_eq!(
            series_key(HardwareKind::Cpu, "AMD Ryzen Threadripper 7980X"),
            "THREADRIPPER 7980"
        );
    }

    #[test]
    fn test_gpu_keys() {
        assert_eq!(
            series_key(HardwareKind::Gpu, "NVIDIA GeForce RTX 4060 Ti"),
            "RTX 4060 TI"
        );
        assert_eq!(series_key(HardwareKind::Gpu, "gtx1660  super"), "GTX1660 SUPER");
        assert_eq!(series_key(HardwareKind::Gpu, "AMD Radeon RX 6600 XT"), "RX 6600 XT");
        assert_eq!(series_key(HardwareKind::Gpu, "Intel Arc A580"), "ARC A580");
    }

    #[test]
    fn test_fallback_key() {
        assert_eq!(
            series_key(HardwareKind::Cpu, "  Some  Unbranded cpu "),
            "SOME UNBRANDED CPU"
        );
        assert_eq!(series_key(HardwareKind::Gpu, ""), "");
    }

    #[test]
    fn test_namespaces_differ() {
        // GPU patterns do not apply to CPU strings and vice versa.
        assert_eq!(series_key(HardwareKind::Cpu, "RTX 4090"), "RTX 4090");
        assert_eq!(series_key(HardwareKind::Gpu, "i7-12700K"), "I7-12700K");
    }

    #[test]
    fn test_index_groups_in_catalog_order() {
        let catalog = Catalog::from_pairs([
            ("NVIDIA GeForce RTX 4060", 50.0),
            ("RTX 4060", 49.0),
            ("NVIDIA GeForce RTX 4060 Ti", 55.0),
        ]);
        let index = SimplifiedIndex::build(HardwareKind::Gpu, &catalog);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.candidates("RTX 4060").unwrap(),
            &["NVIDIA GeForce RTX 4060".to_string(), "RTX 4060".to_string()]
        );
        assert_eq!(index.candidates("RTX 4060 TI").unwrap().len(), 1);
        assert!(index.candidates("RTX 4070").is_none());
    }
}
