//! End-to-end behaviour of the resolver over small catalogs.

use rigscore_match::{
    Catalog, HardwareKind, MatchTier, Resolution, Resolver, SharedResolver, MatchConfig,
};

fn cpu_catalog() -> Catalog {
    Catalog::from_pairs([
        ("Intel Core i9-14900K", 100.0),
        ("Intel Core i5-13600K", 80.0),
        ("Intel Core i5-13600KF", 79.0),
        ("Intel Core i7-12700K", 72.0),
        ("AMD Ryzen 5 5600X", 70.0),
        ("AMD Ryzen 5 5600", 65.0),
        ("AMD Ryzen 7 7800X3D", 95.0),
    ])
}

fn gpu_catalog() -> Catalog {
    Catalog::from_pairs([
        ("NVIDIA GeForce RTX 4090", 100.0),
        ("NVIDIA GeForce RTX 4060", 50.0),
        ("NVIDIA GeForce RTX 4060 Ti", 55.0),
        ("AMD Radeon RX 6600 XT", 42.0),
        ("Intel Arc A770", 45.0),
    ])
}

#[test]
fn scenario_case_insensitive_series_match() {
    let mut r = Resolver::new(
        Catalog::from_pairs([("Intel Core i5-13600K", 80.0)]),
        Catalog::default(),
    );
    let res = r.resolve_cpu("intel core i5-13600k");
    assert_eq!(
        res,
        Resolution::Matched {
            score: 80.0,
            name: "Intel Core i5-13600K".into(),
            tier: MatchTier::SimplifiedExact,
        }
    );
    assert_eq!(r.statistics().cpu.simplified_exact, 1);
}

#[test]
fn scenario_suffix_variants_resolve_independently() {
    let mut r = Resolver::new(
        Catalog::from_pairs([("AMD Ryzen 5 5600X", 70.0), ("AMD Ryzen 5 5600", 65.0)]),
        Catalog::default(),
    );
    let x = r.resolve_cpu("Ryzen 5 5600x oem");
    assert_eq!((x.score(), x.label()), (70.0, "AMD Ryzen 5 5600X"));
    assert_eq!(x.tier(), Some(MatchTier::SimplifiedExact));

    let plain = r.resolve_cpu("Ryzen 5 5600 oem");
    assert_eq!((plain.score(), plain.label()), (65.0, "AMD Ryzen 5 5600"));
    assert_eq!(plain.tier(), Some(MatchTier::SimplifiedExact));
}

#[test]
fn scenario_unbranded_falls_to_default() {
    let mut r = Resolver::new(cpu_catalog(), gpu_catalog());
    let res = r.resolve_cpu("Some Unbranded Weird CPU XYZ");
    assert_eq!(
        res,
        Resolution::DefaultMatched {
            score: 30.0,
            label: "Default: Some Unbranded Weird CPU XYZ".into(),
        }
    );
    assert_eq!(r.statistics().cpu.default, 1);
}

#[test]
fn scenario_empty_catalog_always_defaults() {
    let mut r = Resolver::new(Catalog::default(), Catalog::default());
    for q in ["Intel Core i5-13600K", "i9", "AMD Ryzen 5 5600X", "x"] {
        assert!(matches!(r.resolve_cpu(q), Resolution::DefaultMatched { .. }), "{q}");
    }
    for q in ["NVIDIA GeForce RTX 4090", "rtx 4090"] {
        let res = r.resolve_gpu(q);
        assert!(matches!(res, Resolution::DefaultMatched { .. }), "{q}");
        assert_eq!(res.score(), 88.0);
    }
    let stats = r.statistics();
    assert_eq!(stats.cpu.default, 4);
    assert_eq!(stats.cpu.exact + stats.cpu.simplified_exact + stats.cpu.fuzzy, 0);
}

#[test]
fn repeated_query_is_served_from_cache() {
    let mut r = Resolver::new(cpu_catalog(), gpu_catalog());
    let first = r.resolve_cpu("i7-12700k tray");
    let second = r.resolve_cpu("i7-12700k tray");
    assert_eq!(first, second);
    assert_eq!(r.statistics().cpu.cache_hit, 1);
    assert_eq!(r.statistics().cpu.total_rows, 1);

    // A fresh session reaches the same answer without the cache.
    let mut fresh = Resolver::new(cpu_catalog(), gpu_catalog());
    assert_eq!(fresh.resolve_cpu("i7-12700k tray"), first);
    assert_eq!(fresh.statistics().cpu.cache_hit, 0);
}

#[test]
fn canonical_names_always_hit_exact_tier() {
    let forward = cpu_catalog();
    let mut names: Vec<String> = forward.names().map(String::from).collect();
    names.reverse();
    let reversed = Catalog::from_pairs(
        names
            .iter()
            .map(|n| (n.as_str(), forward.get(n).unwrap_or_default())),
    );

    for catalog in [forward.clone(), reversed] {
        let mut r = Resolver::new(catalog.clone(), gpu_catalog());
        for entry in catalog.iter() {
            let res = r.resolve_cpu(&entry.model);
            assert_eq!(res.tier(), Some(MatchTier::Exact), "{}", entry.model);
            assert_eq!(res.score(), entry.score);
        }
    }

    let mut r = Resolver::new(cpu_catalog(), gpu_catalog());
    for entry in gpu_catalog().iter() {
        assert_eq!(r.resolve_gpu(&entry.model).tier(), Some(MatchTier::Exact));
    }
}

#[test]
fn every_input_gets_an_answer() {
    let long = "x".repeat(400);
    let inputs = [
        "",
        " ",
        "\t\n",
        "Unknown",
        "🙂🙂🙂",
        "ｉ５－１３６００Ｋ",
        "straße",
        "RTX",
        "i5-",
        "ryzen",
        long.as_str(),
    ];
    let mut r = Resolver::new(cpu_catalog(), gpu_catalog());
    for kind in [HardwareKind::Cpu, HardwareKind::Gpu] {
        for q in inputs {
            let res = r.resolve(kind, Some(q));
            assert!(res.score().is_finite());
            assert!(!res.label().is_empty());
        }
        assert_eq!(r.resolve(kind, None), Resolution::Unresolved);
    }
}

#[test]
fn gpu_suffix_variants() {
    let mut r = Resolver::new(cpu_catalog(), gpu_catalog());
    let ti = r.resolve_gpu("RTX 4060 Ti 8GB");
    assert_eq!(ti.label(), "NVIDIA GeForce RTX 4060 Ti");
    let base = r.resolve_gpu("geforce rtx4060");
    assert_ne!(base.label(), ti.label());
    let arc = r.resolve_gpu("ARC A770 16GB");
    assert_eq!(arc.label(), "Intel Arc A770");
}

#[test]
fn report_reflects_tiers() {
    let mut r = Resolver::new(cpu_catalog(), gpu_catalog());
    r.resolve_cpu("Intel Core i9-14900K");
    r.resolve_cpu("intel core i5-13600k");
    r.resolve_cpu("Unknown");
    r.resolve_cpu("Pentium G4560");

    let report = r.report();
    let row = |category: &str| {
        report
            .iter()
            .find(|row| row.kind == HardwareKind::Cpu && row.category == category)
            .cloned()
            .unwrap()
    };
    assert_eq!(row("exact").percentage, "25.00%");
    assert_eq!(row("simplified").percentage, "25.00%");
    assert_eq!(row("unknown").percentage, "25.00%");
    assert_eq!(row("default").percentage, "25.00%");
    assert!(report
        .iter()
        .filter(|row| row.kind == HardwareKind::Gpu)
        .all(|row| row.percentage == "0%"));
}

#[test]
fn bounded_cache_evicts_but_answers_stay_stable() {
    let config = MatchConfig {
        cache_capacity: Some(1),
        ..MatchConfig::default()
    };
    let shared = SharedResolver::new(cpu_catalog(), gpu_catalog(), &config);
    let a = shared.resolve_cpu("ryzen 7 7800x3d");
    shared.resolve_cpu("i9-14900k");
    assert_eq!(shared.cache_len(HardwareKind::Cpu), 1);
    assert_eq!(shared.resolve_cpu("ryzen 7 7800x3d"), a);
    assert_eq!(shared.statistics().cpu.cache_hit, 0);
}

#[test]
fn gpu_series_boost_spans_generations() {
    let catalog = || Catalog::from_pairs([("NVIDIA GeForce RTX 3060", 45.0)]);
    let query = "geforce rtx 4060 laptop gpu";

    // Same "rtx" token lifts the older card over the full-scan threshold.
    let mut r = Resolver::new(Catalog::default(), catalog());
    let res = r.resolve_gpu(query);
    assert_eq!(res.tier(), Some(MatchTier::Fuzzy));
    assert_eq!(res.label(), "NVIDIA GeForce RTX 3060");
    assert_eq!(res.score(), 45.0);

    let unboosted = MatchConfig {
        series_boost: 1.0,
        ..MatchConfig::default()
    };
    let mut r = Resolver::with_config(Catalog::default(), catalog(), &unboosted);
    assert!(matches!(r.resolve_gpu(query), Resolution::DefaultMatched { .. }));
}
