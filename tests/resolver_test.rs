// ==========================================
// 组织架构索引 + 解析器 + 充实引擎 集成测试
// ==========================================
// 测试目标: 匹配优先级、哨兵值、兜底与幂等
// ==========================================

mod test_helpers;

use bolsas_dashboard::engine::{enrich, resolve, Enricher, OrgResolver};
use bolsas_dashboard::{MatchKind, NOT_APPLICABLE, NOT_DETERMINED};
use test_helpers::{build_index, org_index, person};

#[test]
fn test_exact_match_precedence() {
    let index = org_index(&[("1.2", "A", "m1", "m2"), ("1.2.04", "B", "m1", "m2")]);

    let resolution = resolve(Some("1.2"), &index);

    assert_eq!(resolution.department, "A");
    assert_eq!(resolution.match_kind, MatchKind::Exact);
}

#[test]
fn test_longest_prefix_wins() {
    let index = org_index(&[("1", "A", "m1", "m2"), ("1.2", "B", "m1", "m2")]);

    let resolution = resolve(Some("1.2.04.007"), &index);

    assert_eq!(resolution.department, "B");
    assert_eq!(resolution.match_kind, MatchKind::Prefix);
    assert_eq!(resolution.matched_code.as_deref(), Some("1.2"));
}

#[test]
fn test_zero_normalization_fallback() {
    let index = org_index(&[("1.2.04", "C", "m1", "m2")]);

    let resolution = resolve(Some("01.2.04"), &index);

    assert_eq!(resolution.department, "C");
    assert_eq!(resolution.match_kind, MatchKind::NormalizedExact);

    let resolution = resolve(Some("01.2.04.9"), &index);
    assert_eq!(resolution.department, "C");
    assert_eq!(resolution.match_kind, MatchKind::NormalizedPrefix);
}

#[test]
fn test_invalid_codes_short_circuit() {
    let index = org_index(&[("N/A", "X", "m1", "m2"), ("1", "A", "m1", "m2")]);

    for code in ["", "N/A", "n/a", "SEM CODIGO LOCAL", "sem código local", "nan", "NONE", "N/D"] {
        let resolution = resolve(Some(code), &index);
        assert_eq!(
            resolution.as_tuple(),
            (NOT_DETERMINED, NOT_DETERMINED, NOT_DETERMINED),
            "code {:?} should short-circuit",
            code
        );
    }
    assert!(!resolve(None, &index).is_resolved());
}

#[test]
fn test_empty_index_unresolved() {
    let index = build_index(&[]);
    assert_eq!(resolve(Some("1.2"), &index).match_kind, MatchKind::Unresolved);
}

#[test]
fn test_resolution_is_deterministic_and_cached() {
    let index = org_index(&[("1", "A", "m1", "m2"), ("1.2", "B", "m1", "m2")]);
    let mut resolver = OrgResolver::new(&index);

    let first = resolver.resolve(Some("1.2.3"));
    let second = resolver.resolve(Some(" 1.2.3 "));

    assert_eq!(first, second);
    assert_eq!(first, resolve(Some("1.2.3"), &index));
    assert_eq!(resolver.cache_hits(), 1);
    assert_eq!(resolver.distinct_codes(), 1);
}

#[test]
fn test_build_positional_columns() {
    let index = build_index(&[
        &["1.2", "fallback", "", "Alice"],
        &["1.3", "ignored", " hr ", "Alice", "x", "y", "Bob"],
    ]);

    let short = index.get("1.2").expect("1.2 indexed");
    assert_eq!(short.department, "FALLBACK");
    assert_eq!(short.manager_tier2, NOT_APPLICABLE);

    let full = index.get("1.3").expect("1.3 indexed");
    assert_eq!(full.department, "HR");
    assert_eq!(full.manager_tier2, "Bob");
}

#[test]
fn test_trailing_dot_zero_preserved() {
    let index = org_index(&[("123.0", "A", "m1", "m2")]);
    assert!(index.get("123.0").is_some());
    assert!(index.get("123").is_none());
}

#[test]
fn test_end_to_end_scenario() {
    let index = build_index(&[&["1.2", "", "HR", "Alice", "", "", "Bob"]]);
    let roster = vec![person("1", Some("1.2.04"), None)];

    let enriched = enrich(&roster, &index);

    assert_eq!(enriched[0].department.as_deref(), Some("HR"));
    assert_eq!(enriched[0].manager_tier1.as_deref(), Some("Alice"));
    assert_eq!(enriched[0].manager_tier2.as_deref(), Some("Bob"));
    assert_eq!(enriched[0].resolved_department.as_deref(), Some("HR"));
}

#[test]
fn test_fallback_and_sentinel_normalization() {
    let index = org_index(&[("1", "A", "m1", "m2")]);
    let roster = vec![
        person("1", Some("9.9"), Some("FINANCE")),
        person("2", Some("9.9"), Some("nan")),
        person("3", Some("9.9"), Some(" rh ")),
    ];

    let enriched = enrich(&roster, &index);

    assert_eq!(enriched[0].department.as_deref(), Some("FINANCE"));
    assert_eq!(enriched[1].department.as_deref(), Some(NOT_DETERMINED));
    assert_eq!(enriched[2].department.as_deref(), Some("RH"));
    assert!(enriched
        .iter()
        .all(|r| r.manager_tier1.as_deref() == Some(NOT_DETERMINED)));
}

#[test]
fn test_enrich_idempotent_and_pure() {
    let index = org_index(&[
        ("1", "AGRICOLA", "Ana", "Bruno"),
        ("1.2", "INDUSTRIAL", "Carla", "Davi"),
    ]);
    let roster = vec![
        person("1", Some("1.2.5"), Some("N/A")),
        person("2", Some("02.7"), None),
        person("3", Some("SEM CODIGO LOCAL"), Some("Legal")),
        person("4", None, None),
    ];
    let original = roster.clone();

    let once = enrich(&roster, &index);
    let twice = enrich(&once, &index);

    assert_eq!(roster, original);
    assert_eq!(once, twice);
    assert_eq!(once.len(), roster.len());
    let matriculas: Vec<_> = once.iter().map(|r| r.matricula.clone()).collect();
    let expected: Vec<_> = roster.iter().map(|r| r.matricula.clone()).collect();
    assert_eq!(matriculas, expected);
}

#[test]
fn test_summary_counts() {
    let index = org_index(&[("1.2", "HR", "m1", "m2")]);
    let roster = vec![
        person("1", Some("1.2"), None),
        person("2", Some("1.2.1"), None),
        person("3", Some("01.2"), None),
        person("4", Some("01.2.9"), None),
        person("5", Some("7"), Some("LEGAL")),
        person("6", Some("7"), None),
    ];

    let outcome = Enricher::new(0.5).enrich(&roster, &index);
    let summary = &outcome.summary;

    assert_eq!(summary.exact, 1);
    assert_eq!(summary.prefix, 1);
    assert_eq!(summary.normalized_exact, 1);
    assert_eq!(summary.normalized_prefix, 1);
    assert_eq!(summary.fallback_existing, 1);
    assert_eq!(summary.not_determined, 1);
    assert!(!summary.quality_warning);
    assert_eq!(
        outcome.match_kinds,
        vec![
            MatchKind::Exact,
            MatchKind::Prefix,
            MatchKind::NormalizedExact,
            MatchKind::NormalizedPrefix,
            MatchKind::Unresolved,
            MatchKind::Unresolved,
        ]
    );
}
