//! Integration tests for filter parameters and chain folding.

use chrono::NaiveDate;
use jobs_filter::{
    ChainLink, Choice, Combinator, FilterParams, Predicate, RestrictedMode, TextField,
    apply_filters, evaluate, mask,
};
use jobs_model::{JobRecord, JobTable};
use jobs_transform::CpiTable;
use proptest::prelude::*;

fn posting(
    id: &str,
    title: &str,
    organization: &str,
    salary: (f64, f64),
    closing: (i32, u32, u32),
) -> JobRecord {
    JobRecord {
        job_id: id.into(),
        job_title: title.into(),
        organization: organization.into(),
        location: "Toronto".into(),
        salary_min: Some(salary.0),
        salary_max: Some(salary.1),
        closing_date: NaiveDate::from_ymd_opt(closing.0, closing.1, closing.2),
        ..JobRecord::default()
    }
}

fn table() -> JobTable {
    JobTable::new(vec![
        posting(
            "1",
            "Policy Analyst",
            "Health",
            (80_000.0, 100_000.0),
            (2024, 6, 14),
        ),
        posting(
            "2",
            "Data Analyst (TDA)",
            "Finance",
            (60_000.0, 70_000.0),
            (2024, 7, 1),
        ),
        posting("3", "Clerk", "Health", (40_000.0, 45_000.0), (2020, 3, 2)),
        JobRecord {
            job_id: "4".into(),
            job_title: "Engineer".into(),
            organization: "Transportation".into(),
            ..JobRecord::default()
        },
    ])
}

fn ids(table: &JobTable) -> Vec<&str> {
    table.job_ids()
}

// ============================================================================
// apply_filters
// ============================================================================

#[test]
fn default_params_keep_everything() {
    let filtered = apply_filters(
        &table(),
        &FilterParams::default(),
        &CpiTable::default(),
        2024,
    );
    assert_eq!(filtered, table());
}

#[test]
fn salary_band_requires_posting_inside_band() {
    let params = FilterParams {
        salary_low: Some(60_000.0),
        salary_high: Some(100_000.0),
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &params, &CpiTable::default(), 2024);
    assert_eq!(ids(&filtered), vec!["1", "2"]);

    let narrow = FilterParams {
        salary_low: Some(60_000.0),
        salary_high: Some(90_000.0),
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &narrow, &CpiTable::default(), 2024);
    assert_eq!(ids(&filtered), vec!["2"]);
}

#[test]
fn organization_choice_and_multi_select() {
    let params = FilterParams {
        organization: Choice::Value("Health".into()),
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &params, &CpiTable::default(), 2024);
    assert_eq!(ids(&filtered), vec!["1", "3"]);

    let params = FilterParams {
        organizations: vec!["Finance".into(), "Transportation".into()],
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &params, &CpiTable::default(), 2024);
    assert_eq!(ids(&filtered), vec!["2", "4"]);
}

#[test]
fn closing_window_drops_undated() {
    let params = FilterParams {
        closing_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &params, &CpiTable::default(), 2024);
    assert_eq!(ids(&filtered), vec!["1", "2"]);
}

#[test]
fn restricted_modes() {
    let cpi = CpiTable::default();
    let with = |mode| FilterParams {
        restricted: mode,
        ..FilterParams::default()
    };
    assert_eq!(
        apply_filters(&table(), &with(RestrictedMode::Include), &cpi, 2024).len(),
        4
    );
    assert_eq!(
        ids(&apply_filters(&table(), &with(RestrictedMode::Only), &cpi, 2024)),
        vec!["2"]
    );
    assert_eq!(
        ids(&apply_filters(&table(), &with(RestrictedMode::Exclude), &cpi, 2024)),
        vec!["1", "3", "4"]
    );
}

#[test]
fn fixed_selections_and_chain_are_anded() {
    let params = FilterParams {
        organization: Choice::Value("Health".into()),
        chain: vec![
            "and:title:analyst".parse().unwrap(),
            "or:title:engineer".parse().unwrap(),
        ],
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &params, &CpiTable::default(), 2024);
    assert_eq!(ids(&filtered), vec!["1"]);
}

#[test]
fn inflation_toggle_adjusts_after_filtering() {
    let cpi = CpiTable::from_entries([(2020, 100.0), (2024, 125.0)]);
    let params = FilterParams {
        title: Some("clerk".into()),
        adjust_for_inflation: true,
        ..FilterParams::default()
    };
    let filtered = apply_filters(&table(), &params, &cpi, 2024);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.records()[0].salary_min, Some(50_000.0));
    assert_eq!(filtered.records()[0].salary_max, Some(56_250.0));

    let nominal = FilterParams {
        adjust_for_inflation: false,
        ..params
    };
    let filtered = apply_filters(&table(), &nominal, &cpi, 2024);
    assert_eq!(filtered.records()[0].salary_min, Some(40_000.0));
}

#[test]
fn params_deserialize_with_defaults() {
    let json = r#"{
        "salary_low": 50000.0,
        "organization": {"Value": "Health"},
        "restricted": "exclude",
        "chain": [
            {"combinator": "or", "predicate": {"Contains": {"field": "title", "needle": "clerk"}}}
        ]
    }"#;
    let params: FilterParams = serde_json::from_str(json).unwrap();
    assert_eq!(params.salary_low, Some(50_000.0));
    assert_eq!(params.organization, Choice::Value("Health".into()));
    assert_eq!(params.restricted, RestrictedMode::Exclude);
    assert_eq!(params.restricted_marker, "TDA");
    assert_eq!(
        params.chain,
        vec![ChainLink::new(
            Combinator::Or,
            Predicate::contains(TextField::Title, "clerk")
        )]
    );
}

// ============================================================================
// Chain folding properties
// ============================================================================

fn needle() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("analyst"),
        Just("clerk"),
        Just("engineer"),
        Just("policy"),
        Just("data"),
    ]
}

proptest! {
    #[test]
    fn and_chain_is_conjunction(needles in prop::collection::vec(needle(), 1..5)) {
        let chain: Vec<ChainLink> = needles
            .iter()
            .map(|n| ChainLink::new(Combinator::And, Predicate::contains(TextField::Title, *n)))
            .collect();
        let expected: Vec<bool> = table()
            .iter()
            .map(|r| chain.iter().all(|link| link.predicate.matches(r)))
            .collect();
        prop_assert_eq!(mask(&table(), &chain), expected);
    }

    #[test]
    fn or_chain_is_disjunction(needles in prop::collection::vec(needle(), 1..5)) {
        let chain: Vec<ChainLink> = needles
            .iter()
            .map(|n| ChainLink::new(Combinator::Or, Predicate::contains(TextField::Title, *n)))
            .collect();
        let expected: Vec<bool> = table()
            .iter()
            .map(|r| chain.iter().any(|link| link.predicate.matches(r)))
            .collect();
        prop_assert_eq!(mask(&table(), &chain), expected);
    }

    #[test]
    fn evaluate_preserves_order(needles in prop::collection::vec(needle(), 0..4)) {
        let chain: Vec<ChainLink> = needles
            .iter()
            .map(|n| ChainLink::new(Combinator::Or, Predicate::contains(TextField::Title, *n)))
            .collect();
        let selected = evaluate(&table(), &chain);
        let all = table();
        let positions: Vec<usize> = selected
            .iter()
            .filter_map(|r| all.iter().position(|x| x.job_id == r.job_id))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
