use apriors::{encode_str_rows, run, run_context, Metric, MiningConfig, MiningError};

fn grocery() -> Vec<Vec<Option<&'static str>>> {
    vec![
        vec![Some("bread"), Some("milk")],
        vec![Some("bread"), Some("eggs")],
        vec![Some("bread"), Some("milk"), Some("eggs")],
        vec![Some("milk"), Some("eggs")],
    ]
}

#[test]
fn grocery_end_to_end() {
    let config = MiningConfig::new(0.5, Metric::Confidence, 0.6);
    let result = run(grocery(), &config).unwrap();

    assert_eq!(
        result.labeled_itemsets(),
        vec![
            (vec![&"bread"], 0.75),
            (vec![&"eggs"], 0.75),
            (vec![&"milk"], 0.75),
            (vec![&"bread", &"eggs"], 0.5),
            (vec![&"bread", &"milk"], 0.5),
            (vec![&"eggs", &"milk"], 0.5),
        ]
    );

    let rules = result.labeled_rules();
    assert_eq!(rules.len(), 6);
    let (_, _, confidence) = rules
        .iter()
        .find(|(a, c, _)| a == &vec![&"bread"] && c == &vec![&"milk"])
        .unwrap();
    assert!((confidence - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn grocery_csv_exports() {
    let config = MiningConfig::new(0.5, Metric::Lift, 0.5);
    let result = run(grocery(), &config).unwrap();

    let mut itemsets = Vec::new();
    result.write_itemsets_csv(&mut itemsets).unwrap();
    let itemsets = String::from_utf8(itemsets).unwrap();
    assert!(itemsets.starts_with("support,itemsets\n0.75,bread\n"));
    assert!(itemsets.contains("0.5,\"bread, milk\"\n"));

    let mut selected = Vec::new();
    result.write_selected_csv(&mut selected).unwrap();
    let selected = String::from_utf8(selected).unwrap();
    assert!(selected.starts_with("antecedents,consequents,lift\nbread,eggs,0.88888"));

    let mut full = Vec::new();
    result.write_rules_csv(&mut full).unwrap();
    let full = String::from_utf8(full).unwrap();
    assert_eq!(full.lines().count(), 7);
    assert!(full
        .lines()
        .skip(1)
        .all(|line| line.split(',').count() == 14));
}

#[test]
fn empty_transactions_are_not_an_error() {
    let config = MiningConfig::default();
    let result = run(Vec::<Vec<Option<String>>>::new(), &config).unwrap();

    assert!(result.itemsets().is_empty());
    assert!(result.rules().is_empty());
    assert!(result.labeled_rules().is_empty());
}

#[test]
fn invalid_min_support_aborts() {
    let config = MiningConfig::new(1.5, Metric::Confidence, 0.5);
    let err = run(grocery(), &config).unwrap_err();

    assert!(matches!(
        err,
        MiningError::InvalidParameter {
            name: "min_support",
            ..
        }
    ));
    assert!(err.to_string().contains("min_support"));
}

#[test]
fn no_rules_matched_is_empty() {
    let config = MiningConfig::new(0.5, Metric::Confidence, 0.9);
    let result = run(grocery(), &config).unwrap();

    assert_eq!(result.itemsets().len(), 6);
    assert!(result.rules().is_empty());
    assert_eq!(result.rules().num_candidates(), 6);
}

#[test]
fn textual_rows_from_toml_config() {
    let config = MiningConfig::from_toml_str(
        r#"
        min_support = 0.5
        metric = "kulczynski"
        min_threshold = 0.6
        max_len = 2
        "#,
    )
    .unwrap();
    let context = encode_str_rows(vec![
        vec!["bread", "milk", ""],
        vec!["bread", "eggs", ""],
        vec!["bread", "milk", "eggs"],
        vec!["milk", "eggs", " "],
    ]);

    let result = run_context(context, &config).unwrap();

    assert_eq!(result.context().vocabulary().len(), 3);
    assert_eq!(result.itemsets().max_len(), 2);
    assert_eq!(result.rules().len(), 6);
    assert_eq!(result.rules().metric(), Metric::Kulczynski);
}

#[test]
fn repeated_runs_are_identical() {
    let config = MiningConfig::new(0.25, Metric::Support, 0.25);
    let first = run(grocery(), &config).unwrap();
    let second = run(grocery(), &config).unwrap();

    assert_eq!(first.labeled_itemsets(), second.labeled_itemsets());
    assert_eq!(first.labeled_rules(), second.labeled_rules());
}
