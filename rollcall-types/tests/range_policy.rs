use rollcall_types::{Bucketing, RollcallError, Selection, TimeRange};

#[test]
fn policy_table_matches_dashboard_constants() {
    let monthly = TimeRange::Monthly.config();
    assert_eq!(monthly.multiplier, 1);
    assert_eq!(monthly.label, "Mensual");
    assert_eq!(monthly.bucketing, Bucketing::DailyInMonth);

    let quarterly = TimeRange::Quarterly.config();
    assert_eq!(quarterly.multiplier, 3);
    assert_eq!(quarterly.label, "Trimestral");
    assert_eq!(quarterly.bucketing, Bucketing::TrailingMonths(3));

    // Annual projects 10 months, not 12.
    let annual = TimeRange::Annual.config();
    assert_eq!(annual.multiplier, 10);
    assert_eq!(annual.label, "Anual");
    assert_eq!(annual.bucketing, Bucketing::AllMonths);
}

#[test]
fn every_range_has_a_distinct_code_and_multiplier() {
    let codes: Vec<&str> = TimeRange::ALL.iter().map(|r| r.code()).collect();
    assert_eq!(codes, ["1M", "3M", "1Y"]);

    let mut multipliers: Vec<u32> = TimeRange::ALL.iter().map(|r| r.multiplier()).collect();
    multipliers.dedup();
    assert_eq!(multipliers.len(), TimeRange::ALL.len());
}

#[test]
fn wire_codes_parse_and_serialize() {
    for range in TimeRange::ALL {
        let parsed: TimeRange = range.code().parse().expect("parse code");
        assert_eq!(parsed, range);
        assert_eq!(range.to_string(), range.code());

        let json = serde_json::to_string(&range).expect("serialize range");
        assert_eq!(json, format!("\"{}\"", range.code()));
        let de: TimeRange = serde_json::from_str(&json).expect("deserialize range");
        assert_eq!(de, range);
    }
}

#[test]
fn unknown_code_is_invalid_arg() {
    let err = "6M".parse::<TimeRange>().unwrap_err();
    assert!(matches!(err, RollcallError::InvalidArg(_)));
}

#[test]
fn selection_defaults_to_monthly_without_month() {
    let sel = Selection::default();
    assert_eq!(sel.range, TimeRange::Monthly);
    assert_eq!(sel.month, None);

    let pinned = Selection::monthly("marzo_2024");
    assert_eq!(pinned.month.as_deref(), Some("marzo_2024"));

    let q: Selection = TimeRange::Quarterly.into();
    assert_eq!(q.range, TimeRange::Quarterly);
    assert_eq!(q.with_month("x").month.as_deref(), Some("x"));
}

#[test]
fn selection_roundtrip() {
    let sel = Selection::monthly("abril_2024");
    let json = serde_json::to_string(&sel).expect("serialize selection");
    let de: Selection = serde_json::from_str(&json).expect("deserialize selection");
    assert_eq!(de, sel);
}
