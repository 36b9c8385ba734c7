use csv_sql_import::infer::{
    column_specs, detect_date_columns, infer_sql_type, native_column_type, parse_datetime,
};
use csv_sql_import::types::{ColumnType, DataSet, SqlType, Value};

fn dataset_of(column: &str, values: &[&str]) -> DataSet {
    let rows = values
        .iter()
        .map(|v| {
            vec![if v.is_empty() {
                Value::Null
            } else {
                Value::Utf8((*v).to_string())
            }]
        })
        .collect();
    DataSet::new(vec![column.to_string()], rows)
}

#[test]
fn native_types_follow_priority_order() {
    let ints = dataset_of("n", &["1", "-2", "30"]);
    assert_eq!(native_column_type(&ints, 0), ColumnType::Int64);

    let floats = dataset_of("n", &["1.5", "2", "-0.25"]);
    assert_eq!(native_column_type(&floats, 0), ColumnType::Float64);

    let bools = dataset_of("n", &["true", "False", "yes"]);
    assert_eq!(native_column_type(&bools, 0), ColumnType::Bool);

    let stamps = dataset_of("n", &["2017-10-02 10:56:33", "2017-10-03"]);
    assert_eq!(native_column_type(&stamps, 0), ColumnType::Timestamp);

    let mixed = dataset_of("n", &["1", "abc"]);
    assert_eq!(native_column_type(&mixed, 0), ColumnType::Utf8);
}

#[test]
fn all_missing_column_defaults_to_text_255() {
    let ds = dataset_of("notes", &["", "", ""]);
    assert_eq!(native_column_type(&ds, 0), ColumnType::Utf8);
    assert_eq!(infer_sql_type(&ds, 0), SqlType::Text(255));
}

#[test]
fn purchase_timestamp_column_is_datetime() {
    let ds = dataset_of(
        "order_purchase_timestamp",
        &["2017-10-02 10:56:33", "2017-10-02 11:07:15", "2017-10-03 09:00:00"],
    );

    let date_columns = detect_date_columns(&ds);
    assert!(date_columns.contains("order_purchase_timestamp"));

    let specs = column_specs(&ds, &date_columns);
    assert_eq!(specs[0].sql_type, SqlType::DateTime);
}

#[test]
fn name_flag_overrides_value_based_inference() {
    // Value probing gives up after the junk entries, but the name flag wins.
    let values = ["2017-10-02", "n/a", "n/a", "pending", "n/a", "n/a", "n/a"];
    let flagged = dataset_of("approval_date", &values);
    let unflagged = dataset_of("status", &values);

    let date_columns = detect_date_columns(&flagged);
    assert!(date_columns.contains("approval_date"));
    assert_eq!(
        column_specs(&flagged, &date_columns)[0].sql_type,
        SqlType::DateTime
    );

    let none = detect_date_columns(&unflagged);
    assert!(none.is_empty());
    assert!(matches!(
        column_specs(&unflagged, &none)[0].sql_type,
        SqlType::Text(_)
    ));
}

#[test]
fn date_named_column_without_date_values_is_not_flagged() {
    let ds = dataset_of("update_time", &["soon", "later", "never"]);
    assert!(detect_date_columns(&ds).is_empty());

    let empty = dataset_of("created_at", &["", "", ""]);
    assert!(detect_date_columns(&empty).is_empty());
}

#[test]
fn text_probe_classifies_leading_dates_as_datetime() {
    // First value plus the next five all parse: DATETIME even though the
    // seventh value would not.
    let ds = dataset_of(
        "delivery",
        &[
            "2017-10-02",
            "2017-10-03",
            "2017-10-04",
            "2017-10-05",
            "2017-10-06",
            "2017-10-07",
            "not a date",
        ],
    );
    assert_eq!(infer_sql_type(&ds, 0), SqlType::DateTime);
}

#[test]
fn text_sizing_uses_margin_and_cap() {
    let ds = dataset_of("c", &["abc", &"x".repeat(100), "hello"]);
    assert_eq!(infer_sql_type(&ds, 0), SqlType::Text(150));

    let near_cap = dataset_of("c", &[&"x".repeat(3000)]);
    assert_eq!(infer_sql_type(&near_cap, 0), SqlType::Text(4000));
}

#[test]
fn max_length_at_4000_is_unbounded_text() {
    let lengths = [3usize, 10, 4000, 50];
    let values: Vec<String> = lengths.iter().map(|n| "x".repeat(*n)).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    let ds = dataset_of("c", &refs);
    assert_eq!(infer_sql_type(&ds, 0), SqlType::TextMax);
}

#[test]
fn inference_is_deterministic_across_row_order() {
    let forward = dataset_of("v", &["10", "250", "3"]);
    let mut reversed = forward.clone();
    reversed.rows.reverse();
    assert_eq!(infer_sql_type(&forward, 0), infer_sql_type(&reversed, 0));

    let text_fwd = dataset_of("v", &["ab", "abcd", "a"]);
    let mut text_rev = text_fwd.clone();
    text_rev.rows.reverse();
    assert_eq!(infer_sql_type(&text_fwd, 0), infer_sql_type(&text_rev, 0));
}

#[test]
fn datetime_probe_accepts_common_formats() {
    for raw in [
        "2017-10-02 10:56:33",
        "2017-10-02T10:56:33",
        "2017-10-02 10:56:33.250",
        "2017/10/02 10:56:33",
        "2017-10-02",
        "02/10/2017",
    ] {
        assert!(parse_datetime(raw).is_some(), "should parse: {raw}");
    }

    for raw in ["", "  ", "hello", "2017-13-40", "123456"] {
        assert!(parse_datetime(raw).is_none(), "should not parse: {raw}");
    }
}

#[test]
fn sanitized_names_flow_into_specs() {
    let ds = DataSet::new(
        vec!["order id".to_string(), "ship-date".to_string()],
        vec![vec![
            Value::Utf8("1".to_string()),
            Value::Utf8("2017-10-02".to_string()),
        ]],
    );
    let date_columns = detect_date_columns(&ds);
    assert!(date_columns.contains("ship_date"));

    let specs = column_specs(&ds, &date_columns);
    assert_eq!(specs[0].name, "order_id");
    assert_eq!(specs[0].sql_type, SqlType::BigInt);
    assert_eq!(specs[1].name, "ship_date");
    assert_eq!(specs[1].sql_type, SqlType::DateTime);
}
