use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use chrono::{NaiveDateTime, TimeZone, Utc};
use csv::StringRecord;
use feed_fixture::catalog::archetype_for;
use feed_fixture::error::FixtureError;
use feed_fixture::generator::{generate, FixtureGenerator, RowCount};
use feed_fixture::product::{PriceRange, HEADERS, TIMESTAMP_FORMAT};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_generator() -> FixtureGenerator {
    FixtureGenerator::new(Utc.with_ymd_and_hms(2025, 3, 21, 14, 13, 50).unwrap())
}

fn read_records(path: &Path) -> (StringRecord, Vec<StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let records = reader.records().map(Result::unwrap).collect();
    (headers, records)
}

fn column(headers: &StringRecord, name: &str) -> usize {
    headers.iter().position(|h| h == name).unwrap()
}

#[test]
fn test_default_row_count_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("performance-test.csv");

    let written = make_generator()
        .generate(&path, RowCount::default(), &mut StdRng::seed_from_u64(2000))
        .unwrap();
    assert_eq!(written, 2000);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2001);

    let (headers, records) = read_records(&path);
    assert_eq!(headers.iter().collect::<Vec<_>>(), HEADERS.to_vec());
    assert_eq!(records.len(), 2000);
    assert!(records.iter().all(|r| r.len() == HEADERS.len()));
}

#[test]
fn test_zero_rows_is_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let written = make_generator()
        .generate(&path, RowCount::from(0), &mut StdRng::seed_from_u64(0))
        .unwrap();
    assert_eq!(written, 0);

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().collect::<Vec<_>>(), vec![HEADERS.join(",")]);
}

#[test]
fn test_single_row_uses_first_archetype() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.csv");

    make_generator()
        .generate(&path, RowCount::from(1), &mut StdRng::seed_from_u64(1))
        .unwrap();

    let (headers, records) = read_records(&path);
    assert_eq!(records.len(), 1);
    let row = &records[0];
    assert_eq!(&row[column(&headers, "TITLE")], "Vitamin D3 5000 IU - Variant 1");
    assert_eq!(&row[column(&headers, "HANDLE")], "vitamin-d3-5000-iu-1");
    assert_eq!(&row[column(&headers, "VENDOR")], "NatureWise");
}

#[test]
fn test_row_properties() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.csv");

    make_generator()
        .generate(&path, RowCount::from(300), &mut StdRng::seed_from_u64(300))
        .unwrap();

    let (headers, records) = read_records(&path);
    let created_col = column(&headers, "CREATED_AT");
    let updated_col = column(&headers, "UPDATED_AT");
    let published_col = column(&headers, "PUBLISHED_AT");
    let price_col = column(&headers, "PRICE_RANGE");
    let price_v2_col = column(&headers, "PRICE_RANGE_V2");
    let status_col = column(&headers, "STATUS");
    let inventory_col = column(&headers, "TOTAL_INVENTORY");
    let metafields_col = column(&headers, "METAFIELDS");

    for (index, row) in records.iter().enumerate() {
        let created = NaiveDateTime::parse_from_str(&row[created_col], TIMESTAMP_FORMAT).unwrap();
        let updated = NaiveDateTime::parse_from_str(&row[updated_col], TIMESTAMP_FORMAT).unwrap();
        assert!(updated >= created);
        assert_eq!(&row[created_col], &row[published_col]);

        assert_eq!(&row[price_col], &row[price_v2_col]);
        let range: PriceRange = serde_json::from_str(&row[price_col]).unwrap();
        assert!(range.min_variant_price.amount < range.max_variant_price.amount);

        assert!(["ACTIVE", "DRAFT", "ARCHIVED"].contains(&&row[status_col]));

        let inventory: i64 = row[inventory_col].parse().unwrap();
        assert!((0..=500).contains(&inventory));

        let metafields: serde_json::Value = serde_json::from_str(&row[metafields_col]).unwrap();
        assert_eq!(metafields.as_object().unwrap().len(), 5);
        assert_eq!(metafields["shipping_weight"]["namespace"], "shipping");

        let archetype = archetype_for(index);
        assert_eq!(
            &row[column(&headers, "TITLE")],
            format!("{} - Variant {}", archetype.title, index + 1)
        );
        assert!(row[column(&headers, "HANDLE")].ends_with(&format!("-{}", index + 1)));
        assert_eq!(&row[column(&headers, "PRODUCT_TYPE")], archetype.product_type);
    }
}

#[test]
fn test_runs_differ_but_share_shape() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("first.csv");
    let second_path = dir.path().join("second.csv");

    generate(&first_path, RowCount::from(50)).unwrap();
    generate(&second_path, RowCount::from(50)).unwrap();

    let (first_headers, first) = read_records(&first_path);
    let (second_headers, second) = read_records(&second_path);
    assert_eq!(first_headers, second_headers);
    assert_eq!(first.len(), second.len());

    let raw_id = column(&first_headers, "_AIRBYTE_RAW_ID");
    let title = column(&first_headers, "TITLE");
    assert!(first.iter().zip(&second).any(|(a, b)| a[raw_id] != b[raw_id]));
    assert!(first.iter().zip(&second).all(|(a, b)| a[title] == b[title]));
}

#[test]
fn test_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.csv");
    fs::write(&path, "stale contents\n").unwrap();

    make_generator()
        .generate(&path, RowCount::from(3), &mut StdRng::seed_from_u64(3))
        .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("stale"));
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("fixture.csv");

    let result = make_generator().generate(&path, RowCount::from(10), &mut StdRng::seed_from_u64(10));
    assert!(matches!(result, Err(FixtureError::IoError(_))));
    assert!(!path.exists());
}

#[test]
fn test_negative_row_count_is_rejected() {
    assert!(matches!(
        RowCount::try_from(-5_i64),
        Err(FixtureError::InvalidRowCount(-5))
    ));
}

#[cfg(unix)]
#[test]
fn test_new_fixture_is_world_readable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.csv");

    make_generator()
        .generate(&path, RowCount::from(2), &mut StdRng::seed_from_u64(2))
        .unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[cfg(unix)]
#[test]
fn test_replaced_fixture_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.csv");
    fs::write(&path, "stale contents\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    make_generator()
        .generate(&path, RowCount::from(2), &mut StdRng::seed_from_u64(2))
        .unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[test]
fn test_embedded_documents_are_spaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spaced.csv");

    make_generator()
        .generate(&path, RowCount::from(20), &mut StdRng::seed_from_u64(20))
        .unwrap();

    let (headers, records) = read_records(&path);
    let price_col = column(&headers, "PRICE_RANGE");
    let metafields_col = column(&headers, "METAFIELDS");
    for row in &records {
        assert!(row[price_col].starts_with(r#"{"max_variant_price": {"amount": ""#));
        assert!(row[metafields_col].contains(r#"}, "reviews_rating": {"namespace": "reviews""#));

        let metafields: serde_json::Value = serde_json::from_str(&row[metafields_col]).unwrap();
        let weight = metafields["shipping_weight"]["value"].as_str().unwrap();
        assert!(!weight.ends_with('0') || weight.ends_with(".0"));
    }
}
