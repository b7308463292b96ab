//! Search tests — query the sample catalogue field by field.

use pretty_assertions::assert_eq;
use shelflib::{parse_catalogue_file, search, search_catalogue_json, BookRecord, SearchHit};
use std::path::PathBuf;

fn sample_records() -> Vec<BookRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_catalogue.json");
    parse_catalogue_file(path).expect("Failed to parse sample catalogue")
}

fn marks<'a>(hits: &[SearchHit<'a>]) -> Vec<&'a str> {
    hits.iter().map(|h| h.record.shelfmark.as_str()).collect()
}

#[test]
fn fields_combine_with_and() {
    let records = sample_records();
    let hits = search(&records, [("title", "HISTOIRE"), ("country", "France")]);
    assert_eq!(marks(&hits), ["Fag.F.1.3", "Fag.F.2.2"]);
}

#[test]
fn empty_field_does_not_constrain() {
    let records = sample_records();
    let with_blank = search(&records, [("title", ""), ("author", "Smith")]);
    let without = search(&records, [("author", "Smith")]);
    assert_eq!(with_blank, without);
    assert_eq!(marks(&without), ["Fag.F.2.1", "Fag.F.2.3"]);
}

#[test]
fn date_range_is_inclusive() {
    let records = sample_records();
    let hits = search(&records, [("daterangestart", "1713"), ("daterangeend", "1759")]);
    assert_eq!(marks(&hits), ["Fag.F.1.1", "Fag.F.1.3", "Fag.F.2.1"]);
}

#[test]
fn non_numeric_date_bound_is_skipped() {
    let records = sample_records();
    let hits = search(&records, [("daterangestart", "unknown")]);
    assert_eq!(hits.len(), records.len());
}

#[test]
fn undated_records_fall_outside_any_range() {
    let records = sample_records();
    let hits = search(&records, [("daterangeend", "1700")]);
    // Fag.F.2.3 is dated "c. 1624", which is not a number
    assert_eq!(marks(&hits), ["Fag.F.1.2"]);
}

#[test]
fn shelfmark_and_country_are_exact() {
    let records = sample_records();
    assert_eq!(marks(&search(&records, [("shelfmark", "Fag.F.2.1")])), ["Fag.F.2.1"]);
    assert!(search(&records, [("shelfmark", "fag.f.2.1")]).is_empty());
    assert!(search(&records, [("country", "france")]).is_empty());
}

#[test]
fn anyfield_searches_every_column() {
    let records = sample_records();
    assert_eq!(marks(&search(&records, [("anyfield", "amsterdam")])), ["Fag.F.1.2"]);
    assert_eq!(
        marks(&search(&records, [("anyfield", "VELLUM")])),
        ["Fag.F.1.2", "Fag.F.2.3"]
    );
    // dimensions count as fields too
    assert_eq!(marks(&search(&records, [("anyfield", "320")])), ["Fag.F.1.3"]);
}

#[test]
fn unknown_fields_are_ignored() {
    let records = sample_records();
    let hits = search(&records, [("publisher", "Millar"), ("author", "voltaire")]);
    assert_eq!(marks(&hits), ["Fag.F.1.1"]);
}

#[test]
fn hits_carry_display_ids_in_input_order() {
    let records = sample_records();
    let hits = search(&records, [("anyfield", "fre")]);
    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "search-result-Fag.F.1.1",
            "search-result-Fag.F.1.2",
            "search-result-Fag.F.1.3",
            "search-result-Fag.F.2.2",
        ]
    );
}

#[test]
fn search_json_round_trips_records() {
    let json = std::fs::read_to_string(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_catalogue.json"),
    )
    .unwrap();
    let out = search_catalogue_json(&json, [("country", "England")]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let hits = value.as_array().expect("array of hits");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["id"], "search-result-Fag.F.2.1");
    assert_eq!(hits[0]["record"]["Shelfmark"], "Fag.F.2.1");
    assert_eq!(hits[0]["record"]["Title"], "The theory of moral sentiments");
}
