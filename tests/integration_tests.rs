use polars::prelude::PolarsError;
use s3_country_counts::config::Config;
use s3_country_counts::fetch::{FetchError, FetchErrorKind, InMemoryStore};
use s3_country_counts::pipeline::{root_cause, run};

fn config(bucket: &str, key: &str) -> Config {
    Config::from_lookup(|name| match name {
        "S3_BUCKET" => Some(bucket.to_string()),
        "S3_KEY" => Some(key.to_string()),
        _ => None,
    })
}

#[tokio::test]
async fn test_full_pipeline() {
    let store = InMemoryStore::new().with_object("wasi-s3-dm", "data.csv", "Country\nUS\nUS\nFR\n");
    let config = Config::from_lookup(|_| None);

    let counts = run(&store, &config).await.expect("pipeline failed");
    let rendered = counts.to_string();

    assert!(rendered.starts_with("shape: (2, 2)"));
    let us = rendered
        .lines()
        .position(|l| l.contains("US") && l.contains("┆ 2 "))
        .expect("US row missing");
    let fr = rendered
        .lines()
        .position(|l| l.contains("FR") && l.contains("┆ 1 "))
        .expect("FR row missing");
    assert!(us < fr);
}

#[tokio::test]
async fn test_header_only_object_renders_empty_table() {
    let store = InMemoryStore::new().with_object("b", "k", "Country\n");

    let counts = run(&store, &config("b", "k")).await.expect("pipeline failed");

    assert_eq!(counts.height(), 0);
    assert!(counts.to_string().starts_with("shape: (0, 2)"));
}

#[tokio::test]
async fn test_pipeline_reads_configured_object() {
    let store = InMemoryStore::new()
        .with_object("wasi-s3-dm", "data.csv", "Country\nUS\n")
        .with_object("other", "people.csv", "Name,Country\na,DE\nb,DE\nc,IT\n");

    let counts = run(&store, &config("other", "people.csv")).await.unwrap();
    let rendered = counts.to_string();

    assert!(rendered.contains("DE"));
    assert!(rendered.contains("IT"));
    assert!(!rendered.contains("US"));
}

#[tokio::test]
async fn test_missing_object_fails_with_not_found() {
    let store = InMemoryStore::new();

    let err = run(&store, &config("bucket", "missing.csv")).await.unwrap_err();

    assert!(err.to_string().contains("s3://bucket/missing.csv"));
    let fetch = err.downcast_ref::<FetchError>().expect("not a fetch error");
    assert_eq!(fetch.kind(), FetchErrorKind::NotFound);
}

#[tokio::test]
async fn test_missing_country_column_fails_with_column_not_found() {
    let store = InMemoryStore::new().with_object("b", "k", "City\nParis\n");

    let err = run(&store, &config("b", "k")).await.unwrap_err();

    let polars_err = err.downcast_ref::<PolarsError>().expect("not a polars error");
    assert!(matches!(root_cause(polars_err), PolarsError::ColumnNotFound(_)));
}
