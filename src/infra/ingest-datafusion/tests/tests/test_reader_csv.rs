// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use datafusion::arrow::array::{Array, AsArray, Float64Array};
use datafusion::arrow::datatypes::{DataType, Schema};
use datafusion::prelude::*;
use indoc::indoc;
use lakeboot_core::*;
use lakeboot_ingest_datafusion::*;
use pretty_assertions::assert_eq;
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn write_source(path: &Path, content: &str) -> Url {
    std::fs::write(path, content).unwrap();
    Url::from_file_path(path).unwrap()
}

fn csv_step() -> ReadStepCsv {
    ReadStepCsv {
        header: Some(true),
        null_value: Some("NA".to_string()),
        ..Default::default()
    }
}

fn field_types(schema: &Schema) -> Vec<(String, DataType)> {
    schema
        .fields()
        .iter()
        .map(|f| (f.name().clone(), f.data_type().clone()))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_read_csv_infer_schema() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = SessionContext::new();

    let url = write_source(
        &temp_dir.path().join("hollow_processed.csv"),
        indoc!(
            "
            id,title,rating
            1,hollow-one,4.5
            2,hollow-two,3.0
            3,hollow-three,5.0
            "
        ),
    );

    let reader = ReaderCsv {};
    let df = reader
        .read(&ctx, &url, &ReadStep::Csv(csv_step()))
        .await
        .unwrap();

    let schema: Schema = df.schema().into();
    assert_eq!(
        field_types(&schema),
        vec![
            ("id".to_string(), DataType::Int64),
            ("title".to_string(), DataType::Utf8),
            ("rating".to_string(), DataType::Float64),
        ]
    );

    let batches = df.collect().await.unwrap();
    let num_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(num_rows, 3);
}

#[test_log::test(tokio::test)]
async fn test_read_csv_null_token_maps_to_null() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = SessionContext::new();

    let url = write_source(
        &temp_dir.path().join("hollow_processed.csv"),
        indoc!(
            "
            id,rating
            1,NA
            2,4.5
            "
        ),
    );

    let reader = ReaderCsv {};
    let df = reader
        .read(&ctx, &url, &ReadStep::Csv(csv_step()))
        .await
        .unwrap();

    let df = df.sort(vec![col("id").sort(true, false)]).unwrap();
    let batches = df.collect().await.unwrap();
    assert_eq!(batches.len(), 1);

    let rating: &Float64Array = batches[0].column(1).as_primitive();
    assert!(rating.is_null(0));
    assert_eq!(rating.value(1), 4.5);
}

#[test_log::test(tokio::test)]
async fn test_read_csv_declared_schema_skips_inference() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = SessionContext::new();

    let url = write_source(
        &temp_dir.path().join("hollow_processed.csv"),
        indoc!(
            "
            id,title,rating
            1,hollow-one,4.5
            "
        ),
    );

    let step = ReadStepCsv {
        schema: Some(vec![
            "id BIGINT".to_string(),
            "title STRING".to_string(),
            "rating STRING".to_string(),
        ]),
        ..csv_step()
    };

    let reader = ReaderCsv {};
    let df = reader.read(&ctx, &url, &ReadStep::Csv(step)).await.unwrap();

    // Declared types win over what inference would have produced
    let schema: Schema = df.schema().into();
    assert_eq!(
        field_types(&schema),
        vec![
            ("id".to_string(), DataType::Int64),
            ("title".to_string(), DataType::Utf8),
            ("rating".to_string(), DataType::Utf8),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_read_csv_custom_separator() {
    let temp_dir = tempfile::tempdir().unwrap();
    let ctx = SessionContext::new();

    let url = write_source(
        &temp_dir.path().join("hollow_processed.csv"),
        indoc!(
            "
            id|title
            1|hollow-one
            "
        ),
    );

    let step = ReadStepCsv {
        separator: Some("|".to_string()),
        ..csv_step()
    };

    let reader = ReaderCsv {};
    let df = reader.read(&ctx, &url, &ReadStep::Csv(step)).await.unwrap();

    let schema: Schema = df.schema().into();
    assert_eq!(
        schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect::<Vec<_>>(),
        ["id", "title"]
    );
}
