// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;
use std::sync::Arc;

use datafusion::prelude::*;
use indoc::indoc;
use lakeboot_core::{ExportFormat, ExportService};
use lakeboot_ingest_datafusion::ExportServiceImpl;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn sample_df(ctx: &SessionContext, titles: &[&str]) -> DataFrame {
    use datafusion::arrow::array;
    use datafusion::arrow::datatypes::{DataType, Field, Schema};
    use datafusion::arrow::record_batch::RecordBatch;

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("title", DataType::Utf8, false),
    ]));

    let ids: Vec<i64> = (1..=titles.len() as i64).collect();
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(array::Int64Array::from(ids)),
            Arc::new(array::StringArray::from(titles.to_vec())),
        ],
    )
    .unwrap();

    ctx.read_batch(batch).unwrap()
}

fn dir_entries(path: &Path) -> Vec<String> {
    let mut entries: Vec<_> = std::fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    entries.sort();
    entries
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_export_csv_single_file_with_header() {
    let temp_dir = tempfile::tempdir().unwrap();
    let export_dir = temp_dir.path().join("raw").join("hollow-processed");
    let ctx = SessionContext::new();
    let export_service = ExportServiceImpl::new();

    let written = export_service
        .export_to_fs(
            sample_df(&ctx, &["alpha", "beta"]),
            &export_dir,
            ExportFormat::Csv,
        )
        .await
        .unwrap();

    assert_eq!(written, 2);
    assert_eq!(dir_entries(&export_dir), ["part-0.csv"]);

    let content = std::fs::read_to_string(export_dir.join("part-0.csv")).unwrap();
    assert_eq!(
        content,
        indoc!(
            "
            id,title
            1,alpha
            2,beta
            "
        )
    );
}

#[test_log::test(tokio::test)]
async fn test_export_overwrites_previous_content() {
    let temp_dir = tempfile::tempdir().unwrap();
    let export_dir = temp_dir.path().join("hollow-processed");
    let ctx = SessionContext::new();
    let export_service = ExportServiceImpl::new();

    export_service
        .export_to_fs(
            sample_df(&ctx, &["alpha", "beta", "gamma"]),
            &export_dir,
            ExportFormat::Csv,
        )
        .await
        .unwrap();

    // A stray file from a previous run must not survive the refresh
    std::fs::write(export_dir.join("leftover.csv"), "junk").unwrap();

    let written = export_service
        .export_to_fs(sample_df(&ctx, &["delta"]), &export_dir, ExportFormat::Csv)
        .await
        .unwrap();

    assert_eq!(written, 1);
    assert_eq!(dir_entries(&export_dir), ["part-0.csv"]);

    let content = std::fs::read_to_string(export_dir.join("part-0.csv")).unwrap();
    assert_eq!(
        content,
        indoc!(
            "
            id,title
            1,delta
            "
        )
    );
}

#[test_log::test(tokio::test)]
async fn test_export_parquet_round_trips() {
    let temp_dir = tempfile::tempdir().unwrap();
    let export_dir = temp_dir.path().join("hollow-processed");
    let ctx = SessionContext::new();
    let export_service = ExportServiceImpl::new();

    let written = export_service
        .export_to_fs(
            sample_df(&ctx, &["alpha", "beta"]),
            &export_dir,
            ExportFormat::Parquet,
        )
        .await
        .unwrap();

    assert_eq!(written, 2);
    assert_eq!(dir_entries(&export_dir), ["part-0.parquet"]);

    let df = ctx
        .read_parquet(
            export_dir.join("part-0.parquet").to_str().unwrap(),
            ParquetReadOptions::default(),
        )
        .await
        .unwrap();
    let batches = df.collect().await.unwrap();
    let num_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(num_rows, 2);
}
