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

use indoc::indoc;
use lakeboot_core::*;
use lakeboot_ingest_datafusion::*;
use lakeboot_metastore_lfs::MetastoreLfs;
use pretty_assertions::assert_eq;
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct BootstrapHarness {
    _temp_dir: tempfile::TempDir,
    plan: BootstrapPlan,
    warehouse_dir: std::path::PathBuf,
    service: IngestBootstrapServiceImpl,
}

impl BootstrapHarness {
    fn new(source_content: &str) -> Self {
        let temp_dir = tempfile::tempdir().unwrap();

        let source_dir = temp_dir
            .path()
            .join("datalake")
            .join("data")
            .join("content_metadata");
        std::fs::create_dir_all(&source_dir).unwrap();

        let source_path = source_dir.join("hollow_processed.csv");
        std::fs::write(&source_path, source_content).unwrap();

        let warehouse_dir = temp_dir.path().join("warehouse");
        let export_dir = temp_dir.path().join("raw").join("hollow-processed");

        let plan = BootstrapPlan {
            source_url: Url::from_file_path(&source_path).unwrap(),
            read: ReadStepCsv {
                header: Some(true),
                null_value: Some("NA".to_string()),
                ..Default::default()
            },
            table_name: "default.hollow_processed".parse().unwrap(),
            export_path: export_dir,
            export_format: ExportFormat::Csv,
        };

        let storage_root = Url::from_directory_path(temp_dir.path()).unwrap();
        let service = IngestBootstrapServiceImpl::new(
            Arc::new(SessionFactory::new(storage_root)),
            Arc::new(ExportServiceImpl::new()),
            Arc::new(MetastoreLfs::new(&warehouse_dir)),
        );

        Self {
            _temp_dir: temp_dir,
            plan,
            warehouse_dir,
            service,
        }
    }

    async fn bootstrap(&self) -> BootstrapResult {
        self.service.bootstrap(&self.plan).await.unwrap()
    }

    fn table_dir(&self) -> std::path::PathBuf {
        self.warehouse_dir.join("default").join("hollow_processed")
    }

    fn export_file(&self) -> std::path::PathBuf {
        self.plan.export_path.join("part-0.csv")
    }
}

fn parquet_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|n| n.ends_with(".parquet"))
        .collect()
}

const SOURCE_V1: &str = indoc!(
    "
    id,title,rating
    1,hollow-one,4.5
    2,hollow-two,NA
    "
);

const SOURCE_V2: &str = indoc!(
    "
    id,title,rating
    1,hollow-one,4.5
    2,hollow-two,3.0
    3,hollow-three,5.0
    "
);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_bootstrap_first_run_exports_and_creates_table() {
    let harness = BootstrapHarness::new(SOURCE_V1);

    let result = harness.bootstrap().await;

    assert_eq!(result.records_exported, 2);
    assert_eq!(
        result
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data_type.as_str()))
            .collect::<Vec<_>>(),
        [
            ("id", "Int64"),
            ("title", "Utf8"),
            ("rating", "Float64"),
        ]
    );

    let entry = match result.table {
        TableRegistrationStatus::Created(entry) => entry,
        status => panic!("Expected table creation, got {status:?}"),
    };
    assert_eq!(entry.name.to_string(), "default.hollow_processed");
    assert_eq!(entry.format, TableDataFormat::Parquet);

    // Export is a single headered CSV file
    let content = std::fs::read_to_string(harness.export_file()).unwrap();
    assert!(content.starts_with("id,title,rating\n"));

    // Catalog holds the manifest and the parquet data
    assert!(harness.table_dir().join("manifest.json").is_file());
    assert!(!parquet_files(&harness.table_dir().join("data")).is_empty());
}

#[test_log::test(tokio::test)]
async fn test_bootstrap_rerun_skips_table_but_refreshes_export() {
    let harness = BootstrapHarness::new(SOURCE_V1);

    let first = harness.bootstrap().await;
    let created = match first.table {
        TableRegistrationStatus::Created(entry) => entry,
        status => panic!("Expected table creation, got {status:?}"),
    };

    // Change the source between runs to observe which side effects refresh
    std::fs::write(
        harness.plan.source_url.to_file_path().unwrap(),
        SOURCE_V2,
    )
    .unwrap();

    let second = harness.bootstrap().await;

    assert_eq!(second.records_exported, 3);
    let skipped = match second.table {
        TableRegistrationStatus::SkippedExists(entry) => entry.unwrap(),
        status => panic!("Expected creation to be skipped, got {status:?}"),
    };

    // The registration from the first run is untouched
    assert_eq!(skipped.created_at, created.created_at);
    assert_eq!(skipped.location, created.location);

    // While the export reflects the latest source
    let content = std::fs::read_to_string(harness.export_file()).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[test_log::test(tokio::test)]
async fn test_bootstrap_preserves_foreign_table_registration() {
    let harness = BootstrapHarness::new(SOURCE_V1);

    // A table registered out-of-band, with a manifest we know nothing about
    let table_dir = harness.table_dir();
    std::fs::create_dir_all(&table_dir).unwrap();
    let foreign_manifest = indoc!(
        r#"
        {
          "name": "default.hollow_processed",
          "format": "parquet",
          "location": "/somewhere/else",
          "columns": [],
          "createdAt": "2024-01-01T00:00:00Z"
        }
        "#
    );
    std::fs::write(table_dir.join("manifest.json"), foreign_manifest).unwrap();

    let result = harness.bootstrap().await;

    assert_eq!(result.records_exported, 2);
    let entry = match result.table {
        TableRegistrationStatus::SkippedExists(entry) => entry.unwrap(),
        status => panic!("Expected creation to be skipped, got {status:?}"),
    };
    assert_eq!(entry.location, "/somewhere/else");

    // The pre-existing manifest was not rewritten
    let on_disk = std::fs::read_to_string(table_dir.join("manifest.json")).unwrap();
    assert_eq!(on_disk, foreign_manifest);
}
