// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use chrono::Utc;
use datafusion::arrow::datatypes::Schema;
use datafusion::dataframe::DataFrameWriteOptions;
use datafusion::prelude::*;
use internal_error::*;
use lakeboot_core::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const MANIFEST_FILE: &str = "manifest.json";
const DATA_DIR: &str = "data";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Metastore that keeps the catalog in a warehouse directory on the local
/// file system.
///
/// Layout:
/// ```text
/// <root>/<namespace>/<table>/manifest.json
/// <root>/<namespace>/<table>/data/*.parquet
/// ```
///
/// The table directory doubles as the creation lock: `create_dir` either
/// reserves the name atomically or fails with `AlreadyExists`, so concurrent
/// bootstrap runs cannot both create the same table. The manifest is written
/// last and acts as the commit marker - a directory without one is an
/// unfinished creation and is not listed.
pub struct MetastoreLfs {
    root: PathBuf,
}

impl MetastoreLfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_dir(&self, name: &TableName) -> PathBuf {
        self.root.join(name.namespace()).join(name.table())
    }

    async fn list_dir_names(path: &Path) -> Result<Vec<String>, InternalError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(path).await.int_err()?;
        while let Some(entry) = entries.next_entry().await.int_err()? {
            if entry.file_type().await.int_err()?.is_dir() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read_manifest(&self, name: &TableName) -> Result<TableEntry, GetTableError> {
        let manifest_path = self.table_dir(name).join(MANIFEST_FILE);

        let data = match tokio::fs::read(&manifest_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TableNotFoundError { name: name.clone() }.into());
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(access_error(manifest_path.display().to_string(), e).into());
            }
            Err(e) => return Err(e.int_err().into()),
        };

        serde_json::from_slice(&data)
            .int_err()
            .map_err(GetTableError::Internal)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Metastore for MetastoreLfs {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn list_namespaces(&self) -> Result<Vec<String>, MetastoreError> {
        Ok(Self::list_dir_names(&self.root).await?)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%namespace))]
    async fn list_tables(&self, namespace: &str) -> Result<Vec<String>, MetastoreError> {
        // Namespaces are restricted to the identifier grammar, so anything
        // else (e.g. `../..`) cannot exist in the warehouse and must not be
        // joined onto its root
        if !TableName::is_valid_ident(namespace) {
            return Ok(Vec::new());
        }

        let ns_dir = self.root.join(namespace);
        let mut tables = Vec::new();
        for name in Self::list_dir_names(&ns_dir).await? {
            // A directory without a manifest is a creation that never finished
            if ns_dir.join(&name).join(MANIFEST_FILE).is_file() {
                tables.push(name);
            }
        }
        Ok(tables)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%name))]
    async fn get_table(&self, name: &TableName) -> Result<TableEntry, GetTableError> {
        self.read_manifest(name).await
    }

    #[tracing::instrument(level = "info", skip_all, fields(%name))]
    async fn create_table(
        &self,
        name: &TableName,
        df: DataFrame,
    ) -> Result<TableEntry, CreateTableError> {
        let table_dir = self.table_dir(name);

        tokio::fs::create_dir_all(self.root.join(name.namespace()))
            .await
            .map_err(|e| map_create_io_error(&self.root, e))?;

        // Atomic reservation of the table name
        match tokio::fs::create_dir(&table_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(TableAlreadyExistsError { name: name.clone() }.into());
            }
            Err(e) => return Err(map_create_io_error(&table_dir, e)),
        }

        let schema = Schema::from(df.schema());

        let data_dir = table_dir.join(DATA_DIR);
        tokio::fs::create_dir(&data_dir)
            .await
            .map_err(|e| map_create_io_error(&data_dir, e))?;

        let data_dir_str = data_dir
            .to_str()
            .ok_or_else(|| "Warehouse path is not valid UTF-8".int_err())?;

        df.write_parquet(data_dir_str, DataFrameWriteOptions::new(), None)
            .await
            .int_err()?;

        let entry = TableEntry {
            name: name.clone(),
            format: TableDataFormat::Parquet,
            location: data_dir.display().to_string(),
            columns: ColumnSpec::from_arrow_schema(&schema),
            created_at: Utc::now(),
        };

        // Commit marker
        let manifest = serde_json::to_vec_pretty(&entry).int_err()?;
        tokio::fs::write(table_dir.join(MANIFEST_FILE), manifest)
            .await
            .int_err()?;

        tracing::info!(table = %name, location = %entry.location, "Created table");

        Ok(entry)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn access_error(context: String, e: std::io::Error) -> AccessError {
    AccessError {
        context,
        source: Some(e.into()),
    }
}

fn map_create_io_error(path: &Path, e: std::io::Error) -> CreateTableError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        access_error(path.display().to_string(), e).into()
    } else {
        e.int_err().into()
    }
}
