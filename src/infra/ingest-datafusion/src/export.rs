// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use datafusion::arrow::array::{AsArray, PrimitiveArray, RecordBatch};
use datafusion::arrow::datatypes::UInt64Type;
use datafusion::config::CsvOptions;
use datafusion::dataframe::DataFrameWriteOptions;
use datafusion::prelude::*;
use internal_error::{InternalError, *};
use lakeboot_core::{ExportError, ExportFormat, ExportService};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Implementation of the [`ExportService`] interface using Apache
/// `DataFusion` engine.
///
/// The export directory is fully replaced on every call, leaving a single
/// data file with a header row - mirroring what downstream consumers of the
/// raw extract expect.
pub struct ExportServiceImpl {}

impl ExportServiceImpl {
    pub fn new() -> Self {
        Self {}
    }

    fn records_written(&self, batches: &[RecordBatch]) -> Result<u64, InternalError> {
        let mut total = 0;
        for batch in batches {
            let col = batch
                .column_by_name("count")
                .ok_or("cannot get count col")
                .int_err()?;
            let data: &PrimitiveArray<UInt64Type> = col
                .as_primitive_opt::<UInt64Type>()
                .ok_or("cannot cast count col data")
                .int_err()?;
            let count = data.values().first().ok_or("cannot get count value").int_err()?;
            total += count;
        }
        Ok(total)
    }

    async fn replace_dir(&self, path: &Path) -> Result<(), InternalError> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.int_err()),
        }
        tokio::fs::create_dir_all(path).await.int_err()?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ExportService for ExportServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(path = %path.display(), %format))]
    async fn export_to_fs(
        &self,
        df: DataFrame,
        path: &Path,
        format: ExportFormat,
    ) -> Result<u64, ExportError> {
        self.replace_dir(path).await?;

        let out_file = path.join(format!("part-0.{format}"));
        let out_file = out_file
            .to_str()
            .ok_or_else(|| "Export path is not valid UTF-8".int_err())?;

        let write_options = DataFrameWriteOptions::new().with_single_file_output(true);

        let result = match format {
            ExportFormat::Csv => {
                let writer_options = CsvOptions {
                    has_header: Some(true),
                    ..Default::default()
                };
                df.write_csv(out_file, write_options, Some(writer_options))
                    .await
            }
            ExportFormat::Parquet => df.write_parquet(out_file, write_options, None).await,
        }
        .int_err()?;

        Ok(self.records_written(&result)?)
    }
}
