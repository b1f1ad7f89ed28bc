// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use datafusion::arrow::datatypes::Schema;
use lakeboot_core::*;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Implementation of the [`IngestBootstrapService`] interface using Apache
/// `DataFusion` engine.
///
/// The run is a linear sequence: read, export, conditional catalog
/// registration. Only the registration is guarded - the export is refreshed
/// unconditionally.
pub struct IngestBootstrapServiceImpl {
    session_factory: Arc<SessionFactory>,
    export_service: Arc<dyn ExportService>,
    metastore: Arc<dyn Metastore>,
}

impl IngestBootstrapServiceImpl {
    pub fn new(
        session_factory: Arc<SessionFactory>,
        export_service: Arc<dyn ExportService>,
        metastore: Arc<dyn Metastore>,
    ) -> Self {
        Self {
            session_factory,
            export_service,
            metastore,
        }
    }

    async fn register_table_if_absent(
        &self,
        plan: &BootstrapPlan,
        df: datafusion::prelude::DataFrame,
    ) -> Result<TableRegistrationStatus, BootstrapError> {
        let existing = self
            .metastore
            .list_tables(plan.table_name.namespace())
            .await?;

        if existing.iter().any(|t| t == plan.table_name.table()) {
            tracing::info!(table = %plan.table_name, "Table already registered - skipping creation");
            let entry = self.metastore.get_table(&plan.table_name).await.ok();
            return Ok(TableRegistrationStatus::SkippedExists(entry));
        }

        match self.metastore.create_table(&plan.table_name, df).await {
            Ok(entry) => Ok(TableRegistrationStatus::Created(entry)),
            Err(CreateTableError::AlreadyExists(_)) => {
                // A concurrent run won the creation race between our listing
                // and the create call
                tracing::warn!(table = %plan.table_name, "Table appeared concurrently - skipping creation");
                let entry = self.metastore.get_table(&plan.table_name).await.ok();
                Ok(TableRegistrationStatus::SkippedExists(entry))
            }
            Err(CreateTableError::Access(e)) => Err(e.into()),
            Err(CreateTableError::Internal(e)) => Err(e.into()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl IngestBootstrapService for IngestBootstrapServiceImpl {
    #[tracing::instrument(
        level = "info",
        name = "ingest_bootstrap",
        skip_all,
        fields(source_url = %plan.source_url, table = %plan.table_name)
    )]
    async fn bootstrap(&self, plan: &BootstrapPlan) -> Result<BootstrapResult, BootstrapError> {
        let ctx = self.session_factory.session_context()?;

        let reader = ReaderCsv {};
        let conf = ReadStep::Csv(plan.read.clone());
        let df = reader.read(&ctx, &plan.source_url, &conf).await?;

        let schema: Schema = df.schema().into();
        let columns = ColumnSpec::from_arrow_schema(&schema);
        tracing::info!(schema = ?schema, "Resolved source schema");

        let records_exported = self
            .export_service
            .export_to_fs(df.clone(), &plan.export_path, plan.export_format)
            .await?;

        let table = self.register_table_if_absent(plan, df).await?;

        Ok(BootstrapResult {
            columns,
            records_exported,
            table,
        })
    }
}
