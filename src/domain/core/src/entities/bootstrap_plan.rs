// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use url::Url;

use crate::{ExportFormat, ReadStepCsv, TableName};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fully-resolved description of one bootstrap run. Produced by the
/// configuration layer after validation - services never reach into the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    /// Location of the source file, e.g.
    /// `s3://lake/datalake/data/content_metadata/hollow_processed.csv`
    pub source_url: Url,
    pub read: ReadStepCsv,
    /// Table to register in the metastore if absent
    pub table_name: TableName,
    /// Local directory receiving the export, replaced on every run
    pub export_path: PathBuf,
    pub export_format: ExportFormat,
}
