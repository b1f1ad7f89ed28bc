// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use datafusion::prelude::DataFrame;
use internal_error::InternalError;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Writes a dataset out to the local filesystem as a single data file.
/// Unlike the catalog registration this is not idempotent - the target
/// directory is replaced on every call.
#[async_trait::async_trait]
pub trait ExportService: Send + Sync {
    /// Returns the number of records written
    async fn export_to_fs(
        &self,
        df: DataFrame,
        path: &Path,
        format: ExportFormat,
    ) -> Result<u64, ExportError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Parquet,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Parquet => write!(f, "parquet"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}
