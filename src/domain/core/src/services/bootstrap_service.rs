// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{AccessError, BootstrapPlan, ColumnSpec, TableEntry};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One-shot batch procedure that loads the source file, refreshes the local
/// export, and registers the catalog table if it does not exist yet.
///
/// There is no partial-failure recovery: a failing step aborts the run and
/// leaves the side effects of earlier steps in place.
#[async_trait::async_trait]
pub trait IngestBootstrapService: Send + Sync {
    async fn bootstrap(&self, plan: &BootstrapPlan) -> Result<BootstrapResult, BootstrapError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct BootstrapResult {
    /// Schema the source file resolved to (declared or inferred)
    pub columns: Vec<ColumnSpec>,
    pub records_exported: u64,
    pub table: TableRegistrationStatus,
}

#[derive(Debug)]
pub enum TableRegistrationStatus {
    Created(TableEntry),
    /// The table was already registered and was left untouched. The entry is
    /// absent when the existing registration cannot be read back.
    SkippedExists(Option<TableEntry>),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<crate::MetastoreError> for BootstrapError {
    fn from(v: crate::MetastoreError) -> Self {
        match v {
            crate::MetastoreError::Access(e) => Self::Access(e),
            crate::MetastoreError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<crate::ExportError> for BootstrapError {
    fn from(v: crate::ExportError) -> Self {
        match v {
            crate::ExportError::Internal(e) => Self::Internal(e),
        }
    }
}
