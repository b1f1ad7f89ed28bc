// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use datafusion::prelude::DataFrame;
use internal_error::InternalError;
use thiserror::Error;

use crate::{TableEntry, TableName};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Narrow client interface to the shared table catalog. The engine and the
/// catalog backing store are external collaborators - implementations only
/// translate between them.
#[async_trait::async_trait]
pub trait Metastore: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>, MetastoreError>;

    /// Returns the names of tables registered under a namespace, unqualified
    async fn list_tables(&self, namespace: &str) -> Result<Vec<String>, MetastoreError>;

    async fn get_table(&self, name: &TableName) -> Result<TableEntry, GetTableError>;

    /// Persists the dataset as a new table. Creation is atomic: when two
    /// writers race for the same name exactly one succeeds and the other
    /// observes [`CreateTableError::AlreadyExists`].
    async fn create_table(
        &self,
        name: &TableName,
        df: DataFrame,
    ) -> Result<TableEntry, CreateTableError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum MetastoreError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Debug, Error)]
pub enum GetTableError {
    #[error(transparent)]
    NotFound(#[from] TableNotFoundError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Debug, Error)]
pub enum CreateTableError {
    #[error(transparent)]
    AlreadyExists(#[from] TableAlreadyExistsError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("Table does not exist: {name}")]
pub struct TableNotFoundError {
    pub name: TableName,
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("Table already exists: {name}")]
pub struct TableAlreadyExistsError {
    pub name: TableName,
}

#[derive(Error, Debug)]
#[error("Access denied: {context}")]
pub struct AccessError {
    pub context: String,
    #[source]
    pub source: Option<internal_error::BoxedError>,
}
