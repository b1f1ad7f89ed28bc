// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use datafusion::arrow::datatypes::Schema;
use datafusion::prelude::*;
use internal_error::{InternalError, *};
use lakeboot_core::{BootstrapError, ReadStep};
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A common interface for readers that implement support for various source
/// formats defined in the [`ReadStep`].
#[async_trait::async_trait]
pub trait Reader: Send + Sync {
    /// Returns schema that the output will be coerced into, if such schema is
    /// defined in the [`ReadStep`].
    async fn output_schema(
        &self,
        ctx: &SessionContext,
        conf: &ReadStep,
    ) -> Result<Option<Schema>, ReadError> {
        let ReadStep::Csv(csv) = conf;
        let Some(ddl_parts) = &csv.schema else {
            return Ok(None);
        };

        let ddl = crate::schema::ddl_parts_to_string(ddl_parts);

        let schema = crate::schema::parse_ddl_to_arrow_schema(ctx, &ddl)
            .await
            .int_err()?;

        Ok(Some(schema))
    }

    /// Returns a [`DataFrame`] that is ready to read the data.
    ///
    /// Note that [`DataFrame`] represents a physical plan, and no data has
    /// been read yet when this function returns, so you will need to handle
    /// read errors when consuming the data. Some input data may be touched to
    /// infer the schema if one was not specified explicitly.
    async fn read(
        &self,
        ctx: &SessionContext,
        url: &Url,
        conf: &ReadStep,
    ) -> Result<DataFrame, ReadError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<ReadError> for BootstrapError {
    fn from(v: ReadError) -> Self {
        match v {
            ReadError::Internal(e) => Self::Internal(e),
        }
    }
}
