// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use datafusion::arrow::datatypes::Schema;
use datafusion::common::DFSchema;
use datafusion::error::DataFusionError;
use datafusion::prelude::SessionContext;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parses column declarations into an Arrow schema.
///
/// Expects input in the form of CREATE TABLE parameters, e.g.:
///
///   "a STRING, b INT NOT NULL, c TIMESTAMP"
pub async fn parse_ddl_to_arrow_schema(
    ctx: &SessionContext,
    ddl: &str,
) -> Result<Schema, DataFusionError> {
    let sql = format!("create table x ({ddl})");
    let plan = ctx.state().create_logical_plan(&sql).await?;
    let schema: DFSchema = plan.schema().as_ref().clone();
    Ok(schema.into())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Joins DDL parts as they appear in a read step config into a single
/// declaration list
pub fn ddl_parts_to_string(parts: &[String]) -> String {
    parts.join(", ")
}
