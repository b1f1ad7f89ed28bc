// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use lakeboot_core::{Metastore, TableName};
use prettytable::{Cell, Row, Table};

use super::{CLIError, Command};
use crate::output::table_format;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct TablesListCommand {
    metastore: Arc<dyn Metastore>,
    namespace: Option<String>,
}

impl TablesListCommand {
    pub fn new(metastore: Arc<dyn Metastore>, namespace: Option<String>) -> Self {
        Self {
            metastore,
            namespace,
        }
    }

    async fn namespaces_to_list(&self) -> Result<Vec<String>, CLIError> {
        match &self.namespace {
            Some(ns) => Ok(vec![ns.clone()]),
            None => self
                .metastore
                .list_namespaces()
                .await
                .map_err(CLIError::failure),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Command for TablesListCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        if let Some(ns) = &self.namespace {
            if !TableName::is_valid_ident(ns) {
                return Err(CLIError::usage_error(format!("Invalid namespace: {ns}")));
            }
        }

        let mut table = Table::new();
        table.set_format(table_format());
        table.set_titles(Row::new(vec![
            Cell::new("Namespace").style_spec("bc"),
            Cell::new("Table").style_spec("bc"),
        ]));

        let mut rows = 0;
        for ns in self.namespaces_to_list().await? {
            for name in self
                .metastore
                .list_tables(&ns)
                .await
                .map_err(CLIError::failure)?
            {
                table.add_row(Row::new(vec![Cell::new(&ns), Cell::new(&name)]));
                rows += 1;
            }
        }

        // Header doesn't render without any data rows
        if rows == 0 {
            table.add_row(Row::new(vec![Cell::new(""), Cell::new("")]));
        }

        table.printstd();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
