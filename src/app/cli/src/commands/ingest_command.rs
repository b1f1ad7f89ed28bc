// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use lakeboot_core::*;
use prettytable::{Cell, Row, Table};

use super::{CLIError, Command};
use crate::output::{table_format, OutputConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct IngestCommand {
    bootstrap_svc: Arc<dyn IngestBootstrapService>,
    metastore: Arc<dyn Metastore>,
    plan: BootstrapPlan,
    output_config: Arc<OutputConfig>,
}

impl IngestCommand {
    pub fn new(
        bootstrap_svc: Arc<dyn IngestBootstrapService>,
        metastore: Arc<dyn Metastore>,
        plan: BootstrapPlan,
        output_config: Arc<OutputConfig>,
    ) -> Self {
        Self {
            bootstrap_svc,
            metastore,
            plan,
            output_config,
        }
    }

    fn print_schema(columns: &[ColumnSpec]) {
        println!("{}", console::style("Source schema:").bold());

        let mut table = Table::new();
        table.set_format(table_format());
        table.set_titles(Row::new(vec![
            Cell::new("Column").style_spec("bc"),
            Cell::new("Type").style_spec("bc"),
            Cell::new("Nullable").style_spec("bc"),
        ]));
        for c in columns {
            table.add_row(Row::new(vec![
                Cell::new(&c.name),
                Cell::new(&c.data_type),
                Cell::new(if c.nullable { "true" } else { "false" }).style_spec("c"),
            ]));
        }
        table.printstd();
    }

    fn print_table_entry(entry: &TableEntry) {
        println!("{}", console::style("Table details:").bold());

        let mut table = Table::new();
        table.set_format(table_format());
        table.add_row(Row::new(vec![
            Cell::new("Name").style_spec("b"),
            Cell::new(entry.name.table()),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Namespace").style_spec("b"),
            Cell::new(entry.name.namespace()),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Format").style_spec("b"),
            Cell::new(&entry.format.to_string()),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Location").style_spec("b"),
            Cell::new(&entry.location),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Created").style_spec("b"),
            Cell::new(&entry.created_at.to_rfc3339()),
        ]));
        table.printstd();

        Self::print_schema(&entry.columns);
    }

    async fn print_catalog_listing(&self) -> Result<(), CLIError> {
        let namespaces = self
            .metastore
            .list_namespaces()
            .await
            .map_err(CLIError::failure)?;

        println!("{}", console::style("Namespaces:").bold());
        for ns in &namespaces {
            println!("  {ns}");
        }

        let namespace = self.plan.table_name.namespace();
        let tables = self
            .metastore
            .list_tables(namespace)
            .await
            .map_err(CLIError::failure)?;

        println!("{}", console::style(format!("Tables in {namespace}:")).bold());
        for t in &tables {
            println!("  {t}");
        }

        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl Command for IngestCommand {
    async fn run(&mut self) -> Result<(), CLIError> {
        let result = self
            .bootstrap_svc
            .bootstrap(&self.plan)
            .await
            .map_err(CLIError::failure)?;

        Self::print_schema(&result.columns);

        if !self.output_config.quiet {
            eprintln!(
                "{}",
                console::style(format!(
                    "Exported {} records to {}",
                    result.records_exported,
                    self.plan.export_path.display()
                ))
                .green()
                .bold()
            );

            match &result.table {
                TableRegistrationStatus::Created(_) => {
                    eprintln!(
                        "{}",
                        console::style(format!("Created table {}", self.plan.table_name))
                            .green()
                            .bold()
                    );
                }
                TableRegistrationStatus::SkippedExists(_) => {
                    eprintln!(
                        "{}",
                        console::style(format!(
                            "Table {} already exists - skipped creation",
                            self.plan.table_name
                        ))
                        .yellow()
                        .bold()
                    );
                }
            }
        }

        self.print_catalog_listing().await?;

        match &result.table {
            TableRegistrationStatus::Created(entry)
            | TableRegistrationStatus::SkippedExists(Some(entry)) => {
                Self::print_table_entry(entry);
            }
            TableRegistrationStatus::SkippedExists(None) => {
                eprintln!(
                    "{}",
                    console::style("Existing table registration could not be read back").yellow()
                );
            }
        }

        Ok(())
    }
}
